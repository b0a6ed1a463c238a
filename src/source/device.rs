//! Device-backed sources: inventory model plus the NX-API transport used
//! to pull raw configuration text off a live device.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::error::{AuditError, AuditResult};

pub const DEVICE_TYPE_NXOS: &str = "cisco_nxos";

fn default_port() -> u16 {
    80
}

fn default_device_type() -> String {
    DEVICE_TYPE_NXOS.to_string()
}

/// One device from the inventory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTarget {
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_device_type")]
    pub device_type: String,
    /// Scope tag selecting this device, e.g. ALL / TEST / UAT.
    pub group: String,
}

impl DeviceTarget {
    fn endpoint(&self) -> String {
        format!("http://{}:{}/ins", self.host, self.port)
    }
}

/// Device inventory, loaded from a JSON file at startup. Replaces any
/// process-wide device list; the selected targets are passed explicitly
/// into the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub devices: Vec<DeviceTarget>,
}

impl Inventory {
    pub fn parse(text: &str) -> AuditResult<Self> {
        let inventory: Inventory = serde_json::from_str(text)?;
        Ok(inventory)
    }

    pub async fn load(path: impl AsRef<Path>) -> AuditResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text)
    }

    /// Devices tagged with the given scope group; an empty selection is
    /// an inventory error, not an empty run.
    pub fn select(&self, group: &str) -> AuditResult<Vec<DeviceTarget>> {
        let selected: Vec<DeviceTarget> = self
            .devices
            .iter()
            .filter(|d| d.group == group)
            .cloned()
            .collect();
        if selected.is_empty() {
            return Err(AuditError::Inventory(format!(
                "scope `{group}` selects no devices"
            )));
        }
        Ok(selected)
    }
}

/// NX-API response envelope for a single-command request.
#[derive(Debug, Deserialize)]
struct InsApiEnvelope {
    ins_api: InsApiResponse,
}

#[derive(Debug, Deserialize)]
struct InsApiResponse {
    outputs: InsApiOutputs,
}

#[derive(Debug, Deserialize)]
struct InsApiOutputs {
    output: InsApiOutput,
}

#[derive(Debug, Deserialize)]
struct InsApiOutput {
    body: Option<String>,
    code: Option<String>,
    msg: Option<String>,
}

/// NX-API client: one POST per show command, basic auth, shared timeout.
#[derive(Debug, Clone)]
pub struct NxapiClient {
    client: Client,
    username: String,
    password: String,
}

impl NxapiClient {
    pub fn new(config: &GlobalConfig) -> AuditResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;
        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Fetch the full line sequence for one device: every show command in
    /// order, bodies split into lines and concatenated.
    pub async fn fetch_device_config(
        &self,
        device: &DeviceTarget,
        commands: &[String],
    ) -> AuditResult<Vec<String>> {
        if device.device_type != DEVICE_TYPE_NXOS {
            return Err(AuditError::UnsupportedDeviceType {
                device: device.name.clone(),
                device_type: device.device_type.clone(),
            });
        }

        let mut lines = Vec::new();
        for command in commands {
            let body = self.show(device, command).await?;
            lines.extend(body.split('\n').map(|l| l.to_string()));
        }
        Ok(lines)
    }

    /// Issue one show command and return the raw ascii body.
    async fn show(&self, device: &DeviceTarget, command: &str) -> AuditResult<String> {
        if !command.starts_with("show ") {
            return Err(AuditError::InvalidShowCommand(command.to_string()));
        }

        let payload = json!({
            "ins_api": {
                "version": "1.2",
                "type": "cli_show_ascii",
                "chunk": "0",
                "sid": "1",
                "input": command,
                "output_format": "json"
            }
        });

        let endpoint = device.endpoint();
        debug!("POST {} `{}`", endpoint, command);
        let response = self
            .client
            .post(&endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuditError::DeviceFetch {
                device: device.name.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::DeviceFetch {
                device: device.name.clone(),
                reason: format!("call to {endpoint} failed, status code {status}"),
            });
        }

        let envelope: InsApiEnvelope =
            response.json().await.map_err(|e| AuditError::DeviceFetch {
                device: device.name.clone(),
                reason: format!("malformed NX-API response: {e}"),
            })?;

        let output = envelope.ins_api.outputs.output;
        output.body.ok_or_else(|| AuditError::DeviceFetch {
            device: device.name.clone(),
            reason: format!(
                "command `{}` returned no body (code {:?}, msg {:?})",
                command, output.code, output.msg
            ),
        })
    }
}
