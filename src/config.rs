//! Global run configuration, stores everything the retrieval side can tune.

use std::path::PathBuf;

/// Default show commands issued per device, in retrieval order.
/// Version data is fetched first, the configuration subsection is appended.
pub const DEFAULT_SHOW_COMMANDS: [&str; 2] = ["show version", "show run ntp"];

/// Global configuration
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // Credentials for the management API
    pub username: String,
    pub password: String,
    // Directory for archives and exports
    pub base_dir: PathBuf,
    // HTTP timeout (seconds)
    pub http_timeout: u64,
    // Show commands issued per device, in order
    pub show_commands: Vec<String>,
    // Verbose report output (per-rule match counts)
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
            base_dir: PathBuf::from("DATA/"),
            http_timeout: 120,
            show_commands: DEFAULT_SHOW_COMMANDS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            verbose: false,
        }
    }
}

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Default configuration
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// Custom configuration
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// Configuration builder
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn username(mut self, username: String) -> Self {
        self.config.username = username;
        self
    }

    pub fn password(mut self, password: String) -> Self {
        self.config.password = password;
        self
    }

    pub fn base_dir(mut self, dir: PathBuf) -> Self {
        self.config.base_dir = dir;
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn show_commands(mut self, commands: Vec<String>) -> Self {
        self.config.show_commands = commands;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
