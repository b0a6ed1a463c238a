//! Configuration sources: one unit of config text to evaluate, coming from
//! a captured file or a live device.

pub mod device;
pub mod file;

pub use device::{DeviceTarget, Inventory, NxapiClient};
pub use file::load_file_source;

/// Where a source's text came from. Device sources go through the
/// retrieval coordinator and are archived after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    File,
    Device,
}

/// One unit of configuration text.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub identifier: String,
    pub lines: Vec<String>,
    pub origin: SourceOrigin,
}

impl ConfigSource {
    /// File-origin source from already-read lines.
    pub fn from_lines(identifier: &str, lines: Vec<String>) -> Self {
        Self {
            identifier: identifier.to_string(),
            lines,
            origin: SourceOrigin::File,
        }
    }

    /// Device-origin source. A banner line marks the device in the
    /// archive file.
    pub fn from_device(name: &str, retrieved: Vec<String>) -> Self {
        let mut lines = Vec::with_capacity(retrieved.len() + 1);
        lines.push(format!("!***{name}"));
        lines.extend(retrieved);
        Self {
            identifier: name.to_string(),
            lines,
            origin: SourceOrigin::Device,
        }
    }
}
