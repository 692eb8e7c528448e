//! Operator-facing channel configuration.

use serde::Deserialize;

/// Host and port configuration for one distribution session.
///
/// The responder binds `{server_ip}:{dist_port}`; the subscriber connects
/// to `{server_ip}:{sync_port}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub server_ip: String,
    pub dist_port: u16,
    pub sync_port: u16,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            server_ip: "127.0.0.1".into(),
            dist_port: 5565,
            sync_port: 5556,
        }
    }
}

impl DistributionConfig {
    /// Parse a TOML config, falling back to defaults on malformed input.
    pub fn from_toml(contents: &str) -> Self {
        match toml::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed distribution config: {}", e);
                Self::default()
            }
        }
    }

    pub fn responder_addr(&self) -> String {
        format!("{}:{}", self.server_ip, self.dist_port)
    }

    pub fn subscriber_addr(&self) -> String {
        format!("{}:{}", self.server_ip, self.sync_port)
    }
}
