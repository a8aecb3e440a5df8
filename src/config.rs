use std::{
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::AUTH_CODE_LEN;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listener: ListenerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_listener_port() -> u16 {
    9000
}

fn default_max_packet_bytes() -> usize {
    1024
}

fn default_auth_code() -> String {
    "1111".to_string()
}

fn default_allowed_hosts() -> Vec<IpAddr> {
    vec![
        "127.0.0.1".parse().expect("literal address"),
        "192.168.1.1".parse().expect("literal address"),
    ]
}

fn default_locale() -> Locale {
    Locale::En
}

fn default_scene_queue_capacity() -> usize {
    16
}

fn default_overflow() -> OverflowPolicy {
    OverflowPolicy::DropNew
}

fn default_logging_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_logging_filter() -> String {
    "info".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_logging_retention_days() -> usize {
    14
}

fn default_enabled_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    #[serde(default = "default_listener_port")]
    pub port: u16,
    /// Fixed transport buffer size; the sender pads up to this with spaces.
    #[serde(default = "default_max_packet_bytes")]
    pub max_packet_bytes: usize,
    /// 4-byte secret prefix every packet must carry.
    #[serde(default = "default_auth_code")]
    pub auth_code: String,
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<IpAddr>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_listener_port(),
            max_packet_bytes: default_max_packet_bytes(),
            auth_code: default_auth_code(),
            allowed_hosts: default_allowed_hosts(),
        }
    }
}

impl ListenerConfig {
    pub fn auth_code_bytes(&self) -> Result<[u8; AUTH_CODE_LEN]> {
        let bytes = self.auth_code.as_bytes();
        bytes.try_into().map_err(|_| {
            anyhow!(
                "listener.auth_code must be exactly {} bytes, got {}",
                AUTH_CODE_LEN,
                bytes.len()
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    En,
    Es,
    Fr,
}

/// What to do when the scene queue is full. `DropNew` keeps the panel
/// showing the freshest frame it managed to accept; `Block` applies
/// backpressure to the listener instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    DropNew,
    Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub locale: Locale,
    #[serde(default = "default_scene_queue_capacity")]
    pub scene_queue_capacity: usize,
    #[serde(default = "default_overflow")]
    pub overflow: OverflowPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            scene_queue_capacity: default_scene_queue_capacity(),
            overflow: default_overflow(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_logging_retention_days")]
    pub retention_days: usize,
    #[serde(default = "default_enabled_true")]
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_logging_dir(),
            filter: default_logging_filter(),
            rotation: default_logging_rotation(),
            retention_days: default_logging_retention_days(),
            stderr_warn_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize config")?;

        // auth_code is validated eagerly so a bad secret fails at startup
        // instead of silently rejecting every packet.
        config.listener.auth_code_bytes()?;
        if config.display.scene_queue_capacity == 0 {
            config.display.scene_queue_capacity = default_scene_queue_capacity();
        }

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        if !config.logging.dir.is_absolute() {
            config.logging.dir = config_base.join(&config.logging.dir);
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ListenerConfig, OverflowPolicy};

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.max_packet_bytes, 1024);
        assert_eq!(config.listener.auth_code, "1111");
        assert_eq!(config.listener.allowed_hosts.len(), 2);
        assert_eq!(config.display.overflow, OverflowPolicy::DropNew);
    }

    #[test]
    fn auth_code_must_be_four_bytes() {
        let listener = ListenerConfig {
            auth_code: "12345".to_string(),
            ..ListenerConfig::default()
        };
        let err = listener.auth_code_bytes().expect_err("must fail");
        assert!(err.to_string().contains("auth_code"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let value: serde_json::Value =
            json5::from_str("{ listener: { port: 9100 } }").expect("valid json5");
        let config: Config = serde_json::from_value(value).expect("deserializable");
        assert_eq!(config.listener.port, 9100);
        assert_eq!(config.listener.auth_code, "1111");
        assert_eq!(config.display.scene_queue_capacity, 16);
    }
}
