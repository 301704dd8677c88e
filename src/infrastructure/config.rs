use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::external_services::OcrCommandConfig;

/// Default for `OCR_COMMAND`. The value is split on whitespace with no quoting,
/// so a program path containing spaces needs a wrapper. `ocr_extraction.py` is
/// expected to be an argv-driven wrapper: it calls `process_prescription` on
/// `{input}` and writes the JSON to `{output}` instead of `./output.json`.
pub const DEFAULT_OCR_COMMAND: &str = "python3 ocr_extraction.py {input} {output}";

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    EmptyCommand,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "Invalid value {:?} for {}: {}", value, key, reason)
            }
            ConfigError::EmptyCommand => write!(f, "OCR_COMMAND must name a program"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub ocr_output_dir: PathBuf,
    pub ocr_command: Vec<String>,
    pub ocr_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            upload_dir: PathBuf::from("./uploads"),
            ocr_output_dir: PathBuf::from("./ocr_output"),
            ocr_command: split_command(DEFAULT_OCR_COMMAND),
            ocr_timeout: Duration::from_secs(120),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, falling back to defaults
    /// for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "HOST", defaults.host)?;
        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);
        let ocr_output_dir = lookup("OCR_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.ocr_output_dir);
        let ocr_command = lookup("OCR_COMMAND")
            .map(|raw| split_command(&raw))
            .unwrap_or(defaults.ocr_command);
        let timeout_secs = parse_or(&lookup, "OCR_TIMEOUT_SECS", defaults.ocr_timeout.as_secs())?;
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;

        if ocr_command.is_empty() {
            return Err(ConfigError::EmptyCommand);
        }

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OCR_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            upload_dir,
            ocr_output_dir,
            ocr_command,
            ocr_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn ocr_command_config(&self) -> OcrCommandConfig {
        let (program, args) = self
            .ocr_command
            .split_first()
            .map(|(program, args)| (program.clone(), args.to_vec()))
            .unwrap_or_default();

        OcrCommandConfig {
            program,
            args,
            output_dir: self.ocr_output_dir.clone(),
        }
    }
}

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(|part| part.to_string()).collect()
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
        },
        None => Ok(default),
    }
}
