//! CLI argument definitions for the Brightline server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use brightline_core::config::StudioConfig;

/// Brightline - chat assistant and contact intake backend for the studio website.
#[derive(Parser, Debug, Default)]
#[command(name = "brightline", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Address to bind.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BRIGHTLINE_CONFIG env var > ~/.brightline/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BRIGHTLINE_CONFIG") {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        default_config_path()
    }

    /// Resolve the log filter directive, if overridden on the command line.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Apply command-line overrides on top of file and environment values.
    pub fn apply_to(&self, config: &mut StudioConfig) {
        if let Some(port) = self.port {
            config.general.port = port;
        }
        if let Some(ref host) = self.host {
            config.general.host = host.clone();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".brightline").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".brightline").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "brightline",
            "--config",
            "/etc/brightline.toml",
            "-p",
            "8080",
            "--host",
            "0.0.0.0",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/etc/brightline.toml"));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.resolve_log_level().as_deref(), Some("debug"));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = StudioConfig::default();
        config.general.port = 4000;

        let args = CliArgs {
            port: Some(8080),
            host: Some("0.0.0.0".to_string()),
            ..CliArgs::default()
        };
        args.apply_to(&mut config);

        assert_eq!(config.general.port, 8080);
        assert_eq!(config.general.host, "0.0.0.0");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = StudioConfig::default();
        config.general.port = 4000;
        CliArgs::default().apply_to(&mut config);
        assert_eq!(config.general.port, 4000);
        assert_eq!(config.general.host, "127.0.0.1");
    }
}
