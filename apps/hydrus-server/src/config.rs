//! Layered server configuration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use hydrus::HydrusConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub hydrus: HydrusConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub auth: bool,
    pub verbose: u8,
}

impl AppConfig {
    /// defaults -> YAML file (if given) -> env (`HYDRUS__*`, `__` nesting).
    ///
    /// # Errors
    /// Fails on a missing explicit file, malformed YAML or mistyped values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("HYDRUS__").split("__"));

        figment
            .extract()
            .context("failed to load configuration (yaml/env)")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(bind) = &cli.bind {
            self.server.bind_addr.clone_from(bind);
        }
        if let Some(port) = cli.port {
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map_or("127.0.0.1", |(host, _)| host);
            self.server.bind_addr = format!("{host}:{port}");
        }
        if cli.auth {
            self.hydrus.authentication = true;
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// # Errors
    /// Fails when `server.bind_addr` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.server.bind_addr))
    }

    /// Effective configuration as pretty JSON (valid YAML), passwords redacted.
    ///
    /// # Errors
    /// Only fails if serialization fails.
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}
