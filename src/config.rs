use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};

use crate::error::DockhandError;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Path to the container engine binary.
    #[serde(default = "default_docker_binary")]
    pub docker_binary: String,
    /// Which router resolves public app addresses: "noop", "hipache" or "nginx".
    #[serde(default = "default_router")]
    pub router: String,
    /// Domain under which app addresses are published.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Port the nginx router listens on.
    #[serde(default = "default_nginx_port")]
    pub nginx_port: u16,
    /// Image repository namespace; apps run `{namespace}/{platform}`.
    #[serde(default = "default_namespace")]
    pub repository_namespace: String,
    /// Port apps listen on inside their container.
    #[serde(default = "default_app_port")]
    pub app_port: u16,
    /// Connect timeout for the TCP liveness probe. Without a bound a single
    /// unreachable address would stall the whole collection pass.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Where the file-backed container store lives.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Extra arguments appended to `docker run -d`.
    #[serde(default)]
    pub run_args: Vec<String>,
}

fn default_docker_binary() -> String {
    "docker".to_string()
}

fn default_router() -> String {
    "noop".to_string()
}

fn default_domain() -> String {
    "localhost".to_string()
}

fn default_nginx_port() -> u16 {
    8080
}

fn default_namespace() -> String {
    "dockhand".to_string()
}

fn default_app_port() -> u16 {
    8888
}

fn default_probe_timeout_ms() -> u64 {
    500
}

fn default_store_path() -> String {
    "dockhand.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            docker_binary: default_docker_binary(),
            router: default_router(),
            domain: default_domain(),
            nginx_port: default_nginx_port(),
            repository_namespace: default_namespace(),
            app_port: default_app_port(),
            probe_timeout_ms: default_probe_timeout_ms(),
            store_path: default_store_path(),
            run_args: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Config, DockhandError> {
        let config = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("DOCKHAND_"))
            .extract()?;
        Ok(config)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn image_for(&self, platform: &str) -> String {
        format!("{}/{}", self.repository_namespace, platform)
    }
}
