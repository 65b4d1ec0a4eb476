//! Address routing boundary. The platform publishes each app under a public
//! address owned by one of the reverse proxies; this adapter only ever asks
//! a router for that address. The active router is chosen once at startup
//! from the config, not re-resolved per call.

use crate::config::Config;
use crate::error::DockhandError;

pub trait Router: Send + Sync + 'static + Clone {
    fn addr(&self, app_name: &str) -> impl Future<Output = Result<String, DockhandError>> + Send;
}

/// Testing router: publishes nothing, just echoes the address an app would
/// get under the configured domain.
#[derive(Clone, Debug)]
pub struct NoopRouter {
    domain: String,
}

impl Router for NoopRouter {
    async fn addr(&self, app_name: &str) -> Result<String, DockhandError> {
        Ok(format!("{}.{}", app_name, self.domain))
    }
}

#[derive(Clone, Debug)]
pub struct HipacheRouter {
    domain: String,
}

impl Router for HipacheRouter {
    async fn addr(&self, app_name: &str) -> Result<String, DockhandError> {
        if app_name.is_empty() {
            return Err(DockhandError::Router("empty app name".to_string()));
        }
        Ok(format!("{}.{}", app_name, self.domain))
    }
}

#[derive(Clone, Debug)]
pub struct NginxRouter {
    domain: String,
    port: u16,
}

impl Router for NginxRouter {
    async fn addr(&self, app_name: &str) -> Result<String, DockhandError> {
        if app_name.is_empty() {
            return Err(DockhandError::Router("empty app name".to_string()));
        }
        Ok(format!("{}.{}:{}", app_name, self.domain, self.port))
    }
}

/// The router variant selected by `Config::router`.
#[derive(Clone, Debug)]
pub enum RouterKind {
    Noop(NoopRouter),
    Hipache(HipacheRouter),
    Nginx(NginxRouter),
}

impl RouterKind {
    pub fn from_config(config: &Config) -> Result<RouterKind, DockhandError> {
        match config.router.as_str() {
            "noop" => Ok(RouterKind::Noop(NoopRouter {
                domain: config.domain.clone(),
            })),
            "hipache" => Ok(RouterKind::Hipache(HipacheRouter {
                domain: config.domain.clone(),
            })),
            "nginx" => Ok(RouterKind::Nginx(NginxRouter {
                domain: config.domain.clone(),
                port: config.nginx_port,
            })),
            other => Err(DockhandError::UnknownRouter(other.to_string())),
        }
    }
}

impl Router for RouterKind {
    async fn addr(&self, app_name: &str) -> Result<String, DockhandError> {
        match self {
            RouterKind::Noop(router) => router.addr(app_name).await,
            RouterKind::Hipache(router) => router.addr(app_name).await,
            RouterKind::Nginx(router) => router.addr(app_name).await,
        }
    }
}
