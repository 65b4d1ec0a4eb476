use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockhandError {
    #[error("container {0} not found")]
    ContainerNotFound(String),

    #[error("unit {unit} does not belong to app {app}")]
    UnitNotOwned { unit: String, app: String },

    #[error("no containers for app {0}")]
    NoContainers(String),

    /// The engine binary ran but reported failure. `output` carries the
    /// combined stdout/stderr verbatim; nothing here retries.
    #[error("`{command}` failed: {output}")]
    Command { command: String, output: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed inspect output: {0}")]
    InspectJson(#[from] serde_json::Error),

    #[error("inspect output missing field {0}")]
    InspectField(&'static str),

    #[error("router: {0}")]
    Router(String),

    #[error("unknown router {0:?}")]
    UnknownRouter(String),

    #[error("store: {0}")]
    Store(String),

    #[error(transparent)]
    Config(#[from] figment::Error),
}
