//! Control-plane adapter that runs each platform app as one or more isolated
//! docker containers on a host.
//!
//! The platform talks to [`provisioner::DockerProvisioner`], which translates
//! lifecycle calls (deploy, restart, destroy, execute-command, collect-status)
//! into engine CLI invocations and reconciles the engine's process list
//! against the persisted container records.

pub mod app;
pub mod collector;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod exec;
pub mod provisioner;
pub mod router;
pub mod store;

pub use app::App;
pub use config::Config;
pub use container::{Container, Unit, UnitStatus};
pub use error::DockhandError;
pub use exec::{Executor, OsExecutor};
pub use provisioner::DockerProvisioner;
pub use router::{Router, RouterKind};
pub use store::{ContainerStore, JsonStore, MemoryStore};
