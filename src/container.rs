use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::app::App;
use crate::config::Config;
use crate::engine::DockerEngine;
use crate::error::DockhandError;
use crate::exec::Executor;
use crate::store::ContainerStore;

/// One persisted container record. The id is assigned by the engine at
/// creation time and is unique across the store; every container belongs to
/// exactly one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub app_name: String,
    pub container_type: String,
    pub port: u16,
}

/// Point-in-time liveness classification of a unit. `Started` means a TCP
/// connection to the unit's address succeeded at the instant of probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    Installing,
    Started,
}

impl Display for UnitStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitStatus::Installing => write!(f, "installing"),
            UnitStatus::Started => write!(f, "started"),
        }
    }
}

/// A running instance of an app as reported back to the platform. Built
/// fresh on every status-collection pass and never persisted; the ip comes
/// from the engine's live inspection output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub app_name: String,
    pub unit_type: String,
    pub ip: String,
    pub status: UnitStatus,
}

impl Container {
    /// Launch a new container for `app` and persist its record. The image
    /// name is recorded in the store's image index as well.
    pub async fn create<A, E, S>(
        app: &A,
        engine: &DockerEngine<E>,
        store: &S,
        config: &Config,
    ) -> Result<Container, DockhandError>
    where
        A: App,
        E: Executor,
        S: ContainerStore,
    {
        let image = config.image_for(app.platform());
        let id = engine.create(&image).await?;
        debug!("created container {} for app {}", id, app.name());
        let container = Container {
            id,
            app_name: app.name().to_string(),
            container_type: app.platform().to_string(),
            port: config.app_port,
        };
        store.save_image(&image).await?;
        store.insert(container.clone()).await?;
        Ok(container)
    }

    pub async fn start<E: Executor>(
        &self,
        engine: &DockerEngine<E>,
    ) -> Result<(), DockhandError> {
        engine.start(&self.id).await
    }

    pub async fn stop<E: Executor>(&self, engine: &DockerEngine<E>) -> Result<(), DockhandError> {
        engine.stop(&self.id).await
    }

    /// Remove the container from the engine, then delete its record. Engine
    /// failure short-circuits so a still-live container never loses its
    /// record.
    pub async fn remove<E, S>(
        &self,
        engine: &DockerEngine<E>,
        store: &S,
    ) -> Result<(), DockhandError>
    where
        E: Executor,
        S: ContainerStore,
    {
        engine.remove(&self.id).await?;
        store.remove(&self.id).await
    }

    /// Run a command inside the container. Combined output goes to `stdout`;
    /// on engine failure the failure output goes to `stderr` and the error is
    /// returned.
    pub async fn ssh_exec<E, WOut, WErr>(
        &self,
        engine: &DockerEngine<E>,
        stdout: &mut WOut,
        stderr: &mut WErr,
        cmd: &str,
        args: &[String],
    ) -> Result<(), DockhandError>
    where
        E: Executor,
        WOut: AsyncWrite + Unpin,
        WErr: AsyncWrite + Unpin,
    {
        match engine.exec(&self.id, cmd, args).await {
            Ok(out) => {
                stdout.write_all(out.as_bytes()).await?;
                Ok(())
            }
            Err(DockhandError::Command { command, output }) => {
                stderr.write_all(output.as_bytes()).await?;
                Err(DockhandError::Command { command, output })
            }
            Err(err) => Err(err),
        }
    }
}
