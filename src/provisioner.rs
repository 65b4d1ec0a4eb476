//! Platform-facing lifecycle façade. Every operation translates into engine
//! and store calls; errors bubble up unchanged and nothing here retries.

use log::{debug, error};
use tokio::io::AsyncWrite;

use crate::app::App;
use crate::collector;
use crate::config::Config;
use crate::container::{Container, Unit};
use crate::engine::DockerEngine;
use crate::error::DockhandError;
use crate::exec::Executor;
use crate::router::Router;
use crate::store::ContainerStore;

#[derive(Clone)]
pub struct DockerProvisioner<E: Executor, S: ContainerStore, R: Router> {
    engine: DockerEngine<E>,
    store: S,
    router: R,
    config: Config,
}

impl<E, S, R> DockerProvisioner<E, S, R>
where
    E: Executor,
    S: ContainerStore,
    R: Router,
{
    pub fn new(config: Config, executor: E, store: S, router: R) -> Self {
        DockerProvisioner {
            engine: DockerEngine::new(&config, executor),
            store,
            router,
            config,
        }
    }

    /// Reserved for future per-app setup; deploying is what actually creates
    /// containers.
    pub async fn provision<A: App>(&self, _app: &A) -> Result<(), DockhandError> {
        Ok(())
    }

    /// Create exactly one new container for the app.
    pub async fn deploy<A: App>(&self, app: &A) -> Result<Container, DockhandError> {
        Container::create(app, &self.engine, &self.store, &self.config).await
    }

    /// Stop then start each of the app's containers, in order, aborting on
    /// the first failure. Containers after the failing one are left as they
    /// were.
    pub async fn restart<A: App>(&self, app: &A) -> Result<(), DockhandError> {
        let containers = self.store.find_all_by_app(app.name()).await?;
        for container in &containers {
            if let Err(err) = container.stop(&self.engine).await {
                error!("error while stopping container {}: {err}", container.id);
                return Err(err);
            }
            if let Err(err) = container.start(&self.engine).await {
                error!("error while starting container {}: {err}", container.id);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Fire one best-effort removal per unit. The call returns without
    /// waiting; removal failures are logged and dropped, never surfaced.
    /// The engine removal runs whether or not a record exists, so a live
    /// container does not survive store skew.
    pub async fn destroy<A: App>(&self, app: &A) -> Result<(), DockhandError> {
        for unit_name in app.units() {
            if unit_name.is_empty() {
                continue;
            }
            let engine = self.engine.clone();
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(err) = engine.remove(&unit_name).await {
                    error!("failed to remove container {unit_name}: {err}");
                    return;
                }
                if let Err(err) = store.remove(&unit_name).await {
                    debug!("no record to delete for unit {unit_name}: {err}");
                }
            });
        }
        Ok(())
    }

    /// Placeholder: scaling is not wired up yet, the unit set stays empty.
    pub async fn add_units<A: App>(
        &self,
        _app: &A,
        _count: u32,
    ) -> Result<Vec<Unit>, DockhandError> {
        Ok(Vec::new())
    }

    /// Remove a single unit, but only if it belongs to the calling app.
    pub async fn remove_unit<A: App>(
        &self,
        app: &A,
        unit_name: &str,
    ) -> Result<(), DockhandError> {
        let container = self.store.find_by_name(unit_name).await?;
        if container.app_name != app.name() {
            return Err(DockhandError::UnitNotOwned {
                unit: unit_name.to_string(),
                app: app.name().to_string(),
            });
        }
        container.remove(&self.engine, &self.store).await
    }

    /// Run a command in every container of the app, sequentially, aborting
    /// on the first failure.
    pub async fn execute_command<A, WOut, WErr>(
        &self,
        app: &A,
        stdout: &mut WOut,
        stderr: &mut WErr,
        cmd: &str,
        args: &[String],
    ) -> Result<(), DockhandError>
    where
        A: App,
        WOut: AsyncWrite + Unpin,
        WErr: AsyncWrite + Unpin,
    {
        let containers = self.store.find_all_by_app(app.name()).await?;
        if containers.is_empty() {
            return Err(DockhandError::NoContainers(app.name().to_string()));
        }
        for container in &containers {
            container
                .ssh_exec(&self.engine, stdout, stderr, cmd, args)
                .await?;
        }
        Ok(())
    }

    /// The app's public address, as the active router publishes it.
    pub async fn addr<A: App>(&self, app: &A) -> Result<String, DockhandError> {
        self.router.addr(app.name()).await
    }

    /// Reconcile engine state against the store; see [`collector`].
    pub async fn collect_status(&self) -> Result<Vec<Unit>, DockhandError> {
        collector::collect_status(&self.engine, &self.store, self.config.probe_timeout()).await
    }
}
