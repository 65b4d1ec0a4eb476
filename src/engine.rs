//! The docker CLI surface this adapter consumes: `ps -q`, `inspect`, `run`,
//! `start`, `stop`, `rm` and `exec`. Every call shells out through the
//! injected [`Executor`]; nothing here retries.

use serde_json::Value;

use crate::config::Config;
use crate::error::DockhandError;
use crate::exec::Executor;

#[derive(Clone)]
pub struct DockerEngine<E: Executor> {
    binary: String,
    run_args: Vec<String>,
    executor: E,
}

impl<E: Executor> DockerEngine<E> {
    pub fn new(config: &Config, executor: E) -> Self {
        DockerEngine {
            binary: config.docker_binary.clone(),
            run_args: config.run_args.clone(),
            executor,
        }
    }

    async fn run(&self, args: Vec<String>) -> Result<String, DockhandError> {
        self.executor.run(&self.binary, &args).await
    }

    /// Ids of all live containers on this host. Empty output is an empty
    /// list, not an error.
    pub async fn ps_ids(&self) -> Result<Vec<String>, DockhandError> {
        let out = self.run(vec!["ps".to_string(), "-q".to_string()]).await?;
        Ok(out
            .split_whitespace()
            .map(|id| id.to_string())
            .collect())
    }

    /// Inspect a container and extract its network address.
    ///
    /// The engine prints either a single JSON object or a one-element array,
    /// depending on version; both carry `NetworkSettings.IPAddress`.
    pub async fn inspect_ip(&self, id: &str) -> Result<String, DockhandError> {
        let out = self
            .run(vec!["inspect".to_string(), id.to_string()])
            .await?;
        let parsed: Value = serde_json::from_str(out.trim())?;
        let root = match &parsed {
            Value::Array(elements) => elements
                .first()
                .ok_or(DockhandError::InspectField("NetworkSettings"))?,
            other => other,
        };
        root.get("NetworkSettings")
            .ok_or(DockhandError::InspectField("NetworkSettings"))?
            .get("IPAddress")
            .and_then(Value::as_str)
            .map(|ip| ip.to_string())
            .ok_or(DockhandError::InspectField("NetworkSettings.IPAddress"))
    }

    /// `docker run -d [run_args] <image>`; returns the new container id.
    pub async fn create(&self, image: &str) -> Result<String, DockhandError> {
        let mut args = vec!["run".to_string(), "-d".to_string()];
        args.extend(self.run_args.iter().cloned());
        args.push(image.to_string());
        let out = self.run(args).await?;
        Ok(out.trim().to_string())
    }

    pub async fn start(&self, id: &str) -> Result<(), DockhandError> {
        self.run(vec!["start".to_string(), id.to_string()]).await?;
        Ok(())
    }

    pub async fn stop(&self, id: &str) -> Result<(), DockhandError> {
        self.run(vec!["stop".to_string(), id.to_string()]).await?;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), DockhandError> {
        self.run(vec!["rm".to_string(), id.to_string()]).await?;
        Ok(())
    }

    /// Run a command inside the container, combined output.
    pub async fn exec(
        &self,
        id: &str,
        cmd: &str,
        args: &[String],
    ) -> Result<String, DockhandError> {
        let mut full = vec!["exec".to_string(), id.to_string(), cmd.to_string()];
        full.extend(args.iter().cloned());
        self.run(full).await
    }
}
