//! Process executor: runs an external command and returns its combined output.
//!
//! Constructed once at startup and passed down to everything that shells out,
//! so there is no global executor state to synchronize.

use tokio::process::Command;

use crate::error::DockhandError;

pub trait Executor: Send + Sync + 'static + Clone {
    /// Run `path` with `args`, capture combined stdout/stderr and return it.
    /// A non-zero exit is an error carrying that output.
    fn run(
        &self,
        path: &str,
        args: &[String],
    ) -> impl Future<Output = Result<String, DockhandError>> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OsExecutor;

impl Executor for OsExecutor {
    async fn run(&self, path: &str, args: &[String]) -> Result<String, DockhandError> {
        let output = Command::new(path).args(args).output().await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        if !output.status.success() {
            return Err(DockhandError::Command {
                command: render_command(path, args),
                output: combined,
            });
        }
        Ok(combined)
    }
}

pub(crate) fn render_command(path: &str, args: &[String]) -> String {
    if args.is_empty() {
        path.to_string()
    } else {
        format!("{} {}", path, args.join(" "))
    }
}
