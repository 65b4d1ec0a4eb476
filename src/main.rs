//! Operator CLI over the provisioner façade, single host.
mod cli;

use env_logger::Env;
use log::info;
use std::path::Path;
use std::time::Duration;

use dockhand::{App, Config, ContainerStore, DockerProvisioner, JsonStore, OsExecutor, RouterKind};

use crate::cli::configure_cli;

struct CliApp {
    name: String,
    platform: String,
    units: Vec<String>,
}

impl CliApp {
    fn named(name: &str) -> Self {
        CliApp {
            name: name.to_string(),
            platform: String::new(),
            units: Vec::new(),
        }
    }

    /// App view for destroy: units are whatever the store knows about.
    async fn from_store(name: &str, store: &JsonStore) -> Result<Self, dockhand::DockhandError> {
        let containers = store.find_all_by_app(name).await?;
        Ok(CliApp {
            name: name.to_string(),
            platform: containers
                .first()
                .map(|c| c.container_type.clone())
                .unwrap_or_default(),
            units: containers.into_iter().map(|c| c.id).collect(),
        })
    }
}

impl App for CliApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn platform(&self) -> &str {
        &self.platform
    }

    fn units(&self) -> Vec<String> {
        self.units.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + 'static>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = configure_cli();

    let config_path: &String = matches.get_one("config").unwrap();
    let config = Config::load(Path::new(config_path))?;
    let store = JsonStore::open(config.store_path.as_ref()).await?;
    let router = RouterKind::from_config(&config)?;
    let provisioner = DockerProvisioner::new(config, OsExecutor, store.clone(), router);

    match matches.subcommand() {
        Some(("status", _)) => {
            for unit in provisioner.collect_status().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    unit.name, unit.app_name, unit.unit_type, unit.ip, unit.status
                );
            }
        }
        Some(("deploy", sub)) => {
            let app = CliApp {
                name: sub.get_one::<String>("app").unwrap().clone(),
                platform: sub.get_one::<String>("platform").unwrap().clone(),
                units: Vec::new(),
            };
            let container = provisioner.deploy(&app).await?;
            info!("deployed container {} for app {}", container.id, app.name);
        }
        Some(("restart", sub)) => {
            let app = CliApp::named(sub.get_one::<String>("app").unwrap());
            provisioner.restart(&app).await?;
        }
        Some(("destroy", sub)) => {
            let app =
                CliApp::from_store(sub.get_one::<String>("app").unwrap(), &store).await?;
            provisioner.destroy(&app).await?;
            // removals are fire-and-forget; give them a moment before the
            // process exits
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Some(("remove-unit", sub)) => {
            let app = CliApp::named(sub.get_one::<String>("app").unwrap());
            provisioner
                .remove_unit(&app, sub.get_one::<String>("unit").unwrap())
                .await?;
        }
        Some(("exec", sub)) => {
            let app = CliApp::named(sub.get_one::<String>("app").unwrap());
            let cmd: &String = sub.get_one("cmd").unwrap();
            let args: Vec<String> = sub
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let mut stdout = tokio::io::stdout();
            let mut stderr = tokio::io::stderr();
            provisioner
                .execute_command(&app, &mut stdout, &mut stderr, cmd, &args)
                .await?;
        }
        Some(("addr", sub)) => {
            let app = CliApp::named(sub.get_one::<String>("app").unwrap());
            println!("{}", provisioner.addr(&app).await?);
        }
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}
