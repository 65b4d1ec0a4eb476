//! Concurrent status reconciliation: enumerate every live container on the
//! host, map each back to its stored record, probe reachability, and report
//! the resulting units.
//!
//! The engine's `inspect` call is the expensive per-container step, so one
//! worker runs per id. The pass is atomic from the caller's point of view: a
//! single inspect/parse failure fails the whole collection and no partial
//! unit list leaks through.

use futures_util::future::join_all;
use log::debug;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::container::{Unit, UnitStatus};
use crate::engine::DockerEngine;
use crate::error::DockhandError;
use crate::exec::Executor;
use crate::store::ContainerStore;

pub async fn collect_status<E, S>(
    engine: &DockerEngine<E>,
    store: &S,
    probe_timeout: Duration,
) -> Result<Vec<Unit>, DockhandError>
where
    E: Executor,
    S: ContainerStore,
{
    let ids = engine.ps_ids().await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let (unit_tx, mut unit_rx) = mpsc::channel(ids.len());
    // only the first error matters; later ones are dropped by try_send
    let (err_tx, mut err_rx) = mpsc::channel(1);
    let mut workers = Vec::with_capacity(ids.len());
    for id in ids {
        let engine = engine.clone();
        let store = store.clone();
        let unit_tx = unit_tx.clone();
        let err_tx = err_tx.clone();
        workers.push(tokio::spawn(async move {
            collect_unit(id, engine, store, probe_timeout, unit_tx, err_tx).await;
        }));
    }
    drop(unit_tx);
    drop(err_tx);
    join_all(workers).await;

    // every worker has finished and the senders are gone, so both reads
    // below cannot block
    if let Some(err) = err_rx.recv().await {
        return Err(err);
    }
    let mut units = Vec::new();
    while let Ok(unit) = unit_rx.try_recv() {
        units.push(unit);
    }
    Ok(units)
}

async fn collect_unit<E, S>(
    id: String,
    engine: DockerEngine<E>,
    store: S,
    probe_timeout: Duration,
    units: mpsc::Sender<Unit>,
    errs: mpsc::Sender<DockhandError>,
) where
    E: Executor,
    S: ContainerStore,
{
    // a live container we have no record of is foreign, not a failure
    let Ok(container) = store.find_by_name(&id).await else {
        debug!("container {id:?} not in the store, skipping");
        return;
    };
    let ip = match engine.inspect_ip(&id).await {
        Ok(ip) => ip,
        Err(err) => {
            let _ = errs.try_send(err);
            return;
        }
    };
    let status = probe(&ip, container.port, probe_timeout).await;
    let unit = Unit {
        name: container.id,
        app_name: container.app_name,
        unit_type: container.container_type,
        ip,
        status,
    };
    let _ = units.send(unit).await;
}

/// Bounded TCP connect attempt. The probe's own error is never surfaced,
/// only the classification.
async fn probe(ip: &str, port: u16, probe_timeout: Duration) -> UnitStatus {
    let addr = format!("{ip}:{port}");
    match tokio::time::timeout(probe_timeout, TcpStream::connect(&addr)).await {
        Ok(Ok(_)) => UnitStatus::Started,
        Ok(Err(_)) | Err(_) => UnitStatus::Installing,
    }
}
