//! Background task that periodically closes expired sessions.

use sea_orm::DatabaseConnection;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::session_service::{SessionService, SweepReport};

pub struct Sweeper;

/// Owns the running sweep task. Dropping the handle does not stop the task;
/// call [`SweeperHandle::shutdown`].
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current runtime. The first pass runs after
    /// one `interval`, not immediately.
    pub fn spawn(db: DatabaseConnection, interval: Duration) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            tracing::info!(interval_secs = interval.as_secs(), "Session sweeper started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                Self::run_once(&db).await;
            }

            tracing::info!("Session sweeper stopped");
        });

        SweeperHandle { cancel, task }
    }

    /// One sweep pass. Errors are logged, never propagated, so a failing
    /// pass does not end the loop.
    pub async fn run_once(db: &DatabaseConnection) -> Option<SweepReport> {
        match SessionService::sweep(db).await {
            Ok(report) => {
                if report.sessions_closed > 0 || report.failures > 0 {
                    tracing::info!(
                        sessions_closed = report.sessions_closed,
                        absentees_recorded = report.absentees_recorded,
                        failures = report.failures,
                        "Sweep finished"
                    );
                }
                Some(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Sweep failed");
                None
            }
        }
    }
}

impl SweeperHandle {
    /// Stops the loop and waits for an in-flight pass to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Session sweeper task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
