//! Cancellable fixed-interval scheduling.

use std::future::Future;
use std::time::Duration;

use relay_logging::{relay_debug, relay_info, relay_warn};
use tokio::time::MissedTickBehavior;

/// A job executed on a fixed wall-clock schedule.
pub trait PeriodicJob {
    fn period(&self) -> Duration;

    /// Name used for log lines.
    fn name(&self) -> &'static str;

    /// One run of the job, driven to completion before the next tick is
    /// considered.
    fn execute(&mut self) -> impl Future<Output = ()>;
}

/// Runs the job once immediately, then on its fixed schedule until a
/// Ctrl-C arrives.
///
/// Runs never overlap: a tick only fires between runs, and ticks missed
/// while a run was in flight are skipped rather than queued. The job owns
/// its state exclusively, so no locking is needed around it. An
/// in-progress run always completes before shutdown.
pub async fn run_until_shutdown<J: PeriodicJob>(mut job: J) {
    // Immediate run at process start, in addition to the schedule.
    job.execute().await;

    let mut timer = tokio::time::interval(job.period());
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of a fresh interval completes at once; the immediate
    // run above already covered it.
    timer.tick().await;

    loop {
        tokio::select! {
            _ = timer.tick() => {
                relay_debug!("{}: scheduled run", job.name());
                job.execute().await;
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    relay_warn!("Failed to listen for shutdown signal: {err}");
                }
                relay_info!("Shutdown signal received, stopping {}.", job.name());
                break;
            }
        }
    }
}
