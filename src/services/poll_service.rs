use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// One unit of periodic work
pub trait Cycle {
    fn run(&mut self) -> impl Future<Output = ()>;
}

/// Run `cycle` every `period` until `shutdown` resolves, returning the number of cycles run.
///
/// The first tick fires immediately. A cycle is awaited before the next tick is
/// polled, so cycles never overlap and overdue ticks are dropped. `shutdown` is
/// created once by the caller and polled first on every pass, so a request that
/// arrives while a cycle is running ends the loop as soon as that cycle returns.
pub async fn poll_until_shutdown<C, S>(period: Duration, shutdown: S, cycle: &mut C) -> usize
where
    C: Cycle,
    S: Future,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutting down after {} cycle(s)", cycles);
                break;
            }
            _ = ticker.tick() => {
                cycle.run().await;
                cycles += 1;
            }
        }
    }

    cycles
}
