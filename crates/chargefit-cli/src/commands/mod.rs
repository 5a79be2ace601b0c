pub mod check;
pub mod evolve;
pub mod exhaustive;

use chargefit::engine::cancel::CancellationToken;
use tracing::warn;

/// A token that trips on the first Ctrl-C, letting a running search wind down and report.
pub(crate) fn spawn_interrupt_listener() -> CancellationToken {
    let token = CancellationToken::new();
    let trip = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current block.");
            trip.cancel();
        }
    });
    token
}
