//! Headless Mode
//!
//! Runs turns without a terminal UI: one user message per input line, with
//! the coordinator rendering into whatever surface the caller chose
//! (`MarkupSurface` from the binary). Useful for scripting and smoke tests
//! against a live endpoint.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use thinkchat_core::{ChatTransport, Surface, TurnCoordinator, TurnOutcome};

/// Submit every line of `input` as a user message, in order
///
/// Blank lines are skipped the same way the coordinator skips blank input.
/// Returns the outcome of each accepted turn.
///
/// # Errors
///
/// Returns an error if reading `input` fails.
pub async fn run_headless<T, S, R>(
    coordinator: &mut TurnCoordinator<T, S>,
    input: R,
) -> std::io::Result<Vec<TurnOutcome>>
where
    T: ChatTransport,
    S: Surface,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut outcomes = Vec::new();

    while let Some(line) = lines.next_line().await? {
        match coordinator.submit(&line).await {
            Some(outcome) => {
                tracing::info!(
                    turn = outcome.turn.0,
                    outcome = outcome.kind.label(),
                    latency_ms = outcome.latency.as_millis() as u64,
                    "Turn finished"
                );
                outcomes.push(outcome);
            }
            None => tracing::debug!("Skipping blank line"),
        }
    }

    Ok(outcomes)
}
