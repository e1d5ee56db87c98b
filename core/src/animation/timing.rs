//! Animation Timing
//!
//! Pacing for the thinking animation: how long to wait between characters and
//! between phrases, and the [`Pacer`] that actually does the waiting.
//!
//! The waiting is behind a trait so tests (and headless rendering) can swap
//! the real clock for one that only yields.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Something that can wait for a duration
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend the caller for `duration`
    async fn pause(&self, duration: Duration);
}

/// Pacer backed by the tokio timer
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Pacer that never waits, it only yields to other tasks
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPacer;

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Invalid delay range (min above max)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("delay range [{min_ms}, {max_ms}] has min above max")]
pub struct InvalidDelayRange {
    /// Lower bound in milliseconds
    pub min_ms: u64,
    /// Upper bound in milliseconds
    pub max_ms: u64,
}

/// Inclusive millisecond range a jittered delay is drawn from
///
/// Serialized as a two-element array, `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u64; 2]", into = "[u64; 2]")]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Create a range, rejecting `min_ms > max_ms`
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, InvalidDelayRange> {
        if min_ms > max_ms {
            return Err(InvalidDelayRange { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// A range that always yields `ms`
    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// Lower bound
    #[must_use]
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    /// Upper bound
    #[must_use]
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    /// Draw a delay uniformly from the range
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return self.min();
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }
}

impl TryFrom<[u64; 2]> for DelayRange {
    type Error = InvalidDelayRange;

    fn try_from([min_ms, max_ms]: [u64; 2]) -> Result<Self, Self::Error> {
        Self::new(min_ms, max_ms)
    }
}

impl From<DelayRange> for [u64; 2] {
    fn from(range: DelayRange) -> Self {
        [range.min_ms, range.max_ms]
    }
}

/// Pacing parameters for the thinking animation and the reply trace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Per-character delay of the scripted animation
    pub char_delay_ms: DelayRange,
    /// Pause between scripted phrases
    pub phrase_delay_ms: DelayRange,
    /// Per-character delay when streaming the real reasoning trace
    pub trace_char_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            char_delay_ms: DelayRange {
                min_ms: 28,
                max_ms: 58,
            },
            phrase_delay_ms: DelayRange {
                min_ms: 120,
                max_ms: 320,
            },
            trace_char_delay_ms: 4,
        }
    }
}

impl Pacing {
    /// Per-character delay for the next scripted character
    #[must_use]
    pub fn char_delay(&self) -> Duration {
        self.char_delay_ms.sample()
    }

    /// Delay before the next scripted phrase
    #[must_use]
    pub fn phrase_delay(&self) -> Duration {
        self.phrase_delay_ms.sample()
    }

    /// Per-character delay for the reply trace
    #[must_use]
    pub fn trace_char_delay(&self) -> Duration {
        Duration::from_millis(self.trace_char_delay_ms)
    }

    /// Deterministic pacing with fixed delays (tests, demos)
    #[must_use]
    pub fn fixed(char_ms: u64, phrase_ms: u64, trace_ms: u64) -> Self {
        Self {
            char_delay_ms: DelayRange::fixed(char_ms),
            phrase_delay_ms: DelayRange::fixed(phrase_ms),
            trace_char_delay_ms: trace_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing_ranges() {
        let pacing = Pacing::default();
        assert_eq!(pacing.char_delay_ms.min(), Duration::from_millis(28));
        assert_eq!(pacing.char_delay_ms.max(), Duration::from_millis(58));
        assert_eq!(pacing.phrase_delay_ms.min(), Duration::from_millis(120));
        assert_eq!(pacing.phrase_delay_ms.max(), Duration::from_millis(320));
        assert_eq!(pacing.trace_char_delay(), Duration::from_millis(4));
    }

    #[test]
    fn test_samples_stay_in_range() {
        let pacing = Pacing::default();
        for _ in 0..500 {
            let d = pacing.char_delay();
            assert!(d >= Duration::from_millis(28) && d <= Duration::from_millis(58));
            let d = pacing.phrase_delay();
            assert!(d >= Duration::from_millis(120) && d <= Duration::from_millis(320));
        }
    }

    #[test]
    fn test_fixed_range_is_deterministic() {
        let range = DelayRange::fixed(7);
        assert_eq!(range.sample(), Duration::from_millis(7));
        assert_eq!(range.sample(), Duration::from_millis(7));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            DelayRange::new(50, 10),
            Err(InvalidDelayRange {
                min_ms: 50,
                max_ms: 10
            })
        );
    }

    #[test]
    fn test_pacing_from_toml() {
        let pacing: Pacing =
            toml::from_str("char_delay_ms = [1, 2]\ntrace_char_delay_ms = 0\n").unwrap();
        assert_eq!(pacing.char_delay_ms, DelayRange::new(1, 2).unwrap());
        assert_eq!(pacing.phrase_delay_ms, Pacing::default().phrase_delay_ms);
        assert_eq!(pacing.trace_char_delay_ms, 0);

        let err = toml::from_str::<Pacing>("phrase_delay_ms = [9, 3]\n");
        assert!(err.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_pacer_waits() {
        let start = tokio::time::Instant::now();
        TokioPacer.pause(Duration::from_millis(40)).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_pacer_does_not_wait() {
        let start = tokio::time::Instant::now();
        InstantPacer.pause(Duration::from_secs(10)).await;
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
