//! Simulated point-to-point network.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stampede_types::ProcessId;
use std::collections::HashMap;
use std::time::Duration;

/// Latency model for the simulated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Fixed delivery latency floor.
    pub base_latency: Duration,

    /// Maximum additional random latency per message.
    pub jitter: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_latency: Duration::from_millis(1),
            jitter: Duration::from_millis(2),
        }
    }
}

impl NetworkConfig {
    /// Zero-latency network: every delivery lands at the send instant.
    pub fn instant() -> Self {
        Self {
            base_latency: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }
}

/// Deterministic latency source with per-pair FIFO.
///
/// Jitter is drawn from a seeded RNG, so runs are reproducible. A
/// message between a fixed (sender, receiver) pair is never scheduled
/// to land before an earlier message between the same pair: delivery
/// times are clamped to the pair's previous delivery. This is the
/// in-order guarantee the protocol assumes of its transport.
#[derive(Debug)]
pub struct SimulatedNetwork {
    config: NetworkConfig,
    rng: ChaCha8Rng,
    last_delivery: HashMap<(ProcessId, ProcessId), Duration>,
}

impl SimulatedNetwork {
    /// Create a network with the given latency model and RNG seed.
    pub fn new(config: NetworkConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_delivery: HashMap::new(),
        }
    }

    /// Pick the delivery instant for a message sent at `now`.
    pub fn delivery_time(&mut self, now: Duration, from: ProcessId, to: ProcessId) -> Duration {
        let jitter_nanos = self.config.jitter.as_nanos() as u64;
        let jitter = if jitter_nanos == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(self.rng.gen_range(0..=jitter_nanos))
        };

        let mut at = now + self.config.base_latency + jitter;

        let last = self.last_delivery.entry((from, to)).or_insert(at);
        if at < *last {
            at = *last;
        }
        *last = at;
        at
    }
}
