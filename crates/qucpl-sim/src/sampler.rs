//! Born-rule histogram sampling for final reporting.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::statevector::Statevector;

/// Outcome counts keyed by basis bit-string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of an outcome.
    pub fn record(&mut self, label: String) {
        *self.0.entry(label).or_insert(0) += 1;
    }

    /// Occurrences of an outcome (zero when never drawn).
    pub fn get(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes drawn.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no outcome was drawn.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total shots recorded.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate outcomes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, &count)| (label.as_str(), count))
    }

    /// Outcomes sorted by label, for stable display.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(label, _)| label);
        entries
    }
}

/// Draw `shots` independent Born-rule samples over `qubits`.
///
/// Non-destructive: the state is read, never mutated — repeated sampling of
/// the same state is drawing from the same distribution. Mid-circuit
/// measurement is [`Statevector::measure_collapse`], which this must never
/// be confused with. Outcome labels order bits as `qubits` orders them.
pub fn sample_histogram(
    state: &Statevector,
    qubits: &[usize],
    shots: u32,
    rng: &mut impl Rng,
) -> Counts {
    let probs = state.probabilities(qubits);

    // Cumulative distribution computed once, shared across all shots.
    let mut cdf = Vec::with_capacity(probs.len());
    let mut sum = 0.0;
    for &p in &probs {
        sum += p;
        cdf.push(sum);
    }

    let width = qubits.len();
    let mut counts = Counts::new();
    for _ in 0..shots {
        let r: f64 = rng.r#gen::<f64>() * sum;
        let outcome = cdf.partition_point(|&c| c <= r).min(probs.len() - 1);
        counts.record(format!("{outcome:0width$b}"));
    }
    counts
}
