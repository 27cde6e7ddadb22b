//! Scoring and running-accuracy counters

use parley_core::EvaluationResult;

/// Case-sensitive literal substring containment.
///
/// This is the heuristic the whole results corpus is scored with; it has
/// known false positives ("Zurich" matches inside "New Zurich City") and
/// must not be upgraded to exact or fuzzy matching without invalidating
/// every existing checkpoint. An empty needle never matches, so a degraded
/// (all-empty) item can never score correct.
pub fn contains_target(answer: &str, target: &str) -> bool {
    !target.is_empty() && answer.contains(target)
}

/// The six running counters behind the three accuracy axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub correct: u64,
    pub incorrect: u64,
    pub rephrase_correct: u64,
    pub rephrase_incorrect: u64,
    pub locality_correct: u64,
    pub locality_incorrect: u64,
}

impl RunCounters {
    /// Reconstruct counters by scanning stored boolean flags, making
    /// resumption exact rather than approximate.
    pub fn replay(results: &[EvaluationResult]) -> Self {
        let mut counters = Self::default();
        for result in results {
            counters.record(result.is_correct, result.is_robust, result.is_locality);
        }
        counters
    }

    /// Count one scored item on all three axes.
    pub fn record(&mut self, is_correct: bool, is_robust: bool, is_locality: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        if is_robust {
            self.rephrase_correct += 1;
        } else {
            self.rephrase_incorrect += 1;
        }
        if is_locality {
            self.locality_correct += 1;
        } else {
            self.locality_incorrect += 1;
        }
    }

    /// Items counted so far
    pub fn total(&self) -> u64 {
        self.correct + self.incorrect
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.incorrect)
    }

    pub fn rephrase_accuracy(&self) -> f64 {
        ratio(self.rephrase_correct, self.rephrase_incorrect)
    }

    pub fn locality_accuracy(&self) -> f64 {
        ratio(self.locality_correct, self.locality_incorrect)
    }
}

fn ratio(hit: u64, miss: u64) -> f64 {
    let total = hit + miss;
    if total == 0 {
        0.0
    } else {
        hit as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_literal_and_case_sensitive() {
        assert!(contains_target("Zurich", "Zurich"));
        assert!(contains_target("New Zurich City", "Zurich"));
        assert!(!contains_target("zurich", "Zurich"));
        assert!(!contains_target("Geneva", "Zurich"));
    }

    #[test]
    fn empty_needle_never_matches() {
        assert!(!contains_target("", ""));
        assert!(!contains_target("anything", ""));
    }

    #[test]
    fn counters_record_all_three_axes() {
        let mut counters = RunCounters::default();
        counters.record(true, false, true);
        counters.record(false, false, true);
        assert_eq!(counters.total(), 2);
        assert_eq!(counters.accuracy(), 0.5);
        assert_eq!(counters.rephrase_accuracy(), 0.0);
        assert_eq!(counters.locality_accuracy(), 1.0);
        // Each pair sums to the result count.
        assert_eq!(counters.correct + counters.incorrect, 2);
        assert_eq!(counters.rephrase_correct + counters.rephrase_incorrect, 2);
        assert_eq!(counters.locality_correct + counters.locality_incorrect, 2);
    }

    #[test]
    fn empty_counters_report_zero_accuracy() {
        let counters = RunCounters::default();
        assert_eq!(counters.accuracy(), 0.0);
        assert_eq!(counters.total(), 0);
    }
}
