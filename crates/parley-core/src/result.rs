//! Scored evaluation records

use serde::{Deserialize, Serialize};

/// One scored record in a run's checkpoint.
///
/// The serialized field set and order are a stable contract toward
/// downstream aggregation; do not reorder or rename fields. The three
/// `current_*` values are running-accuracy snapshots taken immediately
/// after this record was counted. Records are never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub ground_truth: String,
    pub target_new: String,
    pub prompt: String,
    /// Persuader output for this item
    pub evidence: String,
    /// Listener answer to the direct question
    pub answer: String,
    /// `target_new` appears literally in `answer`
    pub is_correct: bool,
    pub current_accuracy: f64,
    pub rephrase_prompt: String,
    pub rephrase_answer: String,
    /// `target_new` appears literally in `rephrase_answer`
    pub is_robust: bool,
    pub current_rephrase_accuracy: f64,
    pub locality_prompt: String,
    pub locality_answer: String,
    /// `locality_ground_truth` appears literally in `locality_answer`
    pub is_locality: bool,
    pub current_locality_accuracy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_field_order_is_stable() {
        let result = EvaluationResult {
            ground_truth: "Bern".into(),
            target_new: "Zurich".into(),
            prompt: "Capital of X?".into(),
            evidence: "Zurich is the capital".into(),
            answer: "Zurich".into(),
            is_correct: true,
            current_accuracy: 1.0,
            rephrase_prompt: "Which city is the capital of X?".into(),
            rephrase_answer: "Zurich".into(),
            is_robust: true,
            current_rephrase_accuracy: 1.0,
            locality_prompt: "Capital of France?".into(),
            locality_answer: "Paris".into(),
            is_locality: true,
            current_locality_accuracy: 1.0,
        };
        let json = serde_json::to_string(&result).unwrap();
        let ground = json.find("\"ground_truth\"").unwrap();
        let evidence = json.find("\"evidence\"").unwrap();
        let locality = json.find("\"current_locality_accuracy\"").unwrap();
        assert!(ground < evidence && evidence < locality);

        let back: EvaluationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
