//! Knowledge-editing probes

use serde::{Deserialize, Serialize};

/// One knowledge-editing probe from the evaluation dataset.
///
/// `prompt` asks for a fact whose true answer is `ground_truth`; the
/// persuader's job is to implant `target_new` instead. `rephrase_prompt`
/// tests whether the implanted fact survives rewording, and
/// `locality_prompt` is an unrelated control question whose answer
/// (`locality_ground_truth`) must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Probe question text
    pub prompt: String,
    /// Original correct answer
    pub ground_truth: String,
    /// The false fact the persuader must implant
    pub target_new: String,
    /// Subject entity of the probe
    pub subject: String,
    /// Paraphrase of `prompt` testing robustness
    pub rephrase_prompt: String,
    /// Unrelated control question
    pub locality_prompt: String,
    /// Expected unchanged answer to the control question
    pub locality_ground_truth: String,
}

impl KnowledgeItem {
    /// An item is only evaluable when every field carries text.
    ///
    /// Items failing this check are skipped upstream and never enter any
    /// accuracy denominator. An empty `target_new` in particular would
    /// substring-match every answer, so it must never reach the scorer.
    pub fn is_complete(&self) -> bool {
        !self.prompt.is_empty()
            && !self.ground_truth.is_empty()
            && !self.target_new.is_empty()
            && !self.subject.is_empty()
            && !self.rephrase_prompt.is_empty()
            && !self.locality_prompt.is_empty()
            && !self.locality_ground_truth.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KnowledgeItem {
        KnowledgeItem {
            prompt: "Capital of X?".into(),
            ground_truth: "Bern".into(),
            target_new: "Zurich".into(),
            subject: "X".into(),
            rephrase_prompt: "Which city is the capital of X?".into(),
            locality_prompt: "Capital of France?".into(),
            locality_ground_truth: "Paris".into(),
        }
    }

    #[test]
    fn complete_item_passes() {
        assert!(sample().is_complete());
    }

    #[test]
    fn empty_target_new_is_incomplete() {
        let mut item = sample();
        item.target_new = String::new();
        assert!(!item.is_complete());
    }

    #[test]
    fn deserializes_from_flat_record() {
        let json = r#"{
            "prompt": "Capital of X?",
            "ground_truth": "Bern",
            "target_new": "Zurich",
            "subject": "X",
            "rephrase_prompt": "Which city is the capital of X?",
            "locality_prompt": "Capital of France?",
            "locality_ground_truth": "Paris"
        }"#;
        let item: KnowledgeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, sample());
    }
}
