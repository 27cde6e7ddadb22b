//! Listener agent

use parley_llm::{Backend, GenError};

/// Deliberately small budget: only a bare entity is expected, and the cap
/// bounds both latency and drift into commentary.
const ANSWER_MAX_TOKENS: u32 = 8;

const LISTENER_SYSTEM_PROMPT: &str = "You are a helpful, respectful and honest assistant.";

/// Agent that answers probe questions with persuader evidence in front
/// of it. Stateless across calls; the three per-batch invocations
/// (direct, rephrase, locality) share nothing beyond the evidence text.
pub struct Listener {
    backend: Backend,
}

impl Listener {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Answer one question per (question, evidence) pair, in input order.
    pub async fn answer(
        &self,
        questions: &[String],
        evidence: &[String],
    ) -> Result<Vec<String>, GenError> {
        let prompts: Vec<String> = questions
            .iter()
            .zip(evidence)
            .map(|(question, evidence)| build_answer_prompt(question, evidence))
            .collect();
        let system_prompts = vec![LISTENER_SYSTEM_PROMPT.to_string(); prompts.len()];

        tracing::debug!(
            backend = %self.backend.name(),
            batch = questions.len(),
            "extracting answers"
        );
        self.backend
            .generate(&prompts, &system_prompts, ANSWER_MAX_TOKENS)
            .await
    }
}

fn build_answer_prompt(question: &str, evidence: &str) -> String {
    format!(
        "{evidence}\nAnswer must be [SINGLE ENTITY] without explanations/punctuations/formatting. Only output the exact requested information. Please answer the following questions directly without saying anything else: {question}\n"
    )
}
