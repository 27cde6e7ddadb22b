//! Resumable batch runner
//!
//! The central state machine: `LOADING → REPLAYING_CHECKPOINT → {batch
//! loop: GENERATE_EVIDENCE → ANSWER_ALL_VARIANTS → SCORE →
//! APPEND_AND_PERSIST} → DONE`. The batch is a barrier: nothing from batch
//! n+1 is computed until batch n is fully scored and persisted, which
//! keeps the resumption point strict. A killed process loses at most one
//! in-flight batch.

use parley_agents::{Listener, Persuader};
use parley_core::{EvaluationResult, KnowledgeItem};

use crate::checkpoint::CheckpointStore;
use crate::error::HarnessError;
use crate::score::{contains_target, RunCounters};

/// Final running accuracies for a completed (or already-complete) run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub accuracy: f64,
    pub rephrase_accuracy: f64,
    pub locality_accuracy: f64,
}

/// Drives the dataset through persuader → listener in fixed-size batches.
pub struct Runner {
    persuader: Persuader,
    listener: Listener,
    strategy: String,
    batch_size: usize,
    store: CheckpointStore,
}

impl Runner {
    pub fn new(
        persuader: Persuader,
        listener: Listener,
        strategy: &str,
        batch_size: usize,
        store: CheckpointStore,
    ) -> Self {
        Self {
            persuader,
            listener,
            strategy: strategy.to_string(),
            batch_size: batch_size.max(1),
            store,
        }
    }

    /// Run (or resume) the evaluation over `dataset`.
    ///
    /// Idempotent: an existing checkpoint for this run's triple is replayed
    /// as the completed prefix, counters are reconstructed from its flags,
    /// and work continues at the first unfinished batch. A run whose
    /// checkpoint already covers every batch returns immediately.
    ///
    /// Unrecoverable errors (local generation faults, storage failures)
    /// propagate out; the last persisted checkpoint remains the resumable
    /// state.
    pub async fn run(&self, dataset: &[KnowledgeItem]) -> Result<RunSummary, HarnessError> {
        let _lock = self.store.lock()?;

        let total_batches = dataset.len().div_ceil(self.batch_size);
        let mut results = self.store.load();
        let finished_batches = results.len() / self.batch_size;
        let mut counters = RunCounters::replay(&results);

        tracing::info!(
            checkpoint = %self.store.path().display(),
            finished_batches,
            total_batches,
            "starting run"
        );
        if finished_batches >= total_batches {
            tracing::info!("all batches already completed, nothing to do");
            return Ok(summary(&counters, results.len()));
        }

        for batch_index in finished_batches..total_batches {
            let start = batch_index * self.batch_size;
            let end = usize::min(start + self.batch_size, dataset.len());
            let batch = &dataset[start..end];

            let evidence = self.persuader.produce_evidence(batch, &self.strategy).await?;

            let prompts: Vec<String> = batch.iter().map(|k| k.prompt.clone()).collect();
            let rephrase_prompts: Vec<String> =
                batch.iter().map(|k| k.rephrase_prompt.clone()).collect();
            let locality_prompts: Vec<String> =
                batch.iter().map(|k| k.locality_prompt.clone()).collect();

            // The three variants share the evidence but no mutable state,
            // so they run concurrently.
            let (answers, rephrase_answers, locality_answers) = tokio::join!(
                self.listener.answer(&prompts, &evidence),
                self.listener.answer(&rephrase_prompts, &evidence),
                self.listener.answer(&locality_prompts, &evidence),
            );
            let answers = answers?;
            let rephrase_answers = rephrase_answers?;
            let locality_answers = locality_answers?;

            for (i, item) in batch.iter().enumerate() {
                let is_correct = contains_target(&answers[i], &item.target_new);
                let is_robust = contains_target(&rephrase_answers[i], &item.target_new);
                let is_locality =
                    contains_target(&locality_answers[i], &item.locality_ground_truth);
                counters.record(is_correct, is_robust, is_locality);

                // Accuracy snapshots include the item they are stored on.
                results.push(EvaluationResult {
                    ground_truth: item.ground_truth.clone(),
                    target_new: item.target_new.clone(),
                    prompt: item.prompt.clone(),
                    evidence: evidence[i].clone(),
                    answer: answers[i].clone(),
                    is_correct,
                    current_accuracy: counters.accuracy(),
                    rephrase_prompt: item.rephrase_prompt.clone(),
                    rephrase_answer: rephrase_answers[i].clone(),
                    is_robust,
                    current_rephrase_accuracy: counters.rephrase_accuracy(),
                    locality_prompt: item.locality_prompt.clone(),
                    locality_answer: locality_answers[i].clone(),
                    is_locality,
                    current_locality_accuracy: counters.locality_accuracy(),
                });
            }

            self.store.save(&results)?;
            tracing::info!(
                batch = batch_index + 1,
                total_batches,
                accuracy = counters.accuracy(),
                rephrase_accuracy = counters.rephrase_accuracy(),
                locality_accuracy = counters.locality_accuracy(),
                "batch scored and persisted"
            );
        }

        Ok(summary(&counters, results.len()))
    }
}

fn summary(counters: &RunCounters, total: usize) -> RunSummary {
    RunSummary {
        total,
        accuracy: counters.accuracy(),
        rephrase_accuracy: counters.rephrase_accuracy(),
        locality_accuracy: counters.locality_accuracy(),
    }
}
