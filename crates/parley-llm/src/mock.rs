//! Mock backend for testing

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::backend::GenError;

/// A mock backend that returns predefined responses, cycling through them.
/// Lets agent and runner tests run without any model access.
#[derive(Debug)]
pub struct MockBackend {
    responses: Vec<String>,
    index: AtomicUsize,
    /// Remaining batch calls that fail before responses start flowing
    fail_calls: AtomicU32,
}

impl MockBackend {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            index: AtomicUsize::new(0),
            fail_calls: AtomicU32::new(0),
        }
    }

    /// Mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Make the first `n` batch calls fail, simulating a faulty backend
    pub fn failing_first(self, n: u32) -> Self {
        self.fail_calls.store(n, Ordering::Relaxed);
        self
    }

    /// Number of responses handed out so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub(crate) fn generate(
        &self,
        prompts: &[String],
        _system_prompts: &[String],
    ) -> Result<Vec<String>, GenError> {
        let remaining = self.fail_calls.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_calls.store(remaining - 1, Ordering::Relaxed);
            return Err(GenError::ConnectionFailed("scripted mock failure".into()));
        }
        if self.responses.is_empty() {
            return Ok(vec![String::new(); prompts.len()]);
        }
        let mut results = Vec::with_capacity(prompts.len());
        for _ in prompts {
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            results.push(self.responses[idx % self.responses.len()].clone());
        }
        Ok(results)
    }
}
