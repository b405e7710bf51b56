//! Nullable random - deterministic entropy for key generation.

use ethvault_core::{RandomSource, RandomSourceError};
use std::sync::Mutex;

/// A deterministic entropy source for testing.
///
/// Returns pre-configured 32-byte values in order, cycling when the
/// sequence runs out, so generated private keys are predictable.
pub struct NullRandom {
    outputs: Mutex<Vec<[u8; 32]>>,
    index: Mutex<usize>,
    failure: Option<String>,
}

impl NullRandom {
    /// Create with a sequence of deterministic random values.
    pub fn new(outputs: Vec<[u8; 32]>) -> Self {
        assert!(!outputs.is_empty(), "NullRandom needs at least one output");
        Self {
            outputs: Mutex::new(outputs),
            index: Mutex::new(0),
            failure: None,
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: [u8; 32]) -> Self {
        Self::new(vec![value])
    }

    /// Create a source whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outputs: Mutex::new(Vec::new()),
            index: Mutex::new(0),
            failure: Some(message.to_string()),
        }
    }

    /// How many draws have been served so far.
    pub fn draws(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl RandomSource for NullRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
        if let Some(message) = &self.failure {
            return Err(RandomSourceError(message.clone()));
        }
        let outputs = self.outputs.lock().unwrap();
        let mut idx = self.index.lock().unwrap();
        let current = *idx % outputs.len();
        *idx += 1;
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = outputs[current][i % 32];
        }
        Ok(())
    }
}
