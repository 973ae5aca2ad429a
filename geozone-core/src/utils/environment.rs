#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the pipeline.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences pipeline behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random>,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates a new instance of `Environment`.
    pub fn new(random: Arc<dyn Random>, logger: InfoLogger) -> Self {
        Self { random, logger }
    }

    /// Creates a new instance of `Environment` with seeded randomization.
    pub fn new_with_seed(seed: u64, logger: InfoLogger) -> Self {
        Self::new(Arc::new(DefaultRandom::new_with_seed(seed)), logger)
    }
}

/// Uses repeatable randomization and drops all log messages.
impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(DefaultRandom::new_repeatable()), silent_logger())
    }
}

/// Returns a logger which drops all messages.
pub fn silent_logger() -> InfoLogger {
    Arc::new(|_| {})
}
