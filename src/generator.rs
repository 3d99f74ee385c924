//! Value Generator
//!
//! Produces the opaque values assigned to records created or regenerated by
//! a fetch.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of generated values
pub const GENERATED_VALUE_LENGTH: usize = 10;

/// Source of fresh record values.
pub trait ValueGenerator: Send + Sync {
    /// Returns a new value.
    fn generate(&self) -> String;
}

// == Random Value Generator ==
/// Generates fixed-length random alphanumeric strings.
#[derive(Debug, Clone, Copy)]
pub struct RandomValueGenerator {
    length: usize,
}

impl RandomValueGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomValueGenerator {
    fn default() -> Self {
        Self::new(GENERATED_VALUE_LENGTH)
    }
}

impl ValueGenerator for RandomValueGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
