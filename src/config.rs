//! Serializable choice of orthogonalization method.
//!
//! Callers that read solver settings from a file describe the method as JSON:
//!
//! ```json
//! {"method": "classical_gram_schmidt"}
//! {"method": "modified_gram_schmidt"}
//! {"method": "dgks", "steps": 3}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{OrthoError, Result};
use crate::scalar::Scalar;
use crate::strategy::{
    ClassicalGramSchmidt, Dgks, ModifiedGramSchmidt, Orthogonalizer, DEFAULT_STEPS,
};

fn default_steps() -> usize {
    DEFAULT_STEPS
}

/// Which algorithm an [`Orthogonalizer`] runs, without its buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OrthogonalizationMethod {
    /// Single projection, no correction
    ClassicalGramSchmidt,
    /// Column-sequential projection
    ModifiedGramSchmidt,
    /// Classical Gram-Schmidt repeated under the DGKS criterion, at most `steps` sweeps
    Dgks {
        #[serde(default = "default_steps")]
        steps: usize,
    },
}

impl Default for OrthogonalizationMethod {
    fn default() -> Self {
        Self::Dgks {
            steps: DEFAULT_STEPS,
        }
    }
}

impl OrthogonalizationMethod {
    /// Parse a method from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let method: Self = serde_json::from_str(json)?;
        method.validate()?;
        Ok(method)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject settings no strategy can honor.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Dgks { steps: 0 } => Err(OrthoError::InvalidConfig(
                "dgks steps must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Build a strategy with buffers sized for `columns` basis columns.
    pub fn build<T: Scalar>(self, columns: usize) -> Orthogonalizer<T> {
        match self {
            Self::ClassicalGramSchmidt => ClassicalGramSchmidt::new(columns).into(),
            Self::ModifiedGramSchmidt => ModifiedGramSchmidt::new(columns).into(),
            Self::Dgks { steps } => Dgks::with_steps(columns, steps).into(),
        }
    }

    /// Build a strategy with empty buffers that grow to `capacity` columns
    /// without reallocating.
    pub fn with_capacity<T: Scalar>(self, capacity: usize) -> Orthogonalizer<T> {
        match self {
            Self::ClassicalGramSchmidt => ClassicalGramSchmidt::with_capacity(capacity).into(),
            Self::ModifiedGramSchmidt => ModifiedGramSchmidt::with_capacity(capacity).into(),
            Self::Dgks { steps } => Dgks::with_capacity(capacity, steps).into(),
        }
    }
}
