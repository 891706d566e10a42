//! Tree construction settings.
//!
//! [`TreeConfigBuilder`] exposes every knob as a public field with a safe
//! default; [`TreeConfigBuilder::build`] validates the combination and yields
//! an immutable [`TreeConfig`]. The builder deserialises with defaults for
//! missing keys so hosts can embed it in their own configuration files.

use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;

/// Hard ceiling on the number of leaves in one tree (depth 32).
pub const MAX_LEAVES: u64 = 1 << 32;

/// Layers below this size are hashed on the calling thread.
pub const DEFAULT_PARALLEL_MIN_LEAVES: usize = 1024;

/// Validation failures for [`TreeConfigBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_leaves must be non-zero")]
    MaxLeavesZero,
    #[error("max_leaves {got} exceeds the supported ceiling {max}")]
    MaxLeavesTooLarge { max: u64, got: u64 },
    #[error("parallel_min_leaves must be at least 2, got {got}")]
    ParallelThresholdTooSmall { got: usize },
}

/// Builder used to assemble a [`TreeConfig`].
///
/// | Field | Default |
/// |-------|---------|
/// | `hash` | [`HashAlgorithm::Keccak256`] |
/// | `sort_leaves` | `false` (layer 0 keeps input order) |
/// | `parallel_min_leaves` | `1024` |
/// | `max_leaves` | `2^32` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfigBuilder {
    pub hash: HashAlgorithm,
    /// Sort layer 0 ascending by leaf digest. Record indices stay stable and
    /// are mapped onto leaf positions by the tree.
    pub sort_leaves: bool,
    /// Minimum layer width before hashing is spread over worker threads.
    /// Ignored without the `parallel` feature.
    pub parallel_min_leaves: usize,
    pub max_leaves: u64,
}

impl Default for TreeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeConfigBuilder {
    pub fn new() -> Self {
        Self {
            hash: HashAlgorithm::Keccak256,
            sort_leaves: false,
            parallel_min_leaves: DEFAULT_PARALLEL_MIN_LEAVES,
            max_leaves: MAX_LEAVES,
        }
    }

    pub fn hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn sort_leaves(mut self, sort_leaves: bool) -> Self {
        self.sort_leaves = sort_leaves;
        self
    }

    pub fn parallel_min_leaves(mut self, parallel_min_leaves: usize) -> Self {
        self.parallel_min_leaves = parallel_min_leaves;
        self
    }

    pub fn max_leaves(mut self, max_leaves: u64) -> Self {
        self.max_leaves = max_leaves;
        self
    }

    /// Validates the settings.
    pub fn build(self) -> Result<TreeConfig, ConfigError> {
        if self.max_leaves == 0 {
            return Err(ConfigError::MaxLeavesZero);
        }
        if self.max_leaves > MAX_LEAVES {
            return Err(ConfigError::MaxLeavesTooLarge {
                max: MAX_LEAVES,
                got: self.max_leaves,
            });
        }
        if self.parallel_min_leaves < 2 {
            return Err(ConfigError::ParallelThresholdTooSmall {
                got: self.parallel_min_leaves,
            });
        }
        Ok(TreeConfig {
            hash: self.hash,
            sort_leaves: self.sort_leaves,
            parallel_min_leaves: self.parallel_min_leaves,
            max_leaves: self.max_leaves,
        })
    }
}

/// Validated tree construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    hash: HashAlgorithm,
    sort_leaves: bool,
    parallel_min_leaves: usize,
    max_leaves: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::Keccak256,
            sort_leaves: false,
            parallel_min_leaves: DEFAULT_PARALLEL_MIN_LEAVES,
            max_leaves: MAX_LEAVES,
        }
    }
}

impl TreeConfig {
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::new()
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn sort_leaves(&self) -> bool {
        self.sort_leaves
    }

    pub fn parallel_min_leaves(&self) -> usize {
        self.parallel_min_leaves
    }

    pub fn max_leaves(&self) -> u64 {
        self.max_leaves
    }
}
