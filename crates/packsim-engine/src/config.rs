//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the input for constructing an [`Engine`] or a
//! [`LockstepSimulation`]. [`validate()`](EngineConfig::validate) checks
//! structural invariants once, at startup; nothing downstream re-checks
//! them.
//!
//! [`Engine`]: crate::engine::Engine
//! [`LockstepSimulation`]: crate::lockstep::LockstepSimulation

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use packsim_core::{BinId, BinSpec};

/// Name given to the dispatch thread when none is configured.
pub const DEFAULT_DISPATCH_THREAD_NAME: &str = "packsim-dispatch";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building an engine.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// No bins configured.
    NoBins,
    /// Two bins share an id.
    DuplicateBin {
        /// The repeated id.
        id: BinId,
    },
    /// A bin's width or height is not finite and positive.
    InvalidBinDimensions {
        /// The offending bin.
        id: BinId,
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// The dispatch thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
    /// The simulation state could not be recovered from the dispatch
    /// thread (e.g. the thread panicked).
    StateRecoveryFailed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBins => write!(f, "at least one bin must be configured"),
            Self::DuplicateBin { id } => write!(f, "bin id {id} is configured more than once"),
            Self::InvalidBinDimensions { id, width, height } => write!(
                f,
                "bin {id} has invalid dimensions {width}x{height}, both must be finite and positive"
            ),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
            Self::StateRecoveryFailed => {
                write!(f, "simulation state could not be recovered from dispatch thread")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for a simulation engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Bins, in display order. Ids must be unique.
    pub bins: Vec<BinSpec>,
    /// Name of the dispatch (state-owner) thread.
    pub thread_name: String,
}

impl EngineConfig {
    /// A configuration with the given bins and default settings otherwise.
    pub fn with_bins(bins: Vec<BinSpec>) -> Self {
        Self {
            bins,
            thread_name: DEFAULT_DISPATCH_THREAD_NAME.to_string(),
        }
    }

    /// The standard four-bin layout used by the optimizer's default run:
    /// 220x220, 180x200, 200x180 and 160x160 with ids 0 to 3.
    pub fn standard() -> Self {
        Self::with_bins(packsim_core::standard_bins())
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bins.is_empty() {
            return Err(ConfigError::NoBins);
        }
        let mut seen = HashSet::with_capacity(self.bins.len());
        for bin in &self.bins {
            if !seen.insert(bin.id) {
                return Err(ConfigError::DuplicateBin { id: bin.id });
            }
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(bin.width) || !valid(bin.height) {
                return Err(ConfigError::InvalidBinDimensions {
                    id: bin.id,
                    width: bin.width,
                    height: bin.height,
                });
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
