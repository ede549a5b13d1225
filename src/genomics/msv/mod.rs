//! MSV (Multiple Segment Viterbi) seed-finding core.
//!
//! Enumerates ungapped alignments ("diagonals") between a profile HMM and a
//! nucleotide database indexed by a pair of FM-indexes (forward and
//! built-over-reverse), returning the unique, maximally extended seed
//! diagonals whose score crosses a caller-supplied threshold. Gapped
//! alignment, Viterbi/Forward DP, persisted HMM/index formats and parallel
//! execution are out of scope here; see [`crate::genomics::msv::threshold`]
//! for the one piece of surrounding glue this module does carry (P-value to
//! score-threshold conversion), kept deliberately decoupled from the
//! enumerator's own signature.

mod backtrack;
mod config;
mod dp;
mod enumerate;
mod interval;
mod profile;
mod seed;
pub mod threshold;

use thiserror::Error;

pub use config::{ConfigError, SeedSearchConfig};
pub use dp::{Complementarity, DpPair, ModelDirection};
pub use enumerate::find_seeds;
pub use interval::{update_forward, update_reverse, FmInterval};
pub use profile::{ProfileError, SeedScoreModel};
pub use seed::{sort_and_merge, Diagonal};

/// Aggregate error type for the MSV seed-finding core.
#[derive(Debug, Error)]
pub enum MsvError {
    /// Profile construction failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Search configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The seed list grew past its configured hard cap
    /// (`SeedSearchConfig::max_total_seeds`). The Rust-idiomatic analogue of
    /// the original's fatal allocation-failure path: a `Result` the caller
    /// can recover from instead of an abort.
    #[error("seed list exceeded configured capacity of {capacity}")]
    SeedCapacityExceeded {
        /// The configured cap that was reached.
        capacity: usize,
    },
}
