use thiserror::Error;

/// Error returned by [`SeedSearchConfig::new`] when the supplied parameters
/// cannot describe a valid enumeration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `max_depth` was zero.
    #[error("max_depth must be greater than zero")]
    ZeroMaxDepth,

    /// `consec_pos_req` exceeded `max_depth`, making the requirement
    /// unsatisfiable by construction.
    #[error("consec_pos_req ({consec_pos_req}) cannot exceed max_depth ({max_depth})")]
    ConsecPosReqTooLarge {
        /// The offending `consec_pos_req`.
        consec_pos_req: u32,
        /// The configured `max_depth`.
        max_depth: u32,
    },

    /// `score_ratio_req` was NaN. `f32::NEG_INFINITY` is the documented
    /// sentinel for "no density requirement" (mirroring the original's
    /// `-eslINFINITY`) and is accepted.
    #[error("score_ratio_req must not be NaN, got {0}")]
    NonFiniteScoreRatioReq(f32),
}

/// Tunable parameters governing the DP enumerator's branch-and-bound
/// pruning, validated once at construction so the enumerator itself never
/// has to defend against malformed configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedSearchConfig {
    /// Maximum enumeration depth (residues considered per branch).
    pub max_depth: u32,
    /// Residues permitted since the last best-prefix-score improvement
    /// before a branch is abandoned.
    pub neg_len_limit: u32,
    /// Required longest positive-contribution run length.
    pub consec_pos_req: u32,
    /// Minimum score-per-residue density (`score / depth`) a surviving
    /// branch must maintain.
    pub score_ratio_req: f32,
    /// Hard cap on the total number of seeds the enumerator will collect
    /// before returning [`crate::genomics::msv::MsvError::SeedCapacityExceeded`].
    /// `None` means unbounded.
    pub max_total_seeds: Option<usize>,
}

impl SeedSearchConfig {
    /// Construct a validated configuration with unbounded seed capacity.
    pub fn new(
        max_depth: u32,
        neg_len_limit: u32,
        consec_pos_req: u32,
        score_ratio_req: f32,
    ) -> Result<Self, ConfigError> {
        Self::with_max_total_seeds(
            max_depth,
            neg_len_limit,
            consec_pos_req,
            score_ratio_req,
            None,
        )
    }

    /// Construct a validated configuration with an explicit seed-count cap.
    pub fn with_max_total_seeds(
        max_depth: u32,
        neg_len_limit: u32,
        consec_pos_req: u32,
        score_ratio_req: f32,
        max_total_seeds: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if consec_pos_req > max_depth {
            return Err(ConfigError::ConsecPosReqTooLarge {
                consec_pos_req,
                max_depth,
            });
        }
        if score_ratio_req.is_nan() {
            return Err(ConfigError::NonFiniteScoreRatioReq(score_ratio_req));
        }
        Ok(Self {
            max_depth,
            neg_len_limit,
            consec_pos_req,
            score_ratio_req,
            max_total_seeds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_depth_is_rejected() {
        assert!(matches!(
            SeedSearchConfig::new(0, 2, 1, 0.0),
            Err(ConfigError::ZeroMaxDepth)
        ));
    }

    #[test]
    fn consec_pos_req_above_max_depth_is_rejected() {
        assert!(matches!(
            SeedSearchConfig::new(4, 2, 5, 0.0),
            Err(ConfigError::ConsecPosReqTooLarge {
                consec_pos_req: 5,
                max_depth: 4,
            })
        ));
    }

    #[test]
    fn nan_score_ratio_is_rejected() {
        assert!(matches!(
            SeedSearchConfig::new(4, 2, 1, f32::NAN),
            Err(ConfigError::NonFiniteScoreRatioReq(_))
        ));
    }

    #[test]
    fn neg_infinity_score_ratio_is_accepted_as_disabled_sentinel() {
        let cfg = SeedSearchConfig::new(4, 2, 1, f32::NEG_INFINITY).unwrap();
        assert_eq!(cfg.score_ratio_req, f32::NEG_INFINITY);
    }

    #[test]
    fn valid_config_round_trips_its_fields() {
        let cfg = SeedSearchConfig::new(16, 4, 6, 0.1).unwrap();
        assert_eq!(cfg.max_depth, 16);
        assert_eq!(cfg.neg_len_limit, 4);
        assert_eq!(cfg.consec_pos_req, 6);
        assert_eq!(cfg.max_total_seeds, None);
    }
}
