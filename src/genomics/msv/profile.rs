use thiserror::Error;

/// Error type returned while constructing a [`SeedScoreModel`].
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The model has no match positions.
    #[error("model length must be greater than zero")]
    EmptyModel,

    /// The supplied match-score table did not have exactly `M` rows.
    #[error("expected {expected} match-score rows, got {actual}")]
    ScoreLengthMismatch {
        /// Expected row count (model length).
        expected: usize,
        /// Row count actually supplied.
        actual: usize,
    },
}

/// Per-position match scores for a profile HMM, together with a
/// best-possible-extension prefix table used to bound branch-and-bound
/// pruning in the enumerator.
///
/// `scores[k - 1]` holds the four match emission scores (A, C, G, T) for
/// model position `k` (1-indexed, per HMMER convention). The extension
/// bound for a window of `d` additional residues starting at position `k`
/// is the sum, over that consecutive run of model positions, of each
/// position's best (max over the four symbols) emission score — an upper
/// bound on what any residue string could contribute there, derived once
/// via a prefix sum over per-position maxima (`opt_ext_fwd[k][d]` /
/// `opt_ext_rev[k][d]` in `original_source`, here computed on demand from a
/// single prefix array rather than materialized as a full `M x max_depth`
/// table).
#[derive(Debug, Clone)]
pub struct SeedScoreModel {
    scores: Vec<[f32; 4]>,
    extension: ExtensionBound,
}

/// How the best-possible-extension bound is obtained.
///
/// `Derived` recomputes it from a single prefix-of-maxima array over the
/// match-score matrix; `Explicit` carries precomputed `opt_ext_fwd`/
/// `opt_ext_rev` tables supplied by the caller (the shape `fm_hmmdata`
/// carries them in `original_source`, populated by a stage outside
/// `fm_msv.c` that this crate does not own).
#[derive(Debug, Clone)]
enum ExtensionBound {
    /// `prefix_best[i]` = sum of per-position best scores over `scores[0..i]`.
    Derived { prefix_best: Vec<f32> },
    /// `fwd[k - 1][d]` / `rev[k - 1][d]`, 1-indexed by model position, 0-indexed by depth.
    Explicit {
        fwd: Vec<Vec<f32>>,
        rev: Vec<Vec<f32>>,
    },
}

impl SeedScoreModel {
    /// Model length (number of match positions, `M`).
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the model has zero match positions.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Match emission scores `[A, C, G, T]` at 1-indexed model position `k`.
    pub fn match_scores(&self, k: u32) -> [f32; 4] {
        self.scores[(k - 1) as usize]
    }

    /// Best achievable score extending forward `remaining` additional
    /// residues strictly beyond 1-indexed model position `k` (`k` itself is
    /// assumed already scored by the caller), clipped at the end of the
    /// model.
    pub fn opt_ext_forward(&self, k: u32, remaining: u32) -> f32 {
        match &self.extension {
            ExtensionBound::Derived { prefix_best } => {
                let m = self.scores.len() as u32;
                let start = k.min(m);
                let end = (start + remaining).min(m);
                prefix_best[end as usize] - prefix_best[start as usize]
            }
            ExtensionBound::Explicit { fwd, .. } => {
                let m = self.scores.len() as u32;
                if k >= m {
                    return 0.0;
                }
                let row = &fwd[(k - 1) as usize];
                let d = (remaining as usize).min(row.len().saturating_sub(1));
                row[d]
            }
        }
    }

    /// Best achievable score extending backward `remaining` additional
    /// residues strictly before 1-indexed model position `k` (`k` itself is
    /// assumed already scored by the caller), clipped at the start of the
    /// model.
    pub fn opt_ext_reverse(&self, k: u32, remaining: u32) -> f32 {
        match &self.extension {
            ExtensionBound::Derived { prefix_best } => {
                let end = k.saturating_sub(1);
                let start = end.saturating_sub(remaining);
                prefix_best[end as usize] - prefix_best[start as usize]
            }
            ExtensionBound::Explicit { rev, .. } => {
                if k <= 1 {
                    return 0.0;
                }
                let row = &rev[(k - 1) as usize];
                let d = (remaining as usize).min(row.len().saturating_sub(1));
                row[d]
            }
        }
    }

    /// Build a model from a per-position match-score matrix, deriving the
    /// extension-bound prefix table via a single linear pass that takes,
    /// for each position, the best (max) of its four emission scores.
    pub fn from_match_scores(scores: Vec<[f32; 4]>) -> Result<Self, ProfileError> {
        if scores.is_empty() {
            return Err(ProfileError::EmptyModel);
        }
        let m = scores.len();

        let mut prefix_best = Vec::with_capacity(m + 1);
        prefix_best.push(0f32);
        for row in &scores {
            let best = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let running = prefix_best.last().copied().unwrap_or(0.0) + best;
            prefix_best.push(running);
        }

        Ok(Self {
            scores,
            extension: ExtensionBound::Derived { prefix_best },
        })
    }

    /// Build a model from a match-score matrix plus precomputed extension
    /// tables (`opt_ext_fwd[k][d]`/`opt_ext_rev[k][d]` of spec §3), for
    /// callers that already have them from an upstream HMM-loading stage
    /// this crate does not own.
    ///
    /// `opt_ext_fwd`/`opt_ext_rev` must each have exactly `scores.len()`
    /// rows, one per model position.
    pub fn with_extension_tables(
        scores: Vec<[f32; 4]>,
        opt_ext_fwd: Vec<Vec<f32>>,
        opt_ext_rev: Vec<Vec<f32>>,
    ) -> Result<Self, ProfileError> {
        if scores.is_empty() {
            return Err(ProfileError::EmptyModel);
        }
        let m = scores.len();
        if opt_ext_fwd.len() != m {
            return Err(ProfileError::ScoreLengthMismatch {
                expected: m,
                actual: opt_ext_fwd.len(),
            });
        }
        if opt_ext_rev.len() != m {
            return Err(ProfileError::ScoreLengthMismatch {
                expected: m,
                actual: opt_ext_rev.len(),
            });
        }

        Ok(Self {
            scores,
            extension: ExtensionBound::Explicit {
                fwd: opt_ext_fwd,
                rev: opt_ext_rev,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_scores(m: usize) -> Vec<[f32; 4]> {
        vec![[1.0, -1.0, -1.0, -1.0]; m]
    }

    #[test]
    fn empty_scores_are_rejected() {
        assert!(matches!(
            SeedScoreModel::from_match_scores(Vec::new()),
            Err(ProfileError::EmptyModel)
        ));
    }

    #[test]
    fn opt_ext_forward_excludes_k_itself_and_caps_at_model_end() {
        let model = SeedScoreModel::from_match_scores(flat_scores(5)).unwrap();
        // Every position's best score is 1.0, and the window starts strictly
        // after `k`, so the bound is the count of positions in (k, k+remaining].
        assert_eq!(model.opt_ext_forward(1, 5), 4.0); // positions 2..=5
        assert_eq!(model.opt_ext_forward(3, 2), 2.0); // positions 4..=5
        assert_eq!(model.opt_ext_forward(5, 10), 0.0); // nothing past the last position
    }

    #[test]
    fn opt_ext_reverse_excludes_k_itself_and_caps_at_model_start() {
        let model = SeedScoreModel::from_match_scores(flat_scores(5)).unwrap();
        assert_eq!(model.opt_ext_reverse(5, 5), 4.0); // positions 1..=4
        assert_eq!(model.opt_ext_reverse(3, 2), 2.0); // positions 1..=2
        assert_eq!(model.opt_ext_reverse(1, 10), 0.0); // nothing before the first position
    }

    #[test]
    fn windows_reflect_position_specific_best_scores() {
        let scores = vec![[1.0, 2.0, -3.0, 0.5], [4.0, -1.0, -2.0, 3.0]];
        let model = SeedScoreModel::from_match_scores(scores).unwrap();
        assert_eq!(model.opt_ext_forward(2, 1), 0.0); // nothing past position 2 (M=2)
        assert_eq!(model.opt_ext_reverse(1, 1), 0.0); // nothing before position 1
        assert_eq!(model.opt_ext_forward(1, 2), 4.0); // position 2's best score
    }

    #[test]
    fn explicit_extension_tables_are_used_verbatim() {
        let scores = flat_scores(3);
        let fwd = vec![vec![0.0, 9.0], vec![0.0, 1.0], vec![0.0, 0.0]];
        let rev = vec![vec![0.0, 0.0], vec![0.0, 2.0], vec![0.0, 7.0]];
        let model = SeedScoreModel::with_extension_tables(scores, fwd, rev).unwrap();

        assert_eq!(model.opt_ext_forward(1, 1), 9.0);
        assert_eq!(model.opt_ext_reverse(3, 1), 7.0);
        // Past the model end / before the start, the bound is zero.
        assert_eq!(model.opt_ext_forward(3, 1), 0.0);
        assert_eq!(model.opt_ext_reverse(1, 1), 0.0);
    }

    #[test]
    fn explicit_extension_table_row_mismatch_is_rejected() {
        let scores = flat_scores(3);
        let err = SeedScoreModel::with_extension_tables(scores, vec![vec![0.0]], vec![vec![0.0]; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::ScoreLengthMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }
}
