/// Which way a partial diagonal walks across model positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelDirection {
    /// Model position increases with each extension (`pos + 1`).
    Forward,
    /// Model position decreases with each extension (`pos - 1`).
    Backward,
}

/// Whether a partial diagonal is scored against the database strand as-read
/// or its reverse complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complementarity {
    /// Score the symbol as emitted.
    None,
    /// Score the symbol's Watson-Crick complement.
    Complement,
}

/// An in-flight partial diagonal carried between recursion depths.
///
/// Mirrors `FM_DP_PAIR`: `max_score`/`max_score_len` track the best prefix
/// score seen so far (and its depth) for the `neg_len_limit` abort check;
/// `consec_pos`/`max_consec_pos` track the current and best run of
/// strictly-positive per-residue contributions for the `consec_pos_req`
/// check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpPair {
    /// Current model position (1-indexed).
    pub pos: u32,
    /// Cumulative score of the emitted prefix.
    pub score: f32,
    /// Best prefix score seen along this branch so far.
    pub max_score: f32,
    /// Depth (residue count) at which `max_score` was achieved.
    pub max_score_len: u32,
    /// Current run length of strictly-positive per-residue contributions.
    pub consec_pos: u32,
    /// Best run length of strictly-positive contributions seen so far.
    pub max_consec_pos: u32,
    /// Direction of model-position travel.
    pub model_direction: ModelDirection,
    /// Strand complementarity for this branch.
    pub complementarity: Complementarity,
}

impl DpPair {
    /// Construct the depth-1 seed pair for model position `pos`.
    pub fn seed(
        pos: u32,
        score: f32,
        model_direction: ModelDirection,
        complementarity: Complementarity,
    ) -> Self {
        let consec_pos = u32::from(score > 0.0);
        Self {
            pos,
            score,
            max_score: score,
            max_score_len: 1,
            consec_pos,
            max_consec_pos: consec_pos,
            model_direction,
            complementarity,
        }
    }

    /// Derive the successor pair after scoring one more residue at depth
    /// `depth`, given the per-residue contribution `residue_score`.
    pub fn extend(&self, depth: u32, new_pos: u32, new_score: f32, residue_score: f32) -> Self {
        let consec_pos = if residue_score > 0.0 {
            self.consec_pos + 1
        } else {
            0
        };
        let (max_score, max_score_len) = if new_score > self.max_score {
            (new_score, depth)
        } else {
            (self.max_score, self.max_score_len)
        };
        Self {
            pos: new_pos,
            score: new_score,
            max_score,
            max_score_len,
            consec_pos,
            max_consec_pos: self.max_consec_pos.max(consec_pos),
            model_direction: self.model_direction,
            complementarity: self.complementarity,
        }
    }

    /// Next model position reached by stepping one residue in this pair's
    /// `model_direction`.
    pub fn next_pos(&self) -> i64 {
        match self.model_direction {
            ModelDirection::Forward => self.pos as i64 + 1,
            ModelDirection::Backward => self.pos as i64 - 1,
        }
    }
}
