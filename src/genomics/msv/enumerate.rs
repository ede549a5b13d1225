use std::ops::Range;

use tracing::{debug, trace};

use crate::genomics::msv::backtrack::backtrack_interval;
use crate::genomics::msv::config::SeedSearchConfig;
use crate::genomics::msv::dp::{Complementarity, DpPair, ModelDirection};
use crate::genomics::msv::interval::{update_forward, update_reverse, FmInterval};
use crate::genomics::msv::profile::SeedScoreModel;
use crate::genomics::msv::seed::{sort_and_merge, Diagonal};
use crate::genomics::msv::MsvError;
use crate::genomics::BaseCode;

const ALPHABET: [BaseCode; 4] = [BaseCode::A, BaseCode::C, BaseCode::G, BaseCode::T];

/// Which FM-index orientation is driving the walk at this recursion.
///
/// `Forward` extends the companion (forward-index) interval rightward,
/// using the backward index's counts to keep the primary interval
/// synchronized (the bidirectional extension of §4.3); `Backward` is a
/// plain backward search directly on the forward index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FmDirection {
    Forward,
    Backward,
}

/// Enumerate every seed diagonal between `model` and the database indexed
/// by `index_forward`/`index_backward` whose score crosses `sc_thresh_fm`,
/// sorted and merged per §4.6.
///
/// `index_backward` must be built over the reverse of the same text
/// `index_forward` was built over; the two must agree on alphabet and
/// sentinel handling or results are meaningless (the core does not
/// re-verify this, per the "well-formed index" contract).
pub fn find_seeds(
    index_forward: &crate::genomics::BlockedFMIndex,
    index_backward: &crate::genomics::BlockedFMIndex,
    model: &SeedScoreModel,
    config: &SeedSearchConfig,
    sc_thresh_fm: f32,
) -> Result<Vec<Diagonal>, MsvError> {
    let m = model.len() as u32;
    if model.is_empty() {
        return Ok(Vec::new());
    }

    debug!(model_len = m, max_depth = config.max_depth, "starting MSV seed enumeration");

    let mut seeds = Vec::new();

    for symbol in ALPHABET {
        let seed_interval = FmInterval::for_symbol(index_forward, symbol);
        if seed_interval.is_empty() {
            continue;
        }

        let mut fwd_pairs = Vec::new();
        let mut rev_pairs = Vec::new();

        for k in 1..=m {
            let sc = model.match_scores(k)[symbol.complement().index()];
            if sc > 0.0 {
                if k > 3 {
                    fwd_pairs.push(DpPair::seed(
                        k,
                        sc,
                        ModelDirection::Backward,
                        Complementarity::Complement,
                    ));
                }
                if k + 2 < m {
                    rev_pairs.push(DpPair::seed(
                        k,
                        sc,
                        ModelDirection::Forward,
                        Complementarity::Complement,
                    ));
                }
            }
        }

        trace!(
            symbol = %symbol.symbol(),
            fwd_seeds = fwd_pairs.len(),
            rev_seeds = rev_pairs.len(),
            "seeded depth-1 diagonals"
        );

        let fwd_len = fwd_pairs.len();
        recurse(
            2,
            m,
            FmDirection::Forward,
            index_forward,
            index_backward,
            model,
            config,
            sc_thresh_fm,
            &mut fwd_pairs,
            0..fwd_len,
            seed_interval,
            seed_interval,
            &mut seeds,
        )?;

        let rev_len = rev_pairs.len();
        recurse(
            2,
            m,
            FmDirection::Backward,
            index_forward,
            index_backward,
            model,
            config,
            sc_thresh_fm,
            &mut rev_pairs,
            0..rev_len,
            seed_interval,
            FmInterval::Empty,
            &mut seeds,
        )?;
    }

    debug!(raw_seed_count = seeds.len(), "enumeration complete, sorting and merging");
    sort_and_merge(&mut seeds);
    debug!(merged_seed_count = seeds.len(), "sort/merge complete");

    Ok(seeds)
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    depth: u32,
    m: u32,
    fm_direction: FmDirection,
    index_forward: &crate::genomics::BlockedFMIndex,
    index_backward: &crate::genomics::BlockedFMIndex,
    model: &SeedScoreModel,
    config: &SeedSearchConfig,
    sc_thresh_fm: f32,
    dp_pairs: &mut Vec<DpPair>,
    window: Range<usize>,
    iv_primary: FmInterval,
    iv_companion: FmInterval,
    seeds: &mut Vec<Diagonal>,
) -> Result<(), MsvError> {
    for symbol in ALPHABET {
        let frame_start = dp_pairs.len();

        for i in window.clone() {
            let pair = dp_pairs[i];
            let k_new = pair.next_pos();
            if !(1..=m as i64).contains(&k_new) {
                continue;
            }
            let k_new = k_new as u32;

            let residue = match pair.complementarity {
                Complementarity::Complement => model.match_scores(k_new)[symbol.complement().index()],
                Complementarity::None => model.match_scores(k_new)[symbol.index()],
            };
            let new_score = pair.score + residue;

            if new_score >= sc_thresh_fm {
                match fm_direction {
                    FmDirection::Forward => {
                        let (new_primary, new_companion) =
                            update_forward(index_backward, symbol, iv_primary, iv_companion);
                        if !new_primary.is_empty() {
                            emit(
                                index_forward,
                                new_companion,
                                k_new,
                                depth,
                                fm_direction,
                                config,
                                seeds,
                            )?;
                        }
                    }
                    FmDirection::Backward => {
                        let new_primary = update_reverse(index_forward, symbol, iv_primary);
                        if !new_primary.is_empty() {
                            emit(
                                index_forward,
                                new_primary,
                                k_new,
                                depth,
                                fm_direction,
                                config,
                                seeds,
                            )?;
                        }
                    }
                }
                continue;
            }

            if is_pruned(&pair, new_score, depth, k_new, m, model, config, sc_thresh_fm) {
                continue;
            }

            dp_pairs.push(pair.extend(depth, k_new, new_score, residue));
        }

        let frame = frame_start..dp_pairs.len();
        if !frame.is_empty() {
            match fm_direction {
                FmDirection::Forward => {
                    let (new_primary, new_companion) =
                        update_forward(index_backward, symbol, iv_primary, iv_companion);
                    if !new_primary.is_empty() {
                        recurse(
                            depth + 1,
                            m,
                            fm_direction,
                            index_forward,
                            index_backward,
                            model,
                            config,
                            sc_thresh_fm,
                            dp_pairs,
                            frame.clone(),
                            new_primary,
                            new_companion,
                            seeds,
                        )?;
                    }
                }
                FmDirection::Backward => {
                    let new_primary = update_reverse(index_forward, symbol, iv_primary);
                    if !new_primary.is_empty() {
                        recurse(
                            depth + 1,
                            m,
                            fm_direction,
                            index_forward,
                            index_backward,
                            model,
                            config,
                            sc_thresh_fm,
                            dp_pairs,
                            frame.clone(),
                            new_primary,
                            FmInterval::Empty,
                            seeds,
                        )?;
                    }
                }
            }
        }
        dp_pairs.truncate(frame_start);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn is_pruned(
    pair: &DpPair,
    new_score: f32,
    depth: u32,
    k_new: u32,
    m: u32,
    model: &SeedScoreModel,
    config: &SeedSearchConfig,
    sc_thresh_fm: f32,
) -> bool {
    if new_score <= 0.0 {
        return true;
    }
    if depth == config.max_depth {
        return true;
    }
    if depth == pair.max_score_len + config.neg_len_limit {
        return true;
    }
    if new_score / depth as f32 < config.score_ratio_req {
        return true;
    }
    if pair.max_consec_pos < config.consec_pos_req {
        if depth >= config.max_depth / 2
            && new_score / depth as f32 < sc_thresh_fm / config.max_depth as f32
        {
            return true;
        }
        if config.max_depth >= config.consec_pos_req
            && depth == config.max_depth - config.consec_pos_req + 1
        {
            return true;
        }
    }

    match pair.model_direction {
        ModelDirection::Forward => {
            if k_new == m {
                return true;
            }
            if depth > config.max_depth.saturating_sub(10) {
                let remaining = config.max_depth - depth - 1;
                if new_score + model.opt_ext_forward(k_new, remaining) < sc_thresh_fm {
                    return true;
                }
            }
        }
        ModelDirection::Backward => {
            if k_new == 1 {
                return true;
            }
            if depth > config.max_depth.saturating_sub(10) {
                let remaining = config.max_depth - depth - 1;
                if new_score + model.opt_ext_reverse(k_new, remaining) < sc_thresh_fm {
                    return true;
                }
            }
        }
    }

    false
}

fn emit(
    index_forward: &crate::genomics::BlockedFMIndex,
    interval: FmInterval,
    k_new: u32,
    depth: u32,
    fm_direction: FmDirection,
    config: &SeedSearchConfig,
    seeds: &mut Vec<Diagonal>,
) -> Result<(), MsvError> {
    let k = match fm_direction {
        FmDirection::Forward => k_new as i64 - (depth as i64 - 1),
        FmDirection::Backward => k_new as i64,
    };

    for n in backtrack_interval(index_forward, interval) {
        if let Some(cap) = config.max_total_seeds {
            if seeds.len() >= cap {
                return Err(MsvError::SeedCapacityExceeded { capacity: cap });
            }
        }
        seeds.push(Diagonal {
            n,
            k,
            length: depth,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::BlockedFMIndex;

    /// score[k][c] = +2 if k == c+1 else -5, 1-indexed k over 0-indexed c.
    fn scenario_model(m: usize) -> SeedScoreModel {
        let mut scores = Vec::with_capacity(m);
        for k in 1..=m {
            let mut row = [-5.0f32; 4];
            if k - 1 < 4 {
                row[k - 1] = 2.0;
            }
            scores.push(row);
        }
        SeedScoreModel::from_match_scores(scores).unwrap()
    }

    #[test]
    fn scenario_s1_finds_expected_diagonals() {
        let model = scenario_model(4);
        let config = SeedSearchConfig::new(4, 4, 0, f32::NEG_INFINITY).unwrap();

        let reference = b"ACGTACGT";
        let mut reversed = reference.to_vec();
        reversed.reverse();

        let index_forward = BlockedFMIndex::build(reference, 4).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed, 4).unwrap();

        let seeds = find_seeds(&index_forward, &index_backward, &model, &config, 8.0).unwrap();
        assert!(seeds.iter().any(|d| d.n == 0 && d.length == 4));
    }

    #[test]
    fn scenario_s2_no_database_match_yields_no_seeds() {
        let model = scenario_model(4);
        let config = SeedSearchConfig::new(4, 4, 0, f32::NEG_INFINITY).unwrap();

        let reference = b"ACGG";
        let mut reversed = reference.to_vec();
        reversed.reverse();

        let index_forward = BlockedFMIndex::build(reference, 4).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed, 4).unwrap();

        let seeds = find_seeds(&index_forward, &index_backward, &model, &config, 8.0).unwrap();
        assert!(seeds.is_empty());
    }

    #[test]
    fn scenario_s3_short_model_excludes_all_seed_starts() {
        // M = 3: k > 3 never holds, and k < M - 2 == 1 only ever admits k < 1,
        // so no depth-1 seed survives either filter.
        let model = scenario_model(3);
        let config = SeedSearchConfig::new(4, 4, 0, f32::NEG_INFINITY).unwrap();

        let reference = b"ACGTACGT";
        let mut reversed = reference.to_vec();
        reversed.reverse();

        let index_forward = BlockedFMIndex::build(reference, 4).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed, 4).unwrap();

        let seeds = find_seeds(&index_forward, &index_backward, &model, &config, 1.0).unwrap();
        assert!(seeds.is_empty());
    }

    #[test]
    fn seed_capacity_is_enforced() {
        let model = scenario_model(4);
        let config =
            SeedSearchConfig::with_max_total_seeds(4, 4, 0, f32::NEG_INFINITY, Some(0)).unwrap();

        let reference = b"ACGTACGT";
        let mut reversed = reference.to_vec();
        reversed.reverse();

        let index_forward = BlockedFMIndex::build(reference, 4).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed, 4).unwrap();

        let err = find_seeds(&index_forward, &index_backward, &model, &config, 8.0).unwrap_err();
        assert!(matches!(err, MsvError::SeedCapacityExceeded { capacity: 0 }));
    }
}
