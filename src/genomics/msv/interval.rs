use crate::genomics::{BaseCode, BlockedFMIndex, FmSymbol};

/// A BWT row range, or the absence of one.
///
/// Modeled as a proper sum type rather than the C original's in-band
/// negative-lower sentinel (see the crate's design notes): callers match on
/// [`FmInterval::Empty`] instead of checking `lower < 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmInterval {
    /// No suffixes match; extension dead-ended.
    Empty,
    /// Inclusive BWT row range `[lower, upper]`.
    Range {
        /// Lower bound (inclusive).
        lower: u64,
        /// Upper bound (inclusive).
        upper: u64,
    },
}

impl FmInterval {
    /// The full-index interval covering every row, for a single-symbol seed.
    pub fn for_symbol(index: &BlockedFMIndex, symbol: BaseCode) -> Self {
        let fm_symbol = FmSymbol::Base(symbol);
        let lower = index.c_table()[fm_symbol.order()] as u64;
        let upper_bound = index.c_table()[fm_symbol.order() + 1] as u64;
        if upper_bound == 0 {
            return FmInterval::Empty;
        }
        FmInterval::Range {
            lower,
            upper: upper_bound - 1,
        }
    }

    /// Number of BWT rows covered, 0 for [`FmInterval::Empty`].
    pub fn width(&self) -> u64 {
        match self {
            FmInterval::Empty => 0,
            FmInterval::Range { lower, upper } => upper.saturating_sub(*lower) + 1,
        }
    }

    /// Whether this interval has no surviving rows.
    pub fn is_empty(&self) -> bool {
        matches!(self, FmInterval::Empty)
    }
}

/// Backward (prepend) extension of `iv` by `symbol`, via LF-mapping on
/// `index`.
///
/// This is the ordinary FM-index backward-search step: given the interval
/// of suffixes matching a pattern `P`, compute the interval matching
/// `symbol . P`. A normal, expected outcome is [`FmInterval::Empty`] when no
/// suffix of the indexed text begins with that extended pattern.
pub fn update_reverse(index: &BlockedFMIndex, symbol: BaseCode, iv: FmInterval) -> FmInterval {
    let (lower, upper) = match iv {
        FmInterval::Empty => return FmInterval::Empty,
        FmInterval::Range { lower, upper } => (lower, upper),
    };

    let fm_symbol = FmSymbol::Base(symbol);
    let before = occ_before(index, fm_symbol, lower);
    let upto = index.rank(fm_symbol, (upper + 1) as usize) as u64;

    if upto <= before {
        return FmInterval::Empty;
    }

    let c = index.c_table()[fm_symbol.order()] as u64;
    FmInterval::Range {
        lower: c + before,
        upper: c + upto - 1,
    }
}

/// Bidirectional forward (append) extension by `symbol`.
///
/// `index_backward` is the FM-index built over the *reverse* of the target
/// (spec §4.3); its counts drive the LF-style update of the primary
/// interval, while the companion interval — living on the forward index —
/// is advanced in lock-step so it can later be used for suffix-array
/// backtracking (the forward index is the one with real database
/// coordinates). The algorithm is the standard bidirectional-BWT extension
/// (Lam et al.; see also the FMD-index `forward_ext`/`backward_ext` pair):
/// accumulate the rank of symbols lexicographically smaller than `symbol`
/// within the primary interval to find where the companion interval's new
/// block begins.
pub fn update_forward(
    index_backward: &BlockedFMIndex,
    symbol: BaseCode,
    primary: FmInterval,
    companion: FmInterval,
) -> (FmInterval, FmInterval) {
    let (p_lower, p_upper) = match primary {
        FmInterval::Empty => return (FmInterval::Empty, FmInterval::Empty),
        FmInterval::Range { lower, upper } => (lower, upper),
    };
    let (c_lower, _) = match companion {
        FmInterval::Empty => return (FmInterval::Empty, FmInterval::Empty),
        FmInterval::Range { lower, upper } => (lower, upper),
    };

    let mut smaller_count = 0u64;
    for other in [BaseCode::A, BaseCode::C, BaseCode::G, BaseCode::T] {
        if other.index() >= symbol.index() {
            continue;
        }
        let before = occ_before(index_backward, FmSymbol::Base(other), p_lower);
        let upto = index_backward.rank(FmSymbol::Base(other), (p_upper + 1) as usize) as u64;
        smaller_count += upto.saturating_sub(before);
    }

    let fm_symbol = FmSymbol::Base(symbol);
    let sym_before = occ_before(index_backward, fm_symbol, p_lower);
    let sym_upto = index_backward.rank(fm_symbol, (p_upper + 1) as usize) as u64;
    if sym_upto <= sym_before {
        return (FmInterval::Empty, FmInterval::Empty);
    }
    let sym_count = sym_upto - sym_before;

    let new_companion_lower = c_lower + smaller_count;
    let new_companion = FmInterval::Range {
        lower: new_companion_lower,
        upper: new_companion_lower + sym_count - 1,
    };

    let c = index_backward.c_table()[fm_symbol.order()] as u64;
    let new_primary = FmInterval::Range {
        lower: c + sym_before,
        upper: c + sym_before + sym_count - 1,
    };

    (new_primary, new_companion)
}

/// `occ(symbol, lower - 1)`, with the convention `occ(symbol, -1) == 0`.
fn occ_before(index: &BlockedFMIndex, symbol: FmSymbol, lower: u64) -> u64 {
    if lower == 0 {
        0
    } else {
        index.rank(symbol, lower as usize) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::BlockedFMIndex;

    #[test]
    fn update_reverse_matches_naive_backward_search() {
        let reference = b"ACGTACGTACGT";
        let index = BlockedFMIndex::build(reference, 4).unwrap();

        // Start from the full interval over 'T', then prepend 'A': should
        // match every occurrence of "AT" in the (sentinel-terminated) text.
        let mut iv = FmInterval::for_symbol(&index, BaseCode::T);
        iv = update_reverse(&index, BaseCode::A, iv);

        let naive = naive_occurrence_count(reference, b"AT");
        assert_eq!(iv.width(), naive as u64);
    }

    #[test]
    fn update_reverse_on_absent_pattern_is_empty() {
        let reference = b"AAAA";
        let index = BlockedFMIndex::build(reference, 2).unwrap();
        let iv = FmInterval::for_symbol(&index, BaseCode::A);
        let iv = update_reverse(&index, BaseCode::T, iv);
        assert!(iv.is_empty());
    }

    fn naive_occurrence_count(reference: &[u8], pattern: &[u8]) -> usize {
        if pattern.len() > reference.len() {
            return 0;
        }
        (0..=reference.len() - pattern.len())
            .filter(|&i| &reference[i..i + pattern.len()] == pattern)
            .count()
    }

    #[test]
    fn update_forward_matches_naive_occurrence_counts_on_both_indexes() {
        let reference = b"ACGTAAGT";
        let mut reversed_ref = reference.to_vec();
        reversed_ref.reverse();

        let index_forward = BlockedFMIndex::build(reference, 4).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed_ref, 4).unwrap();

        // Seed both primary and companion on the single-symbol interval for
        // 'A', as `find_seeds` does for a depth-1 seed, then extend by 'C'.
        let primary = FmInterval::for_symbol(&index_forward, BaseCode::A);
        let companion = FmInterval::for_symbol(&index_forward, BaseCode::A);
        let (new_primary, new_companion) =
            update_forward(&index_backward, BaseCode::C, primary, companion);

        // The companion lives on the forward index: it should now match
        // every occurrence of "AC" read left-to-right in the reference.
        let expected_companion = naive_occurrence_count(reference, b"AC");
        assert_eq!(new_companion.width(), expected_companion as u64);

        // The primary lives on the backward index: it should match every
        // occurrence of "CA" (the reverse of "AC") in the reversed reference.
        let expected_primary = naive_occurrence_count(&reversed_ref, b"CA");
        assert_eq!(new_primary.width(), expected_primary as u64);
    }

    #[test]
    fn update_forward_on_absent_pattern_is_empty() {
        let reference = b"AAAA";
        let mut reversed_ref = reference.to_vec();
        reversed_ref.reverse();

        let index_forward = BlockedFMIndex::build(reference, 2).unwrap();
        let index_backward = BlockedFMIndex::build(&reversed_ref, 2).unwrap();

        let primary = FmInterval::for_symbol(&index_forward, BaseCode::A);
        let companion = FmInterval::for_symbol(&index_forward, BaseCode::A);
        let (new_primary, new_companion) =
            update_forward(&index_backward, BaseCode::T, primary, companion);

        assert!(new_primary.is_empty());
        assert!(new_companion.is_empty());
    }
}
