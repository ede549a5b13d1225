use crate::genomics::msv::interval::FmInterval;
use crate::genomics::BlockedFMIndex;

/// Resolve a single BWT row to its absolute position in the original text by
/// repeated LF-mapping until a sampled suffix-array row (or the sentinel
/// row) is reached.
///
/// Mirrors `FM_backtrackSeed`: walking backward through the BWT via
/// LF-mapping always lands on a sampled row within `2^shift_sa` steps, since
/// every row congruent to 0 mod the sampling stride is sampled (plus the
/// sentinel row unconditionally). The number of LF steps taken is added to
/// the sampled position to recover the original row's text offset.
pub fn backtrack_position(index: &BlockedFMIndex, row: usize) -> u64 {
    let mut j = row;
    let mut steps = 0u64;

    while j != index.term_loc() && (j as u64 & index.mask_sa()) != 0 {
        let symbol = index.bwt_at(j);
        let before = if j == 0 { 0 } else { index.rank(symbol, j) };
        let c = index.c_table()[symbol.order()] as u64;
        j = (c + before as u64) as usize;
        steps += 1;
    }

    if j == index.term_loc() {
        steps
    } else {
        steps + index.sa_at(j).expect("sampled row per loop invariant")
    }
}

/// Resolve every row in `iv` to an absolute text position, in row order.
///
/// Empty intervals yield no positions.
pub fn backtrack_interval(index: &BlockedFMIndex, iv: FmInterval) -> Vec<u64> {
    match iv {
        FmInterval::Empty => Vec::new(),
        FmInterval::Range { lower, upper } => (lower..=upper)
            .map(|row| backtrack_position(index, row as usize))
            .collect(),
    }
}
