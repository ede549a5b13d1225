/// A single seed hit: an ungapped alignment between a model window and a
/// database substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagonal {
    /// Database start position, 0-based.
    pub n: u64,
    /// Model position aligned to the diagonal's first residue.
    pub k: i64,
    /// Number of matched residues.
    pub length: u32,
}

impl Diagonal {
    /// The antidiagonal key (`n - k`), constant along any single ungapped
    /// alignment and used as the sort/merge key.
    pub fn antidiagonal(&self) -> i64 {
        self.n as i64 - self.k
    }

    /// The half-open database range `[n, n + length)` this diagonal covers.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.n..self.n + self.length as u64
    }
}

/// Sort diagonals by `(n - k, k)` and coalesce adjacent entries that share
/// an antidiagonal into their union range.
///
/// Mirrors `mergeSeeds`: entries on the same antidiagonal always arise from
/// overlapping or touching database ranges (the forward and backward
/// enumeration sweeps rediscover the same true alignment from opposite
/// ends), so taking the union of `[n, n+length)` spans is safe.
pub fn sort_and_merge(diagonals: &mut Vec<Diagonal>) {
    diagonals.sort_by_key(|d| (d.antidiagonal(), d.k));

    let mut write = 0usize;
    for read in 0..diagonals.len() {
        if write > 0 && diagonals[write - 1].antidiagonal() == diagonals[read].antidiagonal() {
            let prev = diagonals[write - 1];
            let cur = diagonals[read];
            let start = prev.n.min(cur.n);
            let end = (prev.n + prev.length as u64).max(cur.n + cur.length as u64);
            diagonals[write - 1] = Diagonal {
                n: start,
                k: prev.k.min(cur.k),
                length: (end - start) as u32,
            };
        } else {
            diagonals[write] = diagonals[read];
            write += 1;
        }
    }
    diagonals.truncate(write);
}
