use std::cmp::Ordering;

use crate::genomics::{
    BaseCode, CompressedDNA, CompressedDNAError, RankSelectIndex, ALPHABET_SIZE,
};
use thiserror::Error;

const SENTINEL_BYTE: u8 = b'$';

/// Error type returned by FM-index construction and queries.
#[derive(Debug, Error)]
pub enum FMIndexError {
    /// Reference sequence was empty.
    #[error("reference sequence must be non-empty")]
    EmptyReference,

    /// Encountered an unsupported character in the input.
    #[error("unsupported character '{ch}' at position {position}")]
    UnsupportedCharacter {
        /// Character that could not be encoded.
        ch: char,
        /// Position within the reference where the character was observed.
        position: usize,
    },

    /// Block size was zero.
    #[error("block size must be greater than zero")]
    InvalidBlockSize,

    /// `shift_sa` was large enough that `1u64 << shift_sa` would overflow.
    #[error("shift_sa must be less than 64, got {0}")]
    InvalidShiftSa(u32),

    /// Compression failure bubbling up from `CompressedDNA`.
    #[error("compression error: {0}")]
    Compression(#[from] CompressedDNAError),
}

/// Compact representation of block boundaries and cumulative counts.
#[derive(Debug, Clone)]
pub struct CompressedBoundaries {
    entries: Vec<BlockBoundary>,
}

impl CompressedBoundaries {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, boundary: BlockBoundary) {
        self.entries.push(boundary);
    }

    /// Return the boundary information for `block_idx`.
    pub fn boundary(&self, block_idx: usize) -> &BlockBoundary {
        &self.entries[block_idx]
    }

    /// Iterator over block boundaries.
    pub fn iter(&self) -> impl Iterator<Item = &BlockBoundary> {
        self.entries.iter()
    }
}

/// Delimits the start of a block and carries cumulative counts at that point.
#[derive(Debug, Clone)]
pub struct BlockBoundary {
    /// Starting offset (inclusive) for the block.
    pub start: usize,
    /// Cumulative counts (A, C, G, T, N) before this block.
    pub cumulative_counts: [u32; ALPHABET_SIZE],
    /// Number of sentinel characters (`$`) encountered before this block.
    pub sentinel_count: u32,
}

/// A block of the BWT string with precomputed rank/select structure.
#[derive(Debug, Clone)]
pub struct BWTBlock {
    start: usize,
    end: usize,
    bwt: CompressedDNA,
    occ: RankSelectIndex,
    sentinel_offset: Option<usize>,
}

impl BWTBlock {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn rank_symbol(&self, symbol: FmSymbol, position: usize) -> u32 {
        let bounded = position.min(self.len());
        match symbol {
            FmSymbol::Sentinel => {
                if let Some(offset) = self.sentinel_offset {
                    if offset < bounded {
                        1
                    } else {
                        0
                    }
                } else {
                    0
                }
            }
            FmSymbol::Base(code) => {
                let mut count = self.occ.rank(&self.bwt, code, bounded);
                if code == BaseCode::N {
                    if let Some(offset) = self.sentinel_offset {
                        if offset < bounded {
                            count = count.saturating_sub(1);
                        }
                    }
                }
                count
            }
        }
    }
}

/// Symbol used in FM-index queries (includes sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmSymbol {
    /// The unique sentinel symbol `$`.
    Sentinel,
    /// One of the canonical DNA bases.
    Base(BaseCode),
}

impl FmSymbol {
    /// Lexicographic order for cumulative C table: `$` < A < C < G < T < N.
    pub fn order(&self) -> usize {
        match self {
            FmSymbol::Sentinel => 0,
            FmSymbol::Base(BaseCode::A) => 1,
            FmSymbol::Base(BaseCode::C) => 2,
            FmSymbol::Base(BaseCode::G) => 3,
            FmSymbol::Base(BaseCode::T) => 4,
            FmSymbol::Base(BaseCode::N) => 5,
        }
    }
}

/// Default suffix-array sampling stride exponent (stride = 2^shift_sa) used
/// by [`BlockedFMIndex::build`]. Chosen to keep `sa_at` lookups cheap for
/// the small-to-moderate references this naive index targets.
pub const DEFAULT_SHIFT_SA: u32 = 3;

/// Blocked FM-index structure with per-block rank/select summaries.
#[derive(Debug, Clone)]
pub struct BlockedFMIndex {
    blocks: Vec<BWTBlock>,
    boundaries: CompressedBoundaries,
    c_table: [u32; 6],
    block_size: usize,
    bwt_len: usize,
    sentinel_pos: usize,
    shift_sa: u32,
    mask_sa: u64,
    sampled_sa: Vec<Option<u64>>,
}

impl BlockedFMIndex {
    /// Build the FM-index from a reference string using a naive suffix-array
    /// construction, sampling the suffix array at the default stride.
    /// Suitable for demonstration and moderate input sizes.
    pub fn build(reference: &[u8], block_size: usize) -> Result<Self, FMIndexError> {
        Self::build_sampled(reference, block_size, DEFAULT_SHIFT_SA)
    }

    /// Build the FM-index, sampling the suffix array every `2^shift_sa`
    /// BWT rows (plus the sentinel row, which is always sampled).
    pub fn build_sampled(
        reference: &[u8],
        block_size: usize,
        shift_sa: u32,
    ) -> Result<Self, FMIndexError> {
        if reference.is_empty() {
            return Err(FMIndexError::EmptyReference);
        }
        if block_size == 0 {
            return Err(FMIndexError::InvalidBlockSize);
        }
        if shift_sa >= 64 {
            return Err(FMIndexError::InvalidShiftSa(shift_sa));
        }

        let clean = sanitize_reference(reference)?;
        let (bwt, sa, sentinel_pos) = build_bwt(&clean);
        let bwt_len = bwt.len();
        let mask_sa = (1u64 << shift_sa) - 1;

        let sampled_sa: Vec<Option<u64>> = (0..bwt_len)
            .map(|row| {
                if row == sentinel_pos || (row as u64 & mask_sa) == 0 {
                    Some(sa[row] as u64)
                } else {
                    None
                }
            })
            .collect();

        let mut blocks = Vec::new();
        let mut boundaries = CompressedBoundaries::new();
        let mut cumulative_counts = [0u32; ALPHABET_SIZE];
        let mut sentinel_cumulative = 0u32;

        for (block_idx, chunk) in bwt.chunks(block_size).enumerate() {
            let start = block_idx * block_size;
            let end = start + chunk.len();

            boundaries.push(BlockBoundary {
                start,
                cumulative_counts,
                sentinel_count: sentinel_cumulative,
            });

            let mut sanitized = Vec::with_capacity(chunk.len());
            let mut sentinel_offset = None;

            for (offset, &ch) in chunk.iter().enumerate() {
                if ch == SENTINEL_BYTE {
                    sentinel_offset = Some(offset);
                    sentinel_cumulative += 1;
                    sanitized.push(b'N');
                    continue;
                }
                let _code =
                    BaseCode::from_ascii(ch).ok_or_else(|| FMIndexError::UnsupportedCharacter {
                        ch: ch as char,
                        position: start + offset,
                    })?;
                sanitized.push(ch);
            }

            let bwt_compressed = CompressedDNA::compress(&sanitized)?;
            let occ = RankSelectIndex::build(&bwt_compressed);
            let mut block_counts = occ.rank_all(&bwt_compressed, chunk.len());
            if sentinel_offset.is_some() && block_counts[BaseCode::N.index()] > 0 {
                block_counts[BaseCode::N.index()] -= 1;
            }

            blocks.push(BWTBlock {
                start,
                end,
                bwt: bwt_compressed,
                occ,
                sentinel_offset,
            });

            cumulative_counts = add_counts(cumulative_counts, block_counts);
        }

        // Terminal boundary at end of BWT.
        boundaries.push(BlockBoundary {
            start: bwt_len,
            cumulative_counts,
            sentinel_count: sentinel_cumulative,
        });

        let global_totals = cumulative_counts;
        let c_table = build_c_table(global_totals);

        Ok(Self {
            blocks,
            boundaries,
            c_table,
            block_size,
            bwt_len,
            sentinel_pos,
            shift_sa,
            mask_sa,
            sampled_sa,
        })
    }

    /// Length of the BWT string (reference length + 1 sentinel).
    pub fn len(&self) -> usize {
        self.bwt_len
    }

    /// Block size used for the FM-index partitioning.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks maintained by the index.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Access the C table used in LF-mapping.
    pub fn c_table(&self) -> &[u32; 6] {
        &self.c_table
    }

    /// Position of the sentinel (`$`) in the BWT string.
    pub fn sentinel_position(&self) -> usize {
        self.sentinel_pos
    }

    /// Row index of the sentinel, i.e. `term_loc` in the FM-index literature.
    pub fn term_loc(&self) -> usize {
        self.sentinel_pos
    }

    /// Suffix-array sampling stride exponent: samples are kept every
    /// `2^shift_sa()` rows (plus the sentinel row).
    pub fn shift_sa(&self) -> u32 {
        self.shift_sa
    }

    /// `2^shift_sa() - 1`, the mask used to test whether a row is sampled.
    pub fn mask_sa(&self) -> u64 {
        self.mask_sa
    }

    /// The symbol occupying BWT row `i`, including the sentinel.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`; the core assumes well-formed queries
    /// (see the crate's error-handling design for the FM-index contract).
    pub fn bwt_at(&self, i: usize) -> FmSymbol {
        if i == self.sentinel_pos {
            return FmSymbol::Sentinel;
        }
        let block_idx = i / self.block_size;
        let block = &self.blocks[block_idx];
        let within = i - block.start;
        if block.sentinel_offset == Some(within) {
            return FmSymbol::Sentinel;
        }
        let base = block.bwt.base_at(within).expect("row within block bounds");
        FmSymbol::Base(BaseCode::from_ascii(base).expect("block bytes are sanitized"))
    }

    /// The suffix-array value at row `i`, if that row was sampled during
    /// construction (`(i & mask_sa()) == 0 || i == term_loc()`).
    pub fn sa_at(&self, i: usize) -> Option<u64> {
        self.sampled_sa.get(i).copied().flatten()
    }

    /// Retrieve rank of `symbol` in `BWT[..position)`.
    pub fn rank(&self, symbol: FmSymbol, position: usize) -> u32 {
        let bounded = position.min(self.bwt_len);
        let block_idx = bounded / self.block_size;
        let boundary = self.boundaries.boundary(block_idx);

        let mut count = match symbol {
            FmSymbol::Sentinel => boundary.sentinel_count,
            FmSymbol::Base(code) => boundary.cumulative_counts[code.index()],
        };

        if let Some(block) = self.blocks.get(block_idx) {
            let within = bounded - block.start;
            count += block.rank_symbol(symbol, within);
        }

        count
    }

    /// Total occurrences of `symbol` across the entire BWT string.
    pub fn total(&self, symbol: FmSymbol) -> u32 {
        match symbol {
            FmSymbol::Sentinel => 1,
            FmSymbol::Base(code) => {
                let boundary = self.boundaries.boundary(self.blocks.len());
                boundary.cumulative_counts[code.index()]
            }
        }
    }

    /// Access to the raw blocks (useful for specialized processing).
    pub fn blocks(&self) -> &[BWTBlock] {
        &self.blocks
    }

    /// Access block boundaries and cumulative counts.
    pub fn boundaries(&self) -> &CompressedBoundaries {
        &self.boundaries
    }
}

fn sanitize_reference(reference: &[u8]) -> Result<Vec<u8>, FMIndexError> {
    let mut clean = Vec::with_capacity(reference.len());
    for (idx, &ch) in reference.iter().enumerate() {
        match BaseCode::from_ascii(ch) {
            Some(code) => {
                let uppercase = match code {
                    BaseCode::A => b'A',
                    BaseCode::C => b'C',
                    BaseCode::G => b'G',
                    BaseCode::T => b'T',
                    BaseCode::N => b'N',
                };
                clean.push(uppercase);
            }
            None => {
                return Err(FMIndexError::UnsupportedCharacter {
                    ch: ch as char,
                    position: idx,
                });
            }
        }
    }
    Ok(clean)
}

fn build_bwt(reference: &[u8]) -> (Vec<u8>, Vec<usize>, usize) {
    let mut text = reference.to_vec();
    text.push(SENTINEL_BYTE);
    let sa = build_suffix_array(&text);

    let mut bwt = Vec::with_capacity(text.len());
    let mut sentinel_pos = 0usize;

    for (idx, &sa_idx) in sa.iter().enumerate() {
        let prev = if sa_idx == 0 {
            text.len() - 1
        } else {
            sa_idx - 1
        };
        let ch = text[prev];
        if sa_idx == 0 {
            sentinel_pos = idx;
        }
        bwt.push(ch);
    }

    (bwt, sa, sentinel_pos)
}

fn build_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();
    sa.sort_by(|&a, &b| compare_suffixes(text, a, b));
    sa
}

fn compare_suffixes(text: &[u8], lhs: usize, rhs: usize) -> Ordering {
    text[lhs..].cmp(&text[rhs..])
}

fn add_counts(lhs: [u32; ALPHABET_SIZE], rhs: [u32; ALPHABET_SIZE]) -> [u32; ALPHABET_SIZE] {
    [
        lhs[0] + rhs[0],
        lhs[1] + rhs[1],
        lhs[2] + rhs[2],
        lhs[3] + rhs[3],
        lhs[4] + rhs[4],
    ]
}

fn build_c_table(totals: [u32; ALPHABET_SIZE]) -> [u32; 6] {
    let sentinel = 1;
    let a = totals[BaseCode::A.index()];
    let c = totals[BaseCode::C.index()];
    let g = totals[BaseCode::G.index()];
    let t = totals[BaseCode::T.index()];

    [
        0,
        sentinel,
        sentinel + a,
        sentinel + a + c,
        sentinel + a + c + g,
        sentinel + a + c + g + t,
    ]
    .map(|value| value)
}
