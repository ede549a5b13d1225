use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rosalind::genomics::msv::threshold::fm_score_threshold;
use rosalind::genomics::{
    find_seeds, AlignedRead, BWTAligner, BlockedFMIndex, CigarOp, CigarOpKind, Diagonal,
    SeedScoreModel, SeedSearchConfig, StreamingVariantCaller, Variant,
};

#[derive(Parser, Debug)]
#[command(name = "rosalind", about = "Genomic analysis engine using O(√t) space")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align reads against a reference genome using the BWT aligner.
    Align {
        /// Reference genome (plain FASTA without headers or raw sequence file).
        reference: PathBuf,
        /// Reads file (one sequence per line).
        reads: PathBuf,
    },
    /// Call variants from aligned reads using the streaming variant caller.
    Variants {
        /// Reference genome (plain FASTA or raw sequence).
        reference: PathBuf,
        /// Alignments file (`<position>\t<sequence>` per line).
        alignments: PathBuf,
        /// Chromosome name (default: chr1).
        #[arg(long, default_value = "chr1")]
        chrom: String,
        /// Bases per block for streaming evaluation.
        #[arg(long, default_value_t = 1024)]
        block_size: usize,
        /// Minimum quality threshold for reporting variants.
        #[arg(long, default_value_t = 10.0)]
        quality_threshold: f32,
    },
    /// Find MSV seed diagonals between a profile HMM and a reference
    /// database indexed by an FM-index.
    Seeds {
        /// Reference (target database) sequence file.
        reference: PathBuf,
        /// Per-line match-score table: four whitespace-separated floats
        /// (A, C, G, T) per model position.
        scores: PathBuf,
        /// Maximum enumeration depth.
        #[arg(long, default_value_t = 16)]
        max_depth: u32,
        /// Residues permitted since the last best-prefix-score improvement.
        #[arg(long, default_value_t = 4)]
        neg_len_limit: u32,
        /// Required longest positive-contribution run length.
        #[arg(long, default_value_t = 0)]
        consec_pos_req: u32,
        /// Minimum score-per-residue density a surviving branch must
        /// maintain.
        #[arg(long, default_value_t = f32::NEG_INFINITY)]
        score_ratio_req: f32,
        /// Score threshold an emitted seed must cross. When omitted, it is
        /// derived from `--pvalue` via the Gumbel inverse-survival formula.
        #[arg(long)]
        threshold: Option<f32>,
        /// Target P-value used to derive the threshold when `--threshold`
        /// is not supplied.
        #[arg(long, default_value_t = 0.5)]
        pvalue: f64,
        /// Expected number of hits per window (governs the `tec` term).
        #[arg(long, default_value_t = 2.0)]
        nu: f32,
        /// Background null-model score for a sequence of `max_length`
        /// residues.
        #[arg(long, default_value_t = 0.0)]
        nullsc: f32,
        /// Gumbel location parameter.
        #[arg(long, default_value_t = 0.0)]
        mu: f64,
        /// Gumbel rate parameter.
        #[arg(long, default_value_t = 0.693)]
        lambda: f64,
        /// Length model used in the threshold derivation (defaults to the
        /// model length when omitted).
        #[arg(long)]
        max_length: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align { reference, reads } => run_align(reference, reads)?,
        Commands::Variants {
            reference,
            alignments,
            chrom,
            block_size,
            quality_threshold,
        } => run_variants(reference, alignments, chrom, block_size, quality_threshold)?,
        Commands::Seeds {
            reference,
            scores,
            max_depth,
            neg_len_limit,
            consec_pos_req,
            score_ratio_req,
            threshold,
            pvalue,
            nu,
            nullsc,
            mu,
            lambda,
            max_length,
        } => run_seeds(
            reference,
            scores,
            max_depth,
            neg_len_limit,
            consec_pos_req,
            score_ratio_req,
            threshold,
            pvalue,
            nu,
            nullsc,
            mu,
            lambda,
            max_length,
        )?,
    }

    Ok(())
}

fn run_align(reference_path: PathBuf, reads_path: PathBuf) -> Result<()> {
    let reference = read_sequence_file(&reference_path)
        .with_context(|| format!("failed to read reference from {}", reference_path.display()))?;
    let mut aligner =
        BWTAligner::new(&reference).context("failed to initialize BWT aligner")?;

    let reader = BufReader::new(File::open(&reads_path).with_context(|| {
        format!("failed to open reads file {}", reads_path.display())
    })?);

    for (idx, line) in reader.lines().enumerate() {
        let read = line?.trim().to_string();
        if read.is_empty() {
            continue;
        }
        let result = aligner
            .align_read(read.as_bytes())
            .with_context(|| format!("alignment failed for read {}", idx + 1))?;

        println!(
            "read {}\tinterval=[{}, {})\twidth={}\tscore={:.2}\tmismatches={}",
            idx + 1,
            result.interval.lower,
            result.interval.upper,
            result.interval.width(),
            result.score,
            result.mismatches
        );
    }

    Ok(())
}

fn run_variants(
    reference_path: PathBuf,
    alignments_path: PathBuf,
    chrom: String,
    block_size: usize,
    quality_threshold: f32,
) -> Result<()> {
    let reference_vec = read_sequence_file(&reference_path).with_context(|| {
        format!(
            "failed to read reference from {}",
            reference_path.display()
        )
    })?;
    let reference = Arc::from(reference_vec.into_boxed_slice());
    let region_start = 0u32;

    let chrom_arc = Arc::from(chrom);
    let reads = read_alignment_file(&alignments_path, &chrom_arc)?;

    let mut caller = StreamingVariantCaller::new(
        Arc::clone(&chrom_arc),
        Arc::clone(&reference),
        region_start,
        block_size,
        quality_threshold,
        1e-6,
    )
    .context("failed to initialize variant caller")?;

    let variants = caller
        .call_variants(reads)
        .context("variant calling failed")?;

    if variants.is_empty() {
        println!("No variants detected above threshold.");
    } else {
        for variant in variants {
            print_variant(&variant);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_seeds(
    reference_path: PathBuf,
    scores_path: PathBuf,
    max_depth: u32,
    neg_len_limit: u32,
    consec_pos_req: u32,
    score_ratio_req: f32,
    threshold: Option<f32>,
    pvalue: f64,
    nu: f32,
    nullsc: f32,
    mu: f64,
    lambda: f64,
    max_length: Option<u32>,
) -> Result<()> {
    let reference = read_sequence_file(&reference_path)
        .with_context(|| format!("failed to read reference from {}", reference_path.display()))?;
    let scores = read_score_table(&scores_path)
        .with_context(|| format!("failed to read score table from {}", scores_path.display()))?;

    let model_len = scores.len() as u32;
    let model = SeedScoreModel::from_match_scores(scores).context("invalid score table")?;
    let config = SeedSearchConfig::new(max_depth, neg_len_limit, consec_pos_req, score_ratio_req)
        .context("invalid seed search configuration")?;

    let mut reversed = reference.clone();
    reversed.reverse();
    let index_forward =
        BlockedFMIndex::build(&reference, 64).context("failed to build forward FM-index")?;
    let index_backward =
        BlockedFMIndex::build(&reversed, 64).context("failed to build backward FM-index")?;

    let sc_thresh_fm = match threshold {
        Some(value) => value,
        None => fm_score_threshold(
            pvalue,
            max_length.unwrap_or(model_len),
            model_len,
            nu,
            nullsc,
            mu,
            lambda,
        ),
    };

    let seeds = find_seeds(&index_forward, &index_backward, &model, &config, sc_thresh_fm)
        .context("seed enumeration failed")?;

    if seeds.is_empty() {
        println!("No seeds above threshold {:.2}.", sc_thresh_fm);
    } else {
        for diagonal in &seeds {
            print_diagonal(diagonal);
        }
    }

    Ok(())
}

fn print_diagonal(diagonal: &Diagonal) {
    println!(
        "n={}\tk={}\tlength={}",
        diagonal.n, diagonal.k, diagonal.length
    );
}

fn read_score_table(path: &PathBuf) -> Result<Vec<[f32; 4]>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let mut row = [0f32; 4];
        for slot in &mut row {
            let field = fields
                .next()
                .ok_or_else(|| anyhow::anyhow!("expected 4 scores on line {}", line_no + 1))?;
            *slot = field
                .parse()
                .with_context(|| format!("invalid score '{}' on line {}", field, line_no + 1))?;
        }
        rows.push(row);
    }

    Ok(rows)
}

fn read_sequence_file(path: &PathBuf) -> Result<Vec<u8>> {
    let contents = std::fs::read_to_string(path)?;
    let sequence: String = contents
        .lines()
        .filter(|line| !line.starts_with('>') && !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("");
    Ok(sequence.trim().to_ascii_uppercase().into_bytes())
}

fn read_alignment_file(path: &PathBuf, chrom: &Arc<str>) -> Result<Vec<AlignedRead>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut reads = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let pos_str = fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing position on line {}", line_no + 1))?;
        let seq = fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing sequence on line {}", line_no + 1))?;

        let pos: u32 = pos_str.parse().with_context(|| {
            format!(
                "invalid position '{}' on line {}",
                pos_str,
                line_no + 1
            )
        })?;

        let sequence = seq.to_ascii_uppercase().into_bytes();
        let qualities = vec![30u8; sequence.len()];

        reads.push(AlignedRead::new(
            Arc::clone(chrom),
            pos,
            60,
            vec![CigarOp::new(CigarOpKind::Match, sequence.len() as u32)],
            sequence,
            qualities,
            false,
        ));
    }

    Ok(reads)
}

fn print_variant(variant: &Variant) {
    println!(
        "{}\t{}\t{}\t{}\tdepth={}\tAF={:.3}\tQUAL={:.2}",
        variant.chrom,
        variant.position,
        variant.reference as char,
        variant.alternate as char,
        variant.depth,
        variant.allele_fraction,
        variant.quality
    );
}

