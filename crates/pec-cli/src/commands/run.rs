//! `run` CLI command
//!
//! Generates Gaussian blobs, drives a progressive ensemble to completion and
//! writes one line per round to stdout.
//!
//! # Configuration
//!
//! Ensemble parameters come from `--config FILE` (TOML, see
//! [`EnsembleConfig`]) when given, otherwise from defaults. Individual flags
//! override either source.
//!
//! # Output
//!
//! - `text`: a human-readable line per round
//! - `json`: one JSON object per round (JSON lines); the final round also
//!   carries the consensus labels
//!
//! # Exit Codes
//! - 0: Success
//! - 1: Configuration error
//! - 2: State or internal failure

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{debug, error, info};

use pec_core::config::constants::blobs::{
    DEFAULT_CLUSTER_STD, DEFAULT_N_CENTERS, DEFAULT_N_FEATURES, DEFAULT_N_SAMPLES, DEFAULT_SEED,
};
use pec_core::consensus::{
    ConsensusMetrics, ConsensusPolicy, InertiaConsensus, PartialResult, PartialResultInfo,
    VotingConsensus,
};
use pec_core::synthetic::{make_blobs, BlobsConfig};
use pec_core::{EnsembleConfig, InitStrategy, PecError, ProgressiveEnsembleClustering, Result};

use crate::error::CliExitCode;

/// Consensus policy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PolicyName {
    /// Labels of the lowest-inertia run
    #[default]
    Inertia,
    /// Majority vote over label-aligned runs
    Vote,
}

/// Output format for round lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary per round
    #[default]
    Text,
    /// One JSON object per round
    Json,
}

/// Arguments for the `run` command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// TOML file with ensemble settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of clusters (defaults to --centers)
    #[arg(short = 'k', long)]
    pub clusters: Option<usize>,

    /// Number of independent runs
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Per-run iteration cap
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Centroid-shift convergence tolerance
    #[arg(long)]
    pub tol: Option<f64>,

    /// Master seed for the ensemble
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initialization strategy (random, k-means++)
    #[arg(long)]
    pub init: Option<String>,

    /// Consensus policy
    #[arg(long, value_enum, default_value_t = PolicyName::Inertia)]
    pub policy: PolicyName,

    /// Step runs in parallel within each round
    #[arg(long)]
    pub parallel: bool,

    /// Number of generated points
    #[arg(long, default_value_t = DEFAULT_N_SAMPLES)]
    pub samples: usize,

    /// Number of generated blobs
    #[arg(long, default_value_t = DEFAULT_N_CENTERS)]
    pub centers: usize,

    /// Dimensionality of generated points
    #[arg(long, default_value_t = DEFAULT_N_FEATURES)]
    pub features: usize,

    /// Standard deviation of every blob
    #[arg(long, default_value_t = DEFAULT_CLUSTER_STD)]
    pub spread: f64,

    /// Seed for data generation
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub data_seed: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Rounds produced, including the last one
    pub rounds: usize,
    /// Run selected by the final round's consensus
    pub best_run: usize,
    /// Consensus inertia of the final round
    pub inertia: f64,
}

/// One JSON line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundRecord<'a, M: Serialize> {
    #[serde(flatten)]
    info: &'a PartialResultInfo,
    metrics: &'a M,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<&'a [usize]>,
}

/// Execute the run command, returning the process exit code.
pub fn run_command(args: RunArgs) -> i32 {
    debug!("run_command: args={:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(&args, &mut out) {
        Ok(summary) => {
            info!(
                rounds = summary.rounds,
                best_run = summary.best_run,
                inertia = summary.inertia,
                "run: ensemble completed"
            );
            CliExitCode::Success.into()
        }
        Err(e) => {
            error!(error = %e, "run: failed");
            eprintln!("error: {}", e);
            CliExitCode::from(&e).into()
        }
    }
}

/// Build the configuration and data, then drive the selected policy.
pub fn execute<W: Write>(args: &RunArgs, out: &mut W) -> Result<RunSummary> {
    let config = resolve_config(args)?;
    let blobs = make_blobs(&BlobsConfig {
        n_samples: args.samples,
        n_centers: args.centers,
        n_features: args.features,
        cluster_std: args.spread,
        seed: args.data_seed,
        ..Default::default()
    })?;

    info!(
        n_samples = args.samples,
        n_centers = args.centers,
        n_features = args.features,
        policy = ?args.policy,
        "run: generated blobs"
    );

    match args.policy {
        PolicyName::Inertia => drive(
            ProgressiveEnsembleClustering::new(blobs.data, config, InertiaConsensus)?,
            args.format,
            out,
        ),
        PolicyName::Vote => drive(
            ProgressiveEnsembleClustering::new(blobs.data, config, VotingConsensus)?,
            args.format,
            out,
        ),
    }
}

/// Config file (or defaults) with command-line overrides applied.
pub fn resolve_config(args: &RunArgs) -> Result<EnsembleConfig> {
    let mut config = match &args.config {
        Some(path) => EnsembleConfig::from_toml_file(path)?,
        None => EnsembleConfig::new(args.centers),
    };

    if let Some(k) = args.clusters {
        config.n_clusters = k;
    }
    if let Some(r) = args.runs {
        config.n_runs = r;
    }
    if let Some(max_iter) = args.max_iter {
        config.max_iter = max_iter;
    }
    if let Some(tol) = args.tol {
        config.tol = tol;
    }
    if let Some(seed) = args.seed {
        config.random_state = Some(seed);
    }
    if let Some(name) = &args.init {
        config.init = InitStrategy::from_name(name)?;
    }
    if args.parallel {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn drive<C, W>(
    mut ensemble: ProgressiveEnsembleClustering<C>,
    format: OutputFormat,
    out: &mut W,
) -> Result<RunSummary>
where
    C: ConsensusPolicy,
    W: Write,
{
    let mut summary = None;
    for result in ensemble.rounds() {
        let result = result?;
        write_round(&result, format, out)
            .map_err(|e| PecError::internal(format!("failed to write round: {}", e)))?;
        summary = Some(RunSummary {
            rounds: result.iteration(),
            best_run: result.info().best_run,
            inertia: result.metrics().inertia(),
        });
    }
    out.flush()
        .map_err(|e| PecError::internal(format!("failed to flush output: {}", e)))?;
    summary.ok_or_else(|| PecError::internal("ensemble produced no rounds"))
}

fn write_round<M, W>(result: &PartialResult<M>, format: OutputFormat, out: &mut W) -> io::Result<()>
where
    M: ConsensusMetrics,
    W: Write,
{
    let info = result.info();
    match format {
        OutputFormat::Text => writeln!(
            out,
            "round {:>4}  best_run={:<3} inertia={:<14.6} runs={:?} elapsed={:.3}ms{}",
            info.iteration,
            info.best_run,
            result.metrics().inertia(),
            info.run_iteration,
            info.elapsed_time * 1e3,
            if info.is_last { "  [last]" } else { "" }
        ),
        OutputFormat::Json => {
            let record = RoundRecord {
                info,
                metrics: result.metrics(),
                labels: info.is_last.then(|| result.labels()),
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)
        }
    }
}
