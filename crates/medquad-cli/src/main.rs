//! MedQuAD — DF-QuAD strength evaluation for biomedical claim graphs.
//! Entry point for the `medquad` binary.

mod cache;
mod cli;
mod config;
mod input;
mod report;

use anyhow::Context;
use clap::Parser;
use medquad_common::MedquadConfig;
use medquad_engine::ArgumentGraphEvaluator;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cache::MemoizedEvaluator;
use crate::cli::{Cli, Command};
use crate::input::LoadedInput;
use crate::report::{InputReport, RunReport};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medquad=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::resolve(&cli)?;
    info!(
        "Configuration loaded. max_iterations: {}, epsilon: {}",
        config.evaluation.max_iterations, config.evaluation.epsilon
    );

    match &cli.command {
        Command::Relations { files } => {
            let inputs = load_all(files, |p| input::load_relations(p, &config.relations.claim_id))?;
            evaluate(&config, &inputs)
        }
        Command::Graph { files } => {
            let inputs = load_all(files, input::load_graph)?;
            evaluate(&config, &inputs)
        }
        Command::Check { graph, files } => {
            let inputs = if *graph {
                load_all(files, input::load_graph)?
            } else {
                load_all(files, |p| input::load_relations(p, &config.relations.claim_id))?
            };
            for input in &inputs {
                println!(
                    "ok {} ({} arguments, {} relations, {})",
                    input.source.display(),
                    input.graph.len(),
                    input.graph.edge_count(),
                    input.graph.content_digest()
                );
            }
            Ok(())
        }
    }
}

fn load_all<F>(files: &[PathBuf], load: F) -> anyhow::Result<Vec<LoadedInput>>
where
    F: Fn(&std::path::Path) -> anyhow::Result<LoadedInput>,
{
    files.iter().map(|p| load(p)).collect()
}

fn evaluate(config: &MedquadConfig, inputs: &[LoadedInput]) -> anyhow::Result<()> {
    let evaluator = ArgumentGraphEvaluator::new(config.evaluation)
        .context("Invalid evaluation settings")?
        .with_batch(config.batch);
    let mut memo = MemoizedEvaluator::new(evaluator, config.cache.capacity);

    let graphs: Vec<_> = inputs.iter().map(|i| &i.graph).collect();
    let evaluations = memo.evaluate_all(&graphs);

    let converged = evaluations.iter().filter(|e| e.converged()).count();
    info!(
        "Evaluated {} graphs ({} converged, {} cache hits)",
        evaluations.len(),
        converged,
        memo.hits()
    );

    let reports = inputs
        .iter()
        .zip(&evaluations)
        .map(|(input, eval)| InputReport::new(input, eval, &config.output))
        .collect();
    let report = RunReport::new(config.evaluation, reports);
    println!("{}", report.render(config.output.format)?);
    Ok(())
}
