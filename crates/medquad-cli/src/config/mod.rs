//! Configuration resolution for the `medquad` binary.
//! Loads the file configuration and applies command-line overrides.

use anyhow::Context;
use medquad_common::MedquadConfig;

use crate::cli::Cli;


/// Load configuration and apply `--format`, `--max-iterations` and `--epsilon`.
pub fn resolve(cli: &Cli) -> anyhow::Result<MedquadConfig> {
    let mut config = MedquadConfig::load(cli.config.as_deref())
        .context("Could not load medquad configuration")?;
    apply_overrides(&mut config, cli);
    config.validate().context("Invalid configuration after command-line overrides")?;
    Ok(config)
}

fn apply_overrides(config: &mut MedquadConfig, cli: &Cli) {
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.evaluation.max_iterations = max_iterations;
    }
    if let Some(epsilon) = cli.epsilon {
        config.evaluation.epsilon = epsilon;
    }
}
