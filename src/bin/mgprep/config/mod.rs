use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use molgraph_prep::io::read_vocabulary;
use molgraph_prep::{BondVocabulary, PrepConfig};

use crate::cli::PrepOptions;

/// Starts from the TOML file (or defaults) and applies command-line overrides.
pub fn build_prep_config(opts: &PrepOptions) -> Result<PrepConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            PrepConfig::from_toml(&source)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => PrepConfig::default(),
    };

    if opts.no_self_loop {
        config.self_loop = false;
    }
    if let Some(policy) = opts.policy {
        config.policy = policy.into();
    }
    if let Some(order) = opts.label_order {
        config.label_order = order.into();
    }

    Ok(config)
}

pub fn load_vocabulary(path: Option<&Path>) -> Result<Option<BondVocabulary>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open vocabulary file: {}", path.display()))?;
    let vocabulary = read_vocabulary(BufReader::new(file))
        .with_context(|| format!("Failed to load bond vocabulary from {}", path.display()))?;
    Ok(Some(vocabulary))
}

pub fn configure_threads(threads: Option<usize>) -> Result<()> {
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }
    Ok(())
}
