//! Command implementations.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use hsk_coverage_core::config::{Config, ConfigSources};
use hsk_coverage_core::{TrackedSet, Word, vocab};

pub mod coverage;
pub mod export;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod stats;

/// Input files shared by the statistics commands.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Word list JSON file (defaults to `words_file` from config).
    #[arg(short, long, value_name = "FILE")]
    pub words: Option<Utf8PathBuf>,

    /// Tracked words JSON file (defaults to `tracked_file` from config).
    #[arg(short, long, value_name = "FILE")]
    pub tracked: Option<Utf8PathBuf>,
}

/// Everything a statistics command needs besides its own flags.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    /// Loaded configuration.
    pub config: &'a Config,
    /// Where the configuration came from; relative config paths resolve against it.
    pub sources: &'a ConfigSources,
    /// Input size limit, `None` when disabled.
    pub max_input_bytes: Option<usize>,
}

impl RunContext<'_> {
    /// Load the word list and tracked set named by `args` or the configuration.
    ///
    /// A missing tracked file yields an empty set; a missing word list is an error.
    pub fn load_inputs(&self, args: &InputArgs) -> anyhow::Result<(Vec<Word>, TrackedSet)> {
        let Some(words_path) = self.resolve(args.words.as_ref(), self.config.words_file.as_ref())
        else {
            bail!("no word list given: pass --words or set words_file in the configuration");
        };
        ensure_input_size(&words_path, self.max_input_bytes)?;
        let words = vocab::load_words(&words_path)
            .with_context(|| format!("failed to load word list {words_path}"))?;

        let tracked = match self.resolve(args.tracked.as_ref(), self.config.tracked_file.as_ref()) {
            Some(path) => {
                ensure_input_size(&path, self.max_input_bytes)?;
                vocab::load_tracked(&path)
                    .with_context(|| format!("failed to load tracked words {path}"))?
            }
            None => {
                tracing::debug!("no tracked file given, using an empty set");
                TrackedSet::new()
            }
        };

        Ok((words, tracked))
    }

    /// Command-line paths are used as given; config paths are relative to the config file.
    fn resolve(
        &self,
        flag: Option<&Utf8PathBuf>,
        configured: Option<&Utf8PathBuf>,
    ) -> Option<Utf8PathBuf> {
        if let Some(path) = flag {
            return Some(path.clone());
        }
        let path = configured?;
        match self.sources.primary_dir() {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }
}

/// Validate a file's size against the configured limit before it is read.
pub fn ensure_input_size(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<()> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }
    Ok(())
}
