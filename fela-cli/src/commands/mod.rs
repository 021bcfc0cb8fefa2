//! CLI command implementations

use crate::config::CliConfig;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Args, Subcommand};
use fela_api::{Config, SplitMode, TargetIndexPolicy};
use std::path::PathBuf;

pub mod align;
pub mod batch;
pub mod generate_config;
pub mod normalize;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Align a source text with its translation
    Align(align::AlignArgs),

    /// Normalize raw segments against pre-split sentence files
    Normalize(normalize::NormalizeArgs),

    /// Split text into sentences
    Split(split::SplitArgs),

    /// Align many job files in parallel
    Batch(batch::BatchArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Align(args) => args.execute(),
            Commands::Normalize(args) => args.execute(),
            Commands::Split(args) => args.execute(),
            Commands::Batch(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List available target index policies
    Policies,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                for (format, description) in OutputFormat::ALL {
                    println!("  {:<10} {}", format.as_str(), description);
                }
            }
            ListCommands::Policies => {
                println!("Available target index policies:");
                println!(
                    "  {:<16} target_idx mirrors the row position (default)",
                    TargetIndexPolicy::RowPosition.as_str()
                );
                println!(
                    "  {:<16} target_idx is the assigned target sentence, or null",
                    TargetIndexPolicy::TargetSequence.as_str()
                );
            }
        }
        Ok(())
    }
}

/// `target_idx` policy as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    /// Mirror the row position
    RowPosition,
    /// Index of the assigned target sentence
    TargetSequence,
}

impl From<PolicyArg> for TargetIndexPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RowPosition => TargetIndexPolicy::RowPosition,
            PolicyArg::TargetSequence => TargetIndexPolicy::TargetSequence,
        }
    }
}

/// Split rule as a command-line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SplitArg {
    /// Terminal punctuation before a capital letter
    Punctuation,
    /// One sentence per non-blank line
    Lines,
}

impl From<SplitArg> for SplitMode {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Punctuation => SplitMode::Punctuation,
            SplitArg::Lines => SplitMode::Lines,
        }
    }
}

/// Backend and engine options shared by `align` and `batch`
#[derive(Debug, Args, Default)]
pub struct BackendArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the local hashing embedder and diagonal search
    #[arg(long)]
    pub offline: bool,

    /// Embedding model server URL
    #[arg(long, value_name = "URL", env = "FELA_EMBED_URL")]
    pub embed_url: Option<String>,

    /// Alignment search sidecar URL
    #[arg(long, value_name = "URL", env = "FELA_SEARCH_URL")]
    pub search_url: Option<String>,

    /// Largest segment size on either side
    #[arg(long, value_name = "N")]
    pub max_align: Option<usize>,

    /// How target_idx is populated
    #[arg(long, value_enum)]
    pub target_index: Option<PolicyArg>,

    /// Sentence splitting rule
    #[arg(long, value_enum)]
    pub split: Option<SplitArg>,

    /// End-to-end ceiling per document pair, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl BackendArgs {
    /// Load the config file and apply command-line overrides
    pub fn load(&self) -> Result<(CliConfig, Config)> {
        let mut file = CliConfig::load_or_default(self.config.as_deref())?;

        if self.offline {
            file.make_offline();
        }
        if let Some(url) = &self.embed_url {
            file.embedding.endpoint = url.clone();
        }
        if let Some(url) = &self.search_url {
            file.search.endpoint = url.clone();
        }
        if let Some(max_align) = self.max_align {
            file.alignment.max_align = max_align;
        }
        if let Some(policy) = self.target_index {
            file.alignment.target_index = policy.into();
        }
        if let Some(split) = self.split {
            file.alignment.split_mode = split.into();
        }
        if let Some(timeout) = self.timeout {
            file.alignment.timeout_secs = timeout;
        }

        let config = file.to_api_config()?;
        log::debug!(
            "embedding backend: {}, search backend: {}",
            config.embedding().name(),
            config.search().name()
        );
        Ok((file, config))
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second initialization in the same process is a no-op
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Output format from the flag, else from the config file
pub(crate) fn resolve_format(flag: Option<OutputFormat>, file: &CliConfig) -> Result<OutputFormat> {
    match flag {
        Some(format) => Ok(format),
        None => OutputFormat::parse(&file.output.format).ok_or_else(|| {
            crate::CliError::ConfigError(format!("unknown output format '{}'", file.output.format))
                .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmbeddingBackendKind, SearchBackendKind};

    #[test]
    fn test_offline_flag_overrides_backends() {
        let args = BackendArgs {
            offline: true,
            max_align: Some(3),
            target_index: Some(PolicyArg::TargetSequence),
            ..BackendArgs::default()
        };
        let (file, config) = args.load().unwrap();
        assert_eq!(file.embedding.backend, EmbeddingBackendKind::Hashing);
        assert_eq!(file.search.backend, SearchBackendKind::Diagonal);
        assert_eq!(config.num_overlaps(), 2);
        assert_eq!(config.engine().target_index, TargetIndexPolicy::TargetSequence);
    }

    #[test]
    fn test_url_overrides() {
        let args = BackendArgs {
            embed_url: Some("http://embed:9000".to_string()),
            search_url: Some("http://search:9001".to_string()),
            ..BackendArgs::default()
        };
        let (file, _) = args.load().unwrap();
        assert_eq!(file.embedding.endpoint, "http://embed:9000");
        assert_eq!(file.search.endpoint, "http://search:9001");
    }

    #[test]
    fn test_bad_max_align_rejected() {
        let args = BackendArgs {
            offline: true,
            max_align: Some(1),
            ..BackendArgs::default()
        };
        assert!(args.load().is_err());

        let args = BackendArgs {
            offline: true,
            max_align: Some(1_000_000),
            ..BackendArgs::default()
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn test_resolve_format() {
        let file = CliConfig::default();
        assert_eq!(resolve_format(None, &file).unwrap(), OutputFormat::Text);
        assert_eq!(
            resolve_format(Some(OutputFormat::Tsv), &file).unwrap(),
            OutputFormat::Tsv
        );

        let mut file = CliConfig::default();
        file.output.format = "yaml".to_string();
        assert!(resolve_format(None, &file).is_err());
    }
}
