//! Validate command implementation

use super::resolve_format;
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match self.check() {
            Ok(summary) => {
                println!("✓ Configuration is valid!");
                for line in summary {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }

    fn check(&self) -> Result<Vec<String>> {
        let file = CliConfig::load(&self.config)?;
        let format = resolve_format(None, &file)?;
        let config = file.to_api_config()?;

        Ok(vec![
            format!("Max align: {}", file.alignment.max_align),
            format!("Overlap windows: {}", config.num_overlaps()),
            format!("Embedding backend: {}", config.embedding().name()),
            format!("Search backend: {}", config.search().name()),
            format!("Timeout: {}s", config.timeout().as_secs()),
            format!("Output format: {}", format.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            config: PathBuf::from("fela.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("fela.toml"));
    }

    #[test]
    fn test_validate_valid_config() {
        let file = config_file(&crate::config::template(true));
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let file = config_file("[alignment]\nmax_align = 1\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let file = config_file("[output]\nformat = \"yaml\"\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/fela.toml"),
        };
        assert!(args.execute().is_err());
    }
}
