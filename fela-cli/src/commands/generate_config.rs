//! Generate config command implementation

use crate::config::template;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Use the local hashing embedder and diagonal search
    #[arg(long)]
    pub offline: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating alignment configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, template(self.offline))
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Point [embedding] and [search] at your model server and search sidecar");
        println!("2. Validate your configuration:");
        println!("   fela validate -c {}", self.output.display());
        println!("3. Use it for alignment:");
        println!(
            "   fela align -s source.txt -t target.txt -c {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_file_parses() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("fela.toml");

        GenerateConfigArgs {
            output: output.clone(),
            offline: true,
        }
        .execute()
        .unwrap();

        let config = CliConfig::load(&output).unwrap();
        assert!(config.to_api_config().is_ok());
    }

    #[test]
    fn test_unwritable_output() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/fela.toml"),
            offline: false,
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
