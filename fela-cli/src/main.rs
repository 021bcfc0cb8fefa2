//! Fela command-line entry point

use clap::Parser;
use fela_cli::commands::Commands;
use fela_cli::CliResult;

/// Bilingual sentence alignment
#[derive(Debug, Parser)]
#[command(name = "fela", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align() {
        let cli = Cli::try_parse_from([
            "fela", "align", "-s", "en.txt", "-t", "de.txt", "--offline", "-f", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Align(args) => {
                assert_eq!(args.source, "en.txt");
                assert!(args.backend.offline);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
