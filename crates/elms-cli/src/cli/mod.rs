use std::path::PathBuf;

use clap::Parser;
use elms_config::ElmsConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `elms` binary.
#[derive(Debug, Parser)]
#[command(name = "elms", version, about = "ELMS 3.0 metadata form tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, raw (defaults to `output.format` from config)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Schema document to use instead of the configured or bundled one
    #[arg(short, long, global = true)]
    pub schema: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Flags for command handlers, with config filling what was not given.
    #[must_use]
    pub fn global_flags(&self, config: &ElmsConfig) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or_else(|| config.output.format.into()),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use elms_config::ElmsConfig;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "elms",
            "--format",
            "json",
            "--schema",
            "custom.json",
            "--verbose",
            "schema",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.schema.as_deref(), Some(Path::new("custom.json")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["elms", "render", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["elms", "--format", "table", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn format_falls_back_to_config() {
        let cli = Cli::try_parse_from(["elms", "schema"]).expect("cli should parse");
        let mut config = ElmsConfig::default();
        assert_eq!(cli.global_flags(&config).format, OutputFormat::Text);

        config.output.format = elms_config::OutputFormat::Raw;
        assert_eq!(cli.global_flags(&config).format, OutputFormat::Raw);

        let cli = Cli::try_parse_from(["elms", "-f", "json", "schema"]).expect("cli should parse");
        assert_eq!(cli.global_flags(&config).format, OutputFormat::Json);
    }
}
