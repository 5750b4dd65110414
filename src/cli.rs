use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropyield", version, about = "Crop yield prediction TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the prediction service endpoint
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test the prediction service connection
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "cropyield",
            "--endpoint",
            "http://10.0.0.5:8000/predict",
            "-vv",
            "check",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://10.0.0.5:8000/predict"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
