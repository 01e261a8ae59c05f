//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Model requested when `--model` is not given, matching the hosted
/// provider's current fast tier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Top-level CLI parser for `codewave`.
#[derive(Debug, Parser)]
#[command(name = "codewave", version, about = "Generate project code from a prompt")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a project from a prompt, print it, and optionally export it.
    Generate {
        /// Natural-language description of what to build.
        prompt: String,
        /// Write the generated files under this directory.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Model identifier to request.
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
    /// Start an interactive project session.
    Session {
        /// Model identifier to request.
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_generate_subcommand() {
        let cli = Cli::parse_from(["codewave", "generate", "a todo app"]);
        let Command::Generate { prompt, out, model } = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(prompt, "a todo app");
        assert!(out.is_none());
        assert_eq!(model, super::DEFAULT_MODEL);
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::parse_from([
            "codewave",
            "generate",
            "a todo app",
            "--out",
            "dist",
            "--model",
            "other-model",
        ]);
        let Command::Generate { out, model, .. } = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(out.unwrap(), std::path::PathBuf::from("dist"));
        assert_eq!(model, "other-model");
    }

    #[test]
    fn parses_session_subcommand() {
        let cli = Cli::parse_from(["codewave", "session"]);
        assert!(matches!(cli.command, Command::Session { .. }));
    }

    #[test]
    fn generate_requires_a_prompt() {
        assert!(Cli::try_parse_from(["codewave", "generate"]).is_err());
    }
}
