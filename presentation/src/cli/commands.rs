//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// System prompt used when `--system` is not given
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// CLI arguments for notegpt
#[derive(Parser, Debug)]
#[command(name = "notegpt")]
#[command(author, version, about = "Stream a chat completion into a Markdown note")]
#[command(long_about = r#"
notegpt sends a prompt to an OpenAI-compatible chat completions endpoint and
streams the reply into a Markdown document as it arrives.

The reply is framed by an assistant heading before the first fragment and a
user heading after the last one, so the document reads as a conversation you
can keep appending to.

Without --prompt, the document's current content is sent as the user message.

Configuration files are loaded from (in priority order):
1. NOTEGPT_<SECTION>__<KEY>               Environment variables
2. --config <path>                        Explicit config file
3. ./notegpt.toml                         Project-level config
4. ~/.config/notegpt/config.toml          Global config

Example:
  notegpt notes/today.md
  notegpt notes/today.md -p "Summarize the meeting notes above"
  notegpt notes/today.md -m gpt-4o -s "You are a terse reviewer"
"#)]
pub struct Cli {
    /// Markdown document the reply is appended to
    #[arg(value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,

    /// User message to send (defaults to the document's content)
    #[arg(short, long, value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// System message sent before the user message
    #[arg(short, long, value_name = "SYSTEM")]
    pub system: Option<String>,

    /// Model to use (overrides the configured model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn system_prompt(&self) -> &str {
        self.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "notegpt",
            "notes/today.md",
            "-p",
            "Say hi",
            "-s",
            "Be brief",
            "-m",
            "gpt-4o",
            "-vv",
            "--quiet",
            "--config",
            "custom.toml",
        ]);

        assert_eq!(cli.document, Some(PathBuf::from("notes/today.md")));
        assert_eq!(cli.prompt.as_deref(), Some("Say hi"));
        assert_eq!(cli.system_prompt(), "Be brief");
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(!cli.no_config);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["notegpt", "note.md"]);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_show_config_without_document() {
        let cli = Cli::parse_from(["notegpt", "--show-config"]);
        assert!(cli.show_config);
        assert_eq!(cli.document, None);
    }
}
