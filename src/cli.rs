//! CLI definitions for tabwise.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tabwise CLI.
#[derive(Parser)]
#[command(name = "tabwise")]
#[command(about = "Group browser tabs with an LLM")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.tabwise/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tab session file, overriding `storage.session_path`
    #[arg(short, long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Let the provider group all open tabs
    Auto,

    /// Group all open tabs following your instructions
    Custom {
        /// Grouping instructions, e.g. "separate work from personal"
        prompt: String,
    },

    /// Remove every tab from its group
    Ungroup,

    /// Check that the configured provider accepts its credentials
    Test,

    /// Store credentials for a provider and select it
    Configure {
        #[command(subcommand)]
        provider: ConfigureProvider,
    },

    /// Forget stored credentials
    ClearCredentials,

    /// Show provider selection and session summary
    Status,
}

#[derive(Subcommand)]
pub(crate) enum ConfigureProvider {
    /// Anthropic models on AWS Bedrock
    Bedrock {
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key_id: String,

        #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
        secret_access_key: String,

        /// Session token for temporary credentials
        #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
        session_token: Option<String>,

        #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
        region: String,

        #[arg(long)]
        model_id: Option<String>,
    },

    /// Google Gemini
    Gemini {
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long)]
        model: Option<String>,
    },

    /// OpenAI-compatible local server (Ollama, LM Studio, ...)
    Local {
        /// Base URL, e.g. http://localhost:11434/v1
        #[arg(long)]
        endpoint: String,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_custom_with_session() {
        let cli = Cli::try_parse_from(["tabwise", "--session", "/tmp/s.json", "custom", "by project"]).unwrap();
        assert_eq!(cli.session, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Commands::Custom { prompt } => assert_eq!(prompt, "by project"),
            _ => panic!("Expected Custom"),
        }
    }

    #[test]
    fn test_parse_configure_local() {
        let cli = Cli::try_parse_from([
            "tabwise",
            "configure",
            "local",
            "--endpoint",
            "http://localhost:11434/v1",
            "--model",
            "llama3.2",
        ])
        .unwrap();
        match cli.command {
            Commands::Configure {
                provider: ConfigureProvider::Local { endpoint, api_key, model },
            } => {
                assert_eq!(endpoint, "http://localhost:11434/v1");
                assert!(api_key.is_none());
                assert_eq!(model.as_deref(), Some("llama3.2"));
            }
            _ => panic!("Expected Configure Local"),
        }
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["tabwise"]).is_err());
    }
}
