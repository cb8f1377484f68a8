//! tabwise - LLM-assisted browser tab grouping
//!
//! Main entry point for the tabwise CLI.

mod cli;
mod factory;
mod settings;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tabwise_config::{Config, ConfigLoader, ConfigValidator, FileConfigStore, LoggingSettings};
use tabwise_protocols::store::{ConfigStore, TabStore};
use tabwise_protocols::types::{
    BedrockCredentials, Credentials, GeminiCredentials, LocalCredentials,
};
use tabwise_runtime::{GroupingResponse, TabGrouper};
use tabwise_tabstore_json::JsonTabStore;

use crate::cli::{Cli, Commands, ConfigureProvider};
use crate::factory::DefaultProviderFactory;
use crate::settings::{default_config_path, expand, grouping_settings, local_reachability_timeout};

fn init_tracing(logging: &LoggingSettings) -> Result<(), Box<dyn Error>> {
    let log_dir = expand(&logging.directory);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tabwise")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // stdout carries the JSON response, so the console layer uses stderr.
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = ConfigLoader::load_or_default(&config_path)?;
    init_tracing(&config.logging)?;
    check_config(&config, &config_path)?;

    let configs = Arc::new(FileConfigStore::new(expand(&config.storage.credentials_path)));
    let session_path = cli
        .session
        .clone()
        .unwrap_or_else(|| expand(&config.storage.session_path));
    debug!("Using credentials {:?}, session {:?}", configs.path(), session_path);

    let response = match cli.command {
        Commands::Auto => {
            build_grouper(&config, &session_path, configs).await?.auto_group().await
        }
        Commands::Custom { prompt } => {
            build_grouper(&config, &session_path, configs)
                .await?
                .custom_group(&prompt)
                .await
        }
        Commands::Ungroup => {
            build_grouper(&config, &session_path, configs).await?.ungroup_all().await
        }
        Commands::Test => {
            build_grouper(&config, &session_path, configs).await?.test_connection().await
        }
        Commands::Configure { provider } => configure(&configs, provider).await?,
        Commands::ClearCredentials => {
            configs.clear_credentials().await?;
            info!("Cleared stored credentials");
            message("Stored credentials cleared")
        }
        Commands::Status => {
            print_status(&configs, &session_path).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.success {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("{}", response.message);
        Ok(ExitCode::FAILURE)
    }
}

fn check_config(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if result.is_valid() {
        return Ok(());
    }
    for err in &result.errors {
        error!("Config {}: {}", err.path, err.message);
    }
    Err(format!(
        "Invalid configuration in {}: {} error(s)",
        path.display(),
        result.errors.len()
    )
    .into())
}

async fn build_grouper(
    config: &Config,
    session_path: &Path,
    configs: Arc<FileConfigStore>,
) -> Result<TabGrouper, Box<dyn Error>> {
    let tabs = Arc::new(JsonTabStore::open(session_path).await?);
    let factory = Arc::new(DefaultProviderFactory::new(local_reachability_timeout(config)));
    Ok(TabGrouper::new(tabs, configs, factory, grouping_settings(config)))
}

async fn configure(
    configs: &FileConfigStore,
    provider: ConfigureProvider,
) -> Result<GroupingResponse, Box<dyn Error>> {
    let credentials = match provider {
        ConfigureProvider::Bedrock {
            access_key_id,
            secret_access_key,
            session_token,
            region,
            model_id,
        } => Credentials::Bedrock(BedrockCredentials {
            access_key_id,
            secret_access_key,
            session_token: session_token.filter(|t| !t.is_empty()),
            region,
            model_id,
        }),
        ConfigureProvider::Gemini { api_key, model } => {
            Credentials::Gemini(GeminiCredentials { api_key, model })
        }
        ConfigureProvider::Local {
            endpoint,
            api_key,
            model,
        } => {
            // Surface a bad endpoint now rather than on the first request.
            tabwise_provider_local::check_endpoint(&endpoint)?;
            Credentials::Local(LocalCredentials {
                endpoint,
                api_key,
                model,
            })
        }
    };

    let kind = credentials.kind();
    configs.save_credentials(kind, credentials).await?;
    info!("Saved {} credentials to {:?}", kind, configs.path());
    Ok(message(&format!(
        "Saved {} credentials to {}",
        kind,
        configs.path().display()
    )))
}

async fn print_status(configs: &FileConfigStore, session_path: &Path) -> Result<(), Box<dyn Error>> {
    let config = configs.get_config().await?;
    let tabs = JsonTabStore::open(session_path).await?;
    let tab_list = tabs.list_tabs().await?;
    let groups = tabs.list_groups().await?;

    let status = json!({
        "provider": config.provider,
        "configured": config.configured,
        "hasCredentials": config.credentials.is_some(),
        "credentialsPath": configs.path(),
        "sessionPath": session_path,
        "tabs": tab_list.len(),
        "groupedTabs": tab_list.iter().filter(|t| t.is_grouped()).count(),
        "groups": groups.len(),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn message(text: &str) -> GroupingResponse {
    GroupingResponse {
        success: true,
        message: text.to_string(),
        data: None,
        retryable: None,
    }
}
