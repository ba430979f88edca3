//! Main app runner

use std::env;
use std::process::ExitCode;

use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::LibraryStore;
use crate::domain::config::AppConfig;
use crate::domain::search::SearchRanker;
use crate::infrastructure::{FsMediaIndex, JsonSnapshotStore, XdgConfigStore};

use super::args::{Cli, Commands};
use super::config_cmd::handle_config_command;
use super::error::CliError;
use super::library_cmd::handle_library_command;
use super::presenter::Presenter;

/// Environment variable overriding the library directory
pub const LIBRARY_ENV: &str = "AUDIO_SHELF_LIBRARY";

/// Run one invocation and map the outcome to an exit code
pub async fn run(cli: Cli) -> ExitCode {
    let presenter = Presenter::new();
    let Cli {
        library,
        data,
        config_file,
        command,
        ..
    } = cli;

    let config_store = match config_file {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    let result = match command {
        Commands::Config { action } => handle_config_command(action, &config_store, &presenter)
            .await
            .map_err(CliError::from),
        command => {
            let threshold = match &command {
                Commands::Search(args) => args.threshold,
                _ => None,
            };
            let cli_config = AppConfig {
                library_dir: library,
                data_file: data,
                search_threshold: threshold,
            };
            let config = load_merged_config(&config_store, cli_config).await;
            run_library_command(command, &config, &presenter).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    let env_config = AppConfig {
        library_dir: env::var(LIBRARY_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Open the library, bring it up to date, run the command and write the
/// final state.
async fn run_library_command(
    command: Commands,
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<(), CliError> {
    let library_dir = config.library_dir_or_default();
    let data_file = config.data_file_or_default();
    debug!(
        library = %library_dir.display(),
        data = %data_file.display(),
        "opening library"
    );

    let media = FsMediaIndex::new(library_dir);
    let store = JsonSnapshotStore::new(data_file);
    let ranker = SearchRanker::new(config.search_threshold_or_default());
    let mut library = LibraryStore::open(media, store, ranker).await;

    if let Err(e) = library.reload().await {
        library.close().await;
        return Err(e.into());
    }
    // `verify` runs the pass itself so it can report the result
    if !matches!(command, Commands::Verify) {
        library.verify();
    }

    let result = handle_library_command(command, &mut library, presenter).await;
    library.close().await;
    result
}
