// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use readingjourney_config::{Config, ConfigManager, LogLevel};
use readingjourney_core::StatusLabels;
use readingjourney_database::{BookStore, DatabaseConfig, InitReport};
use std::io;
use std::path::PathBuf;

mod commands;
mod display;
mod menu;

fn build_cli() -> Command {
    Command::new("reading-journey")
        .version("0.1.0")
        .author("Reading Journey Contributors")
        .about("Keep track of the books you want to read, are reading, and have finished")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the database file (overrides the config file)")
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .arg(
            Arg::new("labels")
                .long("labels")
                .value_name("PRESET")
                .help("Status labels to store (overrides the config file)")
                .value_parser(["english", "spanish"])
                .global(true),
        )
        .subcommand(Command::new("menu").about("Interactive menu (the default)"))
        .subcommand(Command::new("init").about("Create the database and sample books if missing"))
        .subcommand(Command::new("list").about("List all books"))
        .subcommand(
            Command::new("add")
                .about("Add a new book")
                .arg(Arg::new("title").required(true).value_name("TITLE").help("Book title"))
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Book author"))
                .arg(
                    Arg::new("status")
                        .short('s')
                        .long("status")
                        .value_name("STATUS")
                        .help("Reading status (defaults to pending)"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Change the reading status of a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID"))
                .arg(Arg::new("status").required(true).value_name("STATUS").help("New status")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book ID")),
        )
        .subcommand(
            Command::new("config")
                .about("Show the configuration in effect")
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write a default config file if none exists")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    let manager = match matches.get_one::<String>("config-dir") {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    };
    manager.context("Failed to locate configuration directory")
}

/// Applies command-line overrides on top of the loaded configuration
fn store_settings(matches: &ArgMatches, config: &Config) -> (DatabaseConfig, StatusLabels) {
    let path = matches
        .get_one::<String>("database")
        .cloned()
        .unwrap_or_else(|| config.app.database_path.to_string_lossy().into_owned());

    let labels = match matches.get_one::<String>("labels").map(|s| s.as_str()) {
        Some("spanish") => StatusLabels::spanish(),
        Some(_) => StatusLabels::english(),
        None => config.status.labels(),
    };

    (DatabaseConfig::new(path).with_wal(config.app.enable_wal), labels)
}

async fn run(store: &BookStore, report: InitReport, matches: &ArgMatches) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    commands::report_init(store, report, &mut out)?;

    match matches.subcommand() {
        Some(("init", _)) => commands::show_summary(store, &mut out).await,
        Some(("list", _)) => commands::list_books(store, &mut out).await,
        Some(("add", sub_matches)) => commands::add_book(store, sub_matches, &mut out).await,
        Some(("status", sub_matches)) => {
            commands::update_status(store, sub_matches, &mut out).await
        }
        Some(("delete", sub_matches)) => commands::delete_book(store, sub_matches, &mut out).await,
        _ => {
            let stdin = io::stdin();
            menu::run(store, stdin.lock(), &mut out).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    let loaded = manager.load();
    let level = loaded
        .as_ref()
        .map(|config| config.app.log_level)
        .unwrap_or(LogLevel::Warn);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    if let Some(("config", sub_matches)) = matches.subcommand() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return commands::show_config(&manager, &config, sub_matches.get_flag("init"), &mut out);
    }

    let (db_config, labels) = store_settings(&matches, &config);
    let (store, report) = BookStore::open_initialized(db_config, labels)
        .await
        .context("Failed to initialize database")?;

    let result = run(&store, report, &matches).await;
    store.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_database_flag_overrides_config() {
        let matches = build_cli().get_matches_from(["reading-journey", "-d", "other.db", "list"]);
        let (db, labels) = store_settings(&matches, &Config::default());

        assert_eq!(db.path, "other.db");
        assert_eq!(labels, StatusLabels::english());
    }

    #[test]
    fn test_settings_come_from_config() {
        let mut config = Config::default();
        config.app.enable_wal = true;
        config.status.pending = "To read".to_string();

        let matches = build_cli().get_matches_from(["reading-journey"]);
        let (db, labels) = store_settings(&matches, &config);

        assert_eq!(db.path, "MyReadingJourney.db");
        assert!(db.enable_wal);
        assert_eq!(labels.pending, "To read");
    }

    #[test]
    fn test_labels_flag() {
        let matches = build_cli().get_matches_from(["reading-journey", "--labels", "spanish"]);
        let (_, labels) = store_settings(&matches, &Config::default());
        assert_eq!(labels, StatusLabels::spanish());
    }

    #[test]
    fn test_add_requires_title_and_author() {
        let result = build_cli().try_get_matches_from(["reading-journey", "add", "Only title"]);
        assert!(result.is_err());
    }
}
