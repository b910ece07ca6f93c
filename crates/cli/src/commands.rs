// FILE: crates/cli/src/commands.rs

use crate::display;
use anyhow::{Context, Result};
use clap::ArgMatches;
use console::style;
use readingjourney_config::{Config, ConfigManager};
use readingjourney_core::{AppError, BookId, NewBook, ReadingStatus, Validator};
use readingjourney_database::{BookStore, InitReport};
use std::io::Write;

/// Tells the user what the startup initialization did
pub fn report_init<W: Write>(store: &BookStore, report: InitReport, out: &mut W) -> Result<()> {
    if report.created {
        log::debug!("Created book database at {}", store.location().display());
    }
    if report.seeded > 0 {
        writeln!(out, "\n{}", style("Sample books inserted successfully.").green())?;
    }
    Ok(())
}

/// Shows where the store lives and how many books it holds
pub async fn show_summary<W: Write>(store: &BookStore, out: &mut W) -> Result<()> {
    let count = store.count().await.map_err(with_user_message)?;

    writeln!(
        out,
        "{} Book database ready at {}",
        style("✓").green().bold(),
        store.location().display()
    )?;
    writeln!(out, "  Books: {}", style(count).bold().cyan())?;
    writeln!(out, "  Statuses: {}", store.labels().all().join(", "))?;

    Ok(())
}

/// List all books
pub async fn list_books<W: Write>(store: &BookStore, out: &mut W) -> Result<()> {
    let books = store.list_all().await.map_err(with_user_message)?;
    display::write_book_table(out, &books, store.labels())?;
    Ok(())
}

/// Add a new book
pub async fn add_book<W: Write>(store: &BookStore, matches: &ArgMatches, out: &mut W) -> Result<()> {
    let title = required(matches, "title")?;
    let author = required(matches, "author")?;

    let status = match matches.get_one::<String>("status") {
        Some(input) => store.labels().parse(input).map_err(with_user_message)?,
        None => ReadingStatus::Pending,
    };

    let book = NewBook::new(title.trim(), author.trim(), status);
    if let Err(errors) = book.validate() {
        return Err(with_user_message(AppError::InvalidArgument {
            argument: "book".to_string(),
            reason: errors.join("; "),
        }));
    }

    let id = store.insert_book(&book).await.map_err(with_user_message)?;

    writeln!(out, "{} Book inserted successfully.", style("✓").green().bold())?;
    writeln!(out, "  ID: {}", id)?;
    writeln!(out, "  Title: {}", book.title)?;
    writeln!(out, "  Author: {}", book.author)?;
    writeln!(out, "  Status: {}", store.labels().label(book.status))?;

    Ok(())
}

/// Change the reading status of a book
pub async fn update_status<W: Write>(
    store: &BookStore,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let id = parse_book_id(required(matches, "id")?)?;
    let status = store
        .labels()
        .parse(required(matches, "status")?)
        .map_err(with_user_message)?;

    let affected = store
        .set_status(id, status)
        .await
        .map_err(with_user_message)?;

    if affected == 0 {
        writeln!(out, "No book found with ID {}.", id)?;
    } else {
        writeln!(
            out,
            "{} Book status updated successfully.",
            style("✓").green().bold()
        )?;
    }

    Ok(())
}

/// Delete a book
pub async fn delete_book<W: Write>(
    store: &BookStore,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let id = parse_book_id(required(matches, "id")?)?;
    let affected = store.delete(id).await.map_err(with_user_message)?;

    if affected == 0 {
        writeln!(out, "No book found with ID {}.", id)?;
    } else {
        writeln!(out, "{} Book deleted successfully.", style("✓").green().bold())?;
    }

    Ok(())
}

/// Print the configuration in effect, optionally writing the default file
pub fn show_config<W: Write>(
    manager: &ConfigManager,
    config: &Config,
    init: bool,
    out: &mut W,
) -> Result<()> {
    if init {
        let created = manager
            .initialize()
            .context("Failed to write default configuration")?;
        if created {
            writeln!(
                out,
                "{} Wrote default configuration to {}",
                style("✓").green().bold(),
                manager.config_path().display()
            )?;
        } else {
            writeln!(out, "Configuration already exists, left unchanged.")?;
        }
    }

    writeln!(out, "\n{}", style("Configuration").bold().cyan())?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "  File: {}", manager.config_path().display())?;
    writeln!(out, "  Database: {}", config.app.database_path.display())?;
    writeln!(out, "  Log level: {}", config.app.log_level)?;
    writeln!(out, "  WAL: {}", config.app.enable_wal)?;
    writeln!(
        out,
        "  Statuses: {}, {}, {}",
        config.status.pending, config.status.in_progress, config.status.done
    )?;

    if let Err(errors) = config.validate() {
        writeln!(out, "\n{}", style("Problems").bold().yellow())?;
        for error in errors {
            writeln!(out, "  - {}", error)?;
        }
    }

    Ok(())
}

/// Parses a book id typed by the user
pub fn parse_book_id(input: &str) -> Result<BookId> {
    input.parse::<BookId>().map_err(|_| {
        with_user_message(AppError::InvalidArgument {
            argument: "ID".to_string(),
            reason: format!("'{}' is not a number", input.trim()),
        })
    })
}

/// Wraps a store error so the top-level report reads like the menu's
fn with_user_message(err: AppError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("{} is required", name))
}
