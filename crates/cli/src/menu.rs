//! Interactive numbered menu

use crate::commands::parse_book_id;
use crate::display;
use anyhow::Result;
use console::style;
use readingjourney_core::AppError;
use readingjourney_database::BookStore;
use std::io::{self, BufRead, Write};

/// What the loop does after an action
enum Step {
    Continue,
    Quit,
}

/// Runs the menu until the user picks exit or input runs out
///
/// Store errors are printed and the loop keeps going. Only failures to
/// write to `out` end the session early.
pub async fn run<R: BufRead, W: Write>(store: &BookStore, mut input: R, out: &mut W) -> Result<()> {
    loop {
        print_menu(out)?;

        let choice = match prompt(&mut input, out, "\nSelect an option (1-5): ")? {
            Some(choice) => choice,
            None => break,
        };

        let outcome = match choice.trim() {
            "1" => show_books(store, out).await.map(|_| Step::Continue),
            "2" => add_book(store, &mut input, out).await,
            "3" => update_status(store, &mut input, out).await,
            "4" => delete_book(store, &mut input, out).await,
            "5" => Ok(Step::Quit),
            _ => {
                writeln!(
                    out,
                    "\nInvalid option. Please select a number between 1 and 5."
                )?;
                Ok(Step::Continue)
            }
        };

        match outcome {
            Ok(Step::Quit) => break,
            Ok(Step::Continue) => {}
            Err(e) => report_error(&e, out)?,
        }

        if prompt(&mut input, out, "\nPress Enter to continue...")?.is_none() {
            break;
        }
    }

    writeln!(
        out,
        "\nApplication terminated. Thank you for using Reading Journey."
    )?;
    Ok(())
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", style("MY READING JOURNEY - Book Management").bold())?;
    writeln!(out, "1. Show all books")?;
    writeln!(out, "2. Add a new book")?;
    writeln!(out, "3. Update book status")?;
    writeln!(out, "4. Delete a book")?;
    writeln!(out, "5. Exit")
}

/// Prints `text` and reads one line, without its line ending
///
/// Returns `None` at end of input. Bytes that are not valid UTF-8 are
/// replaced rather than treated as a read failure.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut raw = Vec::new();
    if input.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&raw);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn report_error<W: Write>(err: &anyhow::Error, out: &mut W) -> io::Result<()> {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => {
            if app_err.is_critical() {
                log::error!("{:#}", err);
            } else {
                log::warn!("{:#}", err);
            }
            writeln!(out, "\nError: {}", app_err.user_message())
        }
        None => writeln!(out, "\nError: {:#}", err),
    }
}

fn status_hint(store: &BookStore) -> String {
    store.labels().all().join("/")
}

async fn show_books<W: Write>(store: &BookStore, out: &mut W) -> Result<()> {
    let books = store.list_all().await?;
    display::write_book_table(out, &books, store.labels())?;
    Ok(())
}

async fn add_book<R: BufRead, W: Write>(
    store: &BookStore,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    writeln!(out, "\n{}", style("--- Insert a New Book ---").bold().cyan())?;

    let Some(title) = prompt(input, out, "Book title: ")? else {
        return Ok(Step::Quit);
    };
    let Some(author) = prompt(input, out, "Author: ")? else {
        return Ok(Step::Quit);
    };
    let Some(status) = prompt(input, out, &format!("Status ({}): ", status_hint(store)))? else {
        return Ok(Step::Quit);
    };

    if title.trim().is_empty() || author.trim().is_empty() {
        writeln!(out, "\nTitle and author cannot be empty.")?;
        return Ok(Step::Continue);
    }

    store.insert(title.trim(), author.trim(), &status).await?;
    writeln!(out, "\n{}", style("Book inserted successfully.").green())?;
    Ok(Step::Continue)
}

async fn update_status<R: BufRead, W: Write>(
    store: &BookStore,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    writeln!(out, "\n{}", style("--- Update Book Status ---").bold().cyan())?;
    show_books(store, out).await?;

    let Some(raw_id) = prompt(input, out, "\nEnter the ID of the book to update: ")? else {
        return Ok(Step::Quit);
    };
    let id = parse_book_id(&raw_id)?;

    let hint = format!("New status ({}): ", status_hint(store));
    let Some(status) = prompt(input, out, &hint)? else {
        return Ok(Step::Quit);
    };

    if store.update_status(id, &status).await? == 0 {
        writeln!(out, "\nNo book found with ID {}.", id)?;
    } else {
        writeln!(out, "\n{}", style("Book status updated successfully.").green())?;
    }
    Ok(Step::Continue)
}

async fn delete_book<R: BufRead, W: Write>(
    store: &BookStore,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    writeln!(out, "\n{}", style("--- Delete a Book ---").bold().cyan())?;
    show_books(store, out).await?;

    let Some(raw_id) = prompt(input, out, "\nEnter the ID of the book to delete: ")? else {
        return Ok(Step::Quit);
    };
    let id = parse_book_id(&raw_id)?;

    if store.delete(id).await? == 0 {
        writeln!(out, "\nNo book found with ID {}.", id)?;
    } else {
        writeln!(out, "\n{}", style("Book deleted successfully.").green())?;
    }
    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readingjourney_core::{BookId, ReadingStatus, StatusLabels};
    use std::io::Cursor;

    async fn setup() -> BookStore {
        let store = BookStore::open_in_memory(StatusLabels::english())
            .await
            .unwrap();
        store.initialize().await.unwrap();
        store
    }

    async fn run_script(store: &BookStore, script: &str) -> String {
        let mut out = Vec::new();
        run(store, Cursor::new(script.as_bytes().to_vec()), &mut out)
            .await
            .unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
    }

    #[tokio::test]
    async fn test_exit_option() {
        let store = setup().await;
        let text = run_script(&store, "5\n").await;

        assert!(text.contains("MY READING JOURNEY - Book Management"));
        assert!(text.ends_with("\nApplication terminated. Thank you for using Reading Journey.\n"));
        assert!(!text.contains("Press Enter"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let store = setup().await;
        let text = run_script(&store, "").await;
        assert!(text.contains("Application terminated."));
    }

    #[tokio::test]
    async fn test_invalid_option() {
        let store = setup().await;
        let text = run_script(&store, "9\n\n5\n").await;

        assert!(text.contains("Invalid option. Please select a number between 1 and 5."));
        assert!(text.contains("Press Enter to continue..."));
    }

    #[tokio::test]
    async fn test_list_books() {
        let store = setup().await;
        let text = run_script(&store, "1\n\n5\n").await;

        assert!(text.contains("--- Book List ---"));
        assert!(text.contains("El poder del Ahora"));
        assert!(text.contains("The light we carry"));
    }

    #[tokio::test]
    async fn test_add_book_normalizes_status() {
        let store = setup().await;
        let text = run_script(&store, "2\nDune\nFrank Herbert\ndone\n\n5\n").await;

        assert!(text.contains("Book inserted successfully."));
        let book = store.get(BookId::new(6)).await.unwrap().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.status, ReadingStatus::Done);
    }

    #[tokio::test]
    async fn test_add_book_with_unknown_status_keeps_running() {
        let store = setup().await;
        let text = run_script(&store, "2\nDune\nFrank Herbert\nBorrowed\n\n1\n\n5\n").await;

        assert!(text.contains("Error:"));
        assert!(text.contains("--- Book List ---"));
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_add_book_requires_title() {
        let store = setup().await;
        let text = run_script(&store, "2\n\nFrank Herbert\nDone\n\n5\n").await;

        assert!(text.contains("Title and author cannot be empty."));
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_update_status_shows_list_first() {
        let store = setup().await;
        let text = run_script(&store, "3\n3\ninprogress\n\n5\n").await;

        let list_at = text.find("--- Book List ---").unwrap();
        let prompt_at = text.find("Enter the ID of the book to update").unwrap();
        assert!(list_at < prompt_at);
        assert!(text.contains("Book status updated successfully."));

        let book = store.get(BookId::new(3)).await.unwrap().unwrap();
        assert_eq!(book.status, ReadingStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let store = setup().await;
        let text = run_script(&store, "3\n9999\nDone\n\n5\n").await;
        assert!(text.contains("No book found with ID 9999."));
    }

    #[tokio::test]
    async fn test_delete_book() {
        let store = setup().await;
        let text = run_script(&store, "4\n2\n\n4\n2\n\n5\n").await;

        assert!(text.contains("Book deleted successfully."));
        assert!(text.contains("No book found with ID 2."));
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_reported() {
        let store = setup().await;
        let text = run_script(&store, "4\nabc\n\n5\n").await;

        assert!(text.contains("Error: Invalid ID"));
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_undecodable_choice_is_an_invalid_option() {
        let store = setup().await;
        let mut script = vec![0xff, 0xfe, b'\n', b'\n'];
        script.extend_from_slice(b"1\n\n5\n");

        let mut out = Vec::new();
        run(&store, Cursor::new(script), &mut out).await.unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned();

        assert!(text.contains("Invalid option. Please select a number between 1 and 5."));
        assert!(text.contains("--- Book List ---"));
        assert!(text.contains("Application terminated."));
    }

    #[tokio::test]
    async fn test_undecodable_title_is_stored_with_replacements() {
        let store = setup().await;
        let mut script = b"2\nCaf".to_vec();
        script.extend_from_slice(&[0xe9, b'\n']);
        script.extend_from_slice(b"Author\nPending\n\n5\n");

        let mut out = Vec::new();
        run(&store, Cursor::new(script), &mut out).await.unwrap();

        let book = store.get(BookId::new(6)).await.unwrap().unwrap();
        assert_eq!(book.title, "Caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_input_ending_mid_action_exits() {
        let store = setup().await;
        let text = run_script(&store, "2\nDune\n").await;

        assert!(text.contains("Application terminated."));
        assert_eq!(store.count().await.unwrap(), 5);
    }
}
