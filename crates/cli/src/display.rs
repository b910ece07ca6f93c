//! Console formatting for book listings

use console::style;
use readingjourney_core::{Book, StatusLabels};
use std::io::{self, Write};

const ID_WIDTH: usize = 5;
const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 25;
const STATUS_WIDTH: usize = 15;
const RULE_WIDTH: usize = 75;

/// Prints every book as a fixed-width table, or a notice when there are none
pub fn write_book_table<W: Write>(
    out: &mut W,
    books: &[Book],
    labels: &StatusLabels,
) -> io::Result<()> {
    if books.is_empty() {
        writeln!(out, "\nNo books found.")?;
        return Ok(());
    }

    writeln!(out, "\n{}", style("--- Book List ---").bold().cyan())?;
    writeln!(
        out,
        "{:<iw$} {:<tw$} {:<aw$} {:<sw$}",
        "ID",
        "Title",
        "Author",
        "Status",
        iw = ID_WIDTH,
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH,
        sw = STATUS_WIDTH,
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for book in books {
        writeln!(
            out,
            "{:<iw$} {:<tw$} {:<aw$} {:<sw$}",
            book.id.as_i64(),
            truncate(&book.title, TITLE_WIDTH),
            truncate(&book.author, AUTHOR_WIDTH),
            labels.label(book.status),
            iw = ID_WIDTH,
            tw = TITLE_WIDTH,
            aw = AUTHOR_WIDTH,
            sw = STATUS_WIDTH,
        )?;
    }

    Ok(())
}

/// Shortens `s` to at most `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
