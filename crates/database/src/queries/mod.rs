//! Database query operations

pub mod books;

pub use books::{
    count_books, delete_book, get_book, insert_book, list_books, update_status,
};
