//! Book display formatting

use crate::models::Book;

use super::blank_if_empty;

/// One tab-separated inventory row:
/// `isbn`, `name`, `author`, `keywords`, `price`, `stock`
pub fn format_book_row(book: &Book) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        book.isbn, book.name, book.author, book.keywords, book.price, book.stock
    )
}

/// Format a `show` result
pub fn format_book_list(books: &[&Book]) -> Vec<String> {
    blank_if_empty(books.iter().map(|book| format_book_row(book)).collect())
}
