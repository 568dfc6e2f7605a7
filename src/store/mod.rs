// Storage layer: the read-only question catalog and the durable wrong book.

mod questions;
mod wrong_book;

pub use questions::{Catalog, QuestionStore};
pub use wrong_book::{BookChange, WrongBookStore};
