pub mod book_manager;
pub mod errors;
pub mod services;
pub mod utils;

pub use book_manager::{BookManager, LoadReport};
pub use errors::{BookError, Result};
