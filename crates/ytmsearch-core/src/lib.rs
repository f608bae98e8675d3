//! ytmsearch Core - Error handling, configuration and the search seam.

pub mod config;
pub mod error;
pub mod search;

pub use config::HttpConfig;
pub use error::AppError;
pub use search::{MusicSearch, SearchFilter, DEFAULT_LIMIT};
