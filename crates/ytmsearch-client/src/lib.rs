//! ytmsearch Client - HTTP client for YouTube Music search
//!
//! - [`ytmusic`] - request building and transport for the web search endpoint
//! - [`parser`] - conversion of raw responses into [`SearchRecord`]s
//!
//! [`YtMusicClient`] implements [`ytmsearch_core::MusicSearch`], which is all
//! the CLI depends on.

pub mod parser;
pub mod ytmusic;

pub use parser::{AlbumRef, ArtistRef, SearchRecord};
pub use ytmusic::YtMusicClient;
