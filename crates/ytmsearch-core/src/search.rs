//! The search seam between the CLI and whatever answers the query.
//!
//! The CLI only knows about [`MusicSearch`]. Results come back as an opaque
//! [`serde_json::Value`] and are forwarded without being inspected.

use std::future::Future;

use serde_json::Value;

use crate::error::AppError;

/// Number of results requested when the caller does not pass a limit.
pub const DEFAULT_LIMIT: i64 = 1;

/// A music search backend.
///
/// Implementations decide how `limit` is honoured; callers must not assume
/// the returned value holds exactly `limit` records.
pub trait MusicSearch {
    /// Runs one search and returns the backend's result value untouched.
    fn search(
        &self,
        query: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Value, AppError>> + Send;
}

/// Restricts a search to one kind of result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Songs,
    Videos,
    Albums,
    Artists,
    CommunityPlaylists,
    FeaturedPlaylists,
}

impl SearchFilter {
    /// Singular result type reported for records found under this filter.
    pub fn result_type(&self) -> &'static str {
        match self {
            SearchFilter::Songs => "song",
            SearchFilter::Videos => "video",
            SearchFilter::Albums => "album",
            SearchFilter::Artists => "artist",
            SearchFilter::CommunityPlaylists | SearchFilter::FeaturedPlaylists => "playlist",
        }
    }
}
