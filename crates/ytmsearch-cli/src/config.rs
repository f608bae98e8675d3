use std::time::Duration;

use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use ytmsearch_core::config::DEFAULT_BASE_URL;
use ytmsearch_core::{HttpConfig, SearchFilter, DEFAULT_LIMIT};

/// Usage line printed when the query is missing.
pub const USAGE: &str = "Usage: search_ytmusic <query> [limit]";

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "search_ytmusic")]
#[command(
    author,
    version,
    about = "Search YouTube Music and print the results as JSON",
    allow_negative_numbers = true
)]
#[command(after_help = "Examples:
  search_ytmusic \"So What - Miles Davis\"
  search_ytmusic jazz 5 --filter songs
  DEBUG=true search_ytmusic \"Take Five\" 2>search.log")]
pub struct Config {
    /// Search query, sent to YouTube Music verbatim
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Number of results to request
    #[arg(default_value_t = DEFAULT_LIMIT)]
    pub limit: i64,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,

    /// Only return one kind of result
    #[arg(short, long, env = "YTMUSIC_FILTER", value_name = "FILTER")]
    pub filter: Option<FilterKind>,

    /// Interface language of the results
    #[arg(long, env = "YTMUSIC_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Two-letter region code; picked from the caller's IP when unset
    #[arg(long, env = "YTMUSIC_LOCATION")]
    pub location: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Base URL of the YouTube Music web API
    #[arg(long, env = "YTMUSIC_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    /// Write debug logs to stderr
    #[arg(short, long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub verbose: bool,
}

/// Result kinds accepted by `--filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum FilterKind {
    Songs,
    Videos,
    Albums,
    Artists,
    CommunityPlaylists,
    FeaturedPlaylists,
}

impl From<FilterKind> for SearchFilter {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Songs => SearchFilter::Songs,
            FilterKind::Videos => SearchFilter::Videos,
            FilterKind::Albums => SearchFilter::Albums,
            FilterKind::Artists => SearchFilter::Artists,
            FilterKind::CommunityPlaylists => SearchFilter::CommunityPlaylists,
            FilterKind::FeaturedPlaylists => SearchFilter::FeaturedPlaylists,
        }
    }
}

impl Config {
    /// The filter to hand to the search client.
    pub fn search_filter(&self) -> Option<SearchFilter> {
        self.filter.map(SearchFilter::from)
    }

    /// Builds the search client configuration.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout),
            language: self.language.clone(),
            location: self.location.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// True when parsing failed because the query was not given.
///
/// That case exits with status 1 and the short usage line instead of clap's
/// own report.
pub fn is_usage_error(err: &clap::Error) -> bool {
    err.kind() == ErrorKind::MissingRequiredArgument
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_to_one() {
        let config = Config::try_parse_from(["search_ytmusic", "jazz"]).unwrap();
        assert_eq!(config.query, "jazz");
        assert_eq!(config.limit, 1);
    }

    #[test]
    fn test_limit_is_parsed_as_integer() {
        let config = Config::try_parse_from(["search_ytmusic", "jazz", "5"]).unwrap();
        assert_eq!(config.limit, 5);
    }

    #[test]
    fn test_limit_is_not_bounds_checked() {
        let config = Config::try_parse_from(["search_ytmusic", "jazz", "-3"]).unwrap();
        assert_eq!(config.limit, -3);

        let config = Config::try_parse_from(["search_ytmusic", "jazz", "0"]).unwrap();
        assert_eq!(config.limit, 0);
    }

    #[test]
    fn test_non_numeric_limit_fails() {
        let err = Config::try_parse_from(["search_ytmusic", "jazz", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(!is_usage_error(&err));
    }

    #[test]
    fn test_missing_query_is_usage_error() {
        let err = Config::try_parse_from(["search_ytmusic"]).unwrap_err();
        assert!(is_usage_error(&err));
    }

    #[test]
    fn test_query_is_taken_verbatim() {
        let config =
            Config::try_parse_from(["search_ytmusic", "  So What - Miles Davis "]).unwrap();
        assert_eq!(config.query, "  So What - Miles Davis ");

        let config = Config::try_parse_from(["search_ytmusic", ""]).unwrap();
        assert_eq!(config.query, "");
    }

    #[test]
    fn test_query_may_start_with_hyphen() {
        let config = Config::try_parse_from(["search_ytmusic", "-Hyphen Song - Artist"]).unwrap();
        assert_eq!(config.query, "-Hyphen Song - Artist");
        assert_eq!(config.limit, 1);

        let config = Config::try_parse_from(["search_ytmusic", "-Intro - Band", "4"]).unwrap();
        assert_eq!(config.query, "-Intro - Band");
        assert_eq!(config.limit, 4);
    }

    #[test]
    fn test_help_still_works_with_hyphen_queries() {
        let err = Config::try_parse_from(["search_ytmusic", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_trailing_arguments_are_ignored() {
        let config =
            Config::try_parse_from(["search_ytmusic", "jazz", "5", "extra", "more"]).unwrap();
        assert_eq!(config.query, "jazz");
        assert_eq!(config.limit, 5);
        assert_eq!(config.ignored, vec!["extra", "more"]);
    }

    #[test]
    fn test_filter_flag() {
        let config = Config::try_parse_from([
            "search_ytmusic",
            "jazz",
            "3",
            "--filter",
            "community_playlists",
        ])
        .unwrap();
        assert_eq!(config.filter, Some(FilterKind::CommunityPlaylists));
        assert_eq!(config.search_filter(), Some(SearchFilter::CommunityPlaylists));

        let err = Config::try_parse_from(["search_ytmusic", "jazz", "-f", "tracks"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_filter_values_come_from_the_enum() {
        let names: Vec<_> = FilterKind::value_variants()
            .iter()
            .filter_map(|kind| kind.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "songs",
                "videos",
                "albums",
                "artists",
                "community_playlists",
                "featured_playlists"
            ]
        );
    }

    #[test]
    fn test_http_config() {
        let config = Config::try_parse_from([
            "search_ytmusic",
            "jazz",
            "--timeout",
            "3",
            "--language",
            "de",
            "--location",
            "AT",
        ])
        .unwrap();
        let http = config.http_config();
        assert_eq!(http.timeout, Duration::from_secs(3));
        assert_eq!(http.language, "de");
        assert_eq!(http.location.as_deref(), Some("AT"));
    }
}
