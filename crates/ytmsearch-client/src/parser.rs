//! Turns YouTube Music search responses into flat result records.
//!
//! The web API answers with deeply nested renderer objects. Only the parts
//! needed to identify a result (ids, title, artists, album, duration) are
//! pulled out; anything unrecognised is skipped rather than treated as an
//! error, since the layout changes without notice.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use ytmsearch_core::{AppError, SearchFilter};

const SECTIONS: &str =
    "/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents";
const FLEX_COLUMN_RUNS: [&str; 2] = [
    "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs",
    "/flexColumns/1/musicResponsiveListItemFlexColumnRenderer/text/runs",
];
const PLAY_BUTTON_VIDEO_ID: &str = "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId";
const THUMBNAILS: &str = "/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails";
const PAGE_TYPE: &str =
    "/browseEndpointContextSupportedConfigs/browseEndpointContextMusicConfig/pageType";
const NEXT_CONTINUATION: &str = "/continuations/0/nextContinuationData/continuation";

const TOP_RESULT: &str = "Top result";

/// Type labels the service prints as the first subtitle run of unfiltered results.
const RESULT_TYPES: [&str; 10] = [
    "song", "video", "album", "single", "ep", "artist", "playlist", "episode", "podcast",
    "profile",
];

/// One search result.
///
/// Field names follow the JSON the downstream consumers already read
/// (`videoId`, `resultType`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub category: Option<String>,
    pub result_type: String,
    pub title: Option<String>,
    pub video_id: Option<String>,
    pub browse_id: Option<String>,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub duration: Option<String>,
    #[serde(rename = "duration_seconds")]
    pub duration_seconds: Option<u64>,
    pub views: Option<String>,
    pub year: Option<String>,
    pub thumbnails: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRef {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRef {
    pub name: String,
    pub id: Option<String>,
}

/// Records from one response plus the token needed to fetch more.
#[derive(Debug, Default)]
pub struct SearchPage {
    pub records: Vec<SearchRecord>,
    /// Continuation token of the last shelf that had one.
    pub continuation: Option<String>,
    /// Title of the shelf `continuation` belongs to.
    pub category: Option<String>,
}

/// Parses the first page of a search.
///
/// # Errors
///
/// Returns `AppError::UnexpectedResponse` if the body has no `contents`
/// object at all. A body whose `contents` lacks the results tab is a search
/// without results and yields an empty page.
pub fn parse_search_response(
    body: &Value,
    filter: Option<SearchFilter>,
) -> Result<SearchPage, AppError> {
    let contents = body
        .get("contents")
        .ok_or_else(|| AppError::UnexpectedResponse("missing `contents`".to_string()))?;

    let mut page = SearchPage::default();
    let Some(sections) = contents.pointer(SECTIONS).and_then(Value::as_array) else {
        return Ok(page);
    };

    for section in sections {
        if let Some(card) = section.get("musicCardShelfRenderer") {
            page.records.extend(parse_top_result(card));
        } else if let Some(shelf) = section.get("musicShelfRenderer") {
            let category = text_of(shelf.pointer("/title/runs/0/text"));
            page.records
                .extend(parse_shelf_items(shelf, category.as_deref(), filter));
            if let Some(token) = text_of(shelf.pointer(NEXT_CONTINUATION)) {
                page.continuation = Some(token);
                page.category = category;
            }
        } else if section.get("itemSectionRenderer").is_none() {
            // itemSectionRenderer holds "did you mean" and "no results" notices
            let kind = section
                .as_object()
                .and_then(|o| o.keys().next())
                .map(String::as_str)
                .unwrap_or("<empty>");
            warn!(kind, "Skipping unrecognised search section");
        }
    }

    Ok(page)
}

/// Parses a shelf continuation fetched with a token from a previous page.
///
/// A response without `continuationContents` means the shelf is exhausted.
pub fn parse_continuation_response(
    body: &Value,
    category: Option<&str>,
    filter: Option<SearchFilter>,
) -> Result<SearchPage, AppError> {
    if !body.is_object() {
        return Err(AppError::UnexpectedResponse(
            "continuation response is not an object".to_string(),
        ));
    }

    let mut page = SearchPage::default();
    if let Some(shelf) = body.pointer("/continuationContents/musicShelfContinuation") {
        page.records = parse_shelf_items(shelf, category, filter);
        page.continuation = text_of(shelf.pointer(NEXT_CONTINUATION));
        page.category = category.map(str::to_string);
    }
    Ok(page)
}

fn parse_shelf_items(
    shelf: &Value,
    category: Option<&str>,
    filter: Option<SearchFilter>,
) -> Vec<SearchRecord> {
    shelf
        .get("contents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.get("musicResponsiveListItemRenderer"))
        .map(|item| parse_list_item(item, category, filter))
        .collect()
}

fn parse_list_item(
    item: &Value,
    category: Option<&str>,
    filter: Option<SearchFilter>,
) -> SearchRecord {
    let title_run = item.pointer(&format!("{}/0", FLEX_COLUMN_RUNS[0]));
    let video_id = title_run
        .and_then(|run| run.pointer("/navigationEndpoint/watchEndpoint/videoId"))
        .or_else(|| item.pointer(PLAY_BUTTON_VIDEO_ID))
        .or_else(|| item.pointer("/playlistItemData/videoId"));

    build_record(RecordParts {
        category,
        title: text_of(title_run.and_then(|run| run.get("text"))),
        video_id: text_of(video_id),
        browse_id: text_of(item.pointer("/navigationEndpoint/browseEndpoint/browseId")),
        subtitle: runs_at(item, FLEX_COLUMN_RUNS[1]),
        thumbnails: item.pointer(THUMBNAILS),
        filter,
    })
}

fn parse_top_result(card: &Value) -> Option<SearchRecord> {
    let title_run = card.pointer("/title/runs/0")?;

    Some(build_record(RecordParts {
        category: Some(TOP_RESULT),
        title: text_of(title_run.get("text")),
        video_id: text_of(title_run.pointer("/navigationEndpoint/watchEndpoint/videoId")),
        browse_id: text_of(title_run.pointer("/navigationEndpoint/browseEndpoint/browseId")),
        subtitle: runs_at(card, "/subtitle/runs"),
        thumbnails: card.pointer(THUMBNAILS),
        filter: None,
    }))
}

struct RecordParts<'a> {
    category: Option<&'a str>,
    title: Option<String>,
    video_id: Option<String>,
    browse_id: Option<String>,
    subtitle: &'a [Value],
    thumbnails: Option<&'a Value>,
    filter: Option<SearchFilter>,
}

fn build_record(parts: RecordParts<'_>) -> SearchRecord {
    let declared = parts
        .subtitle
        .first()
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .filter(|label| RESULT_TYPES.contains(&label.as_str()));

    let subtitle = match declared {
        Some(_) => &parts.subtitle[1..],
        None => parts.subtitle,
    };

    let result_type = match declared.as_deref() {
        Some("single") | Some("ep") => "album".to_string(),
        Some(label) => label.to_string(),
        None => match parts.filter {
            Some(filter) => filter.result_type().to_string(),
            None => infer_result_type(parts.video_id.as_deref(), parts.browse_id.as_deref())
                .to_string(),
        },
    };

    let mut record = SearchRecord {
        category: parts.category.map(str::to_string),
        result_type,
        title: parts.title,
        video_id: parts.video_id,
        browse_id: parts.browse_id,
        thumbnails: parts
            .thumbnails
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        ..SearchRecord::default()
    };
    apply_subtitle(&mut record, subtitle);
    record
}

/// Sorts subtitle runs into artists, album, duration, views and year.
fn apply_subtitle(record: &mut SearchRecord, runs: &[Value]) {
    for run in runs {
        let Some(text) = run.get("text").and_then(Value::as_str) else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "•" || trimmed == "&" || trimmed == "," {
            continue;
        }

        if let Some(browse) = run.pointer("/navigationEndpoint/browseEndpoint") {
            let id = text_of(browse.get("browseId"));
            let page_type = browse
                .pointer(PAGE_TYPE)
                .and_then(Value::as_str)
                .unwrap_or_default();
            let is_album = page_type == "MUSIC_PAGE_TYPE_ALBUM"
                || id.as_deref().is_some_and(|id| id.starts_with("MPRE"));
            if is_album {
                record.album = Some(AlbumRef {
                    name: trimmed.to_string(),
                    id,
                });
            } else {
                record.artists.push(ArtistRef {
                    name: trimmed.to_string(),
                    id,
                });
            }
        } else if let Some(seconds) = parse_duration(trimmed) {
            record.duration = Some(trimmed.to_string());
            record.duration_seconds = Some(seconds);
        } else if let Some(views) = trimmed
            .strip_suffix(" views")
            .or_else(|| trimmed.strip_suffix(" plays"))
        {
            record.views = Some(views.to_string());
        } else if is_year(trimmed) {
            record.year = Some(trimmed.to_string());
        } else if record.result_type != "artist" {
            record.artists.push(ArtistRef {
                name: trimmed.to_string(),
                id: None,
            });
        }
    }
}

fn infer_result_type(video_id: Option<&str>, browse_id: Option<&str>) -> &'static str {
    match browse_id {
        Some(id) if id.starts_with("UC") => "artist",
        Some(id) if id.starts_with("MPRE") => "album",
        Some(id) if id.starts_with("VL") || id.starts_with("PL") => "playlist",
        Some(id) if id.starts_with("MPSP") => "podcast",
        _ if video_id.is_some() => "song",
        _ => "unknown",
    }
}

/// Parses `m:ss` or `h:mm:ss` into seconds.
fn parse_duration(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    parts.iter().try_fold(0u64, |acc, part| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        acc.checked_mul(60)?.checked_add(part.parse::<u64>().ok()?)
    })
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit())
}

fn runs_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn text_of(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
