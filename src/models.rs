use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Service-side defaults
//
// These are the values the Stream API applies when a parameter is absent.
// Parameters carrying one of these defaults are always transmitted; truly
// optional parameters are omitted from the request entirely when unset.
// ---------------------------------------------------------------------------

/// First page of a paginated listing.
pub const DEFAULT_PAGE: u32 = 1;

/// Items per page of a paginated listing.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 100;

/// Sort order for collection listings.
pub const DEFAULT_COLLECTION_ORDER_BY: &str = "date";

/// Whether collection responses embed preview thumbnails.
pub const DEFAULT_INCLUDE_THUMBNAILS: bool = false;

/// Whether repackaging keeps the original source files.
pub const DEFAULT_KEEP_ORIGINAL_FILES: bool = true;

/// Whether transcription replaces an existing transcription.
pub const DEFAULT_TRANSCRIBE_FORCE: bool = false;

/// Filters for `list_videos`.
///
/// `page` and `items_per_page` are always sent; the remaining fields are
/// omitted from the query string unless set.
#[derive(Debug, Clone)]
pub struct ListVideosOptions {
    /// Free-text search over video titles.
    pub search: Option<String>,
    /// Default: 1.
    pub page: u32,
    /// Default: 100. Sent as `itemsPerPage`.
    pub items_per_page: u32,
    /// Restrict the listing to one collection id.
    pub collection: Option<String>,
    /// Sent as `orderBy`, e.g. `"date"` or `"title"`.
    pub order_by: Option<String>,
}

impl Default for ListVideosOptions {
    fn default() -> Self {
        Self {
            search: None,
            page: DEFAULT_PAGE,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            collection: None,
            order_by: None,
        }
    }
}

/// Filters for `list_collections`.
///
/// Unlike video listings, `order_by` and `include_thumbnails` carry service
/// defaults and are always sent.
#[derive(Debug, Clone)]
pub struct ListCollectionsOptions {
    /// Free-text search over collection names.
    pub search: Option<String>,
    /// Default: 1.
    pub page: u32,
    /// Default: 100. Sent as `itemsPerPage`.
    pub items_per_page: u32,
    /// Default: `"date"`. Sent as `orderBy`.
    pub order_by: String,
    /// Default: false. Sent as `includeThumbnails`.
    pub include_thumbnails: bool,
}

impl Default for ListCollectionsOptions {
    fn default() -> Self {
        Self {
            search: None,
            page: DEFAULT_PAGE,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            order_by: DEFAULT_COLLECTION_ORDER_BY.to_string(),
            include_thumbnails: DEFAULT_INCLUDE_THUMBNAILS,
        }
    }
}

/// Optional token-authentication parameters for `get_video_play_data`.
#[derive(Debug, Clone, Default)]
pub struct PlayDataOptions {
    /// Pre-signed playback token.
    pub token: Option<String>,
    /// Token expiry as a unix timestamp.
    pub expires: Option<i64>,
}

/// Optional fields for `fetch_video` (server-side ingestion from a URL).
#[derive(Debug, Clone, Default)]
pub struct FetchVideoOptions {
    /// Title for the created video; the service derives one from the URL
    /// when absent.
    pub title: Option<String>,
    /// Collection to place the video in.
    pub collection_id: Option<String>,
    /// Thumbnail frame time in milliseconds.
    pub thumbnail_time: Option<u32>,
    /// Extra HTTP headers the service sends when downloading the source.
    pub headers: Option<HashMap<String, String>>,
}

/// Optional fields for the two-step `upload_video` workflow.
#[derive(Debug, Clone, Default)]
pub struct UploadVideoOptions {
    /// Collection to place the video in.
    pub collection_id: Option<String>,
    /// Thumbnail frame time in milliseconds.
    pub thumbnail_time: Option<u32>,
    /// Comma-separated resolution list, e.g. `"240p,720p"`.
    pub enabled_resolutions: Option<String>,
}
