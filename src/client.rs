use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::errors::{Result, StreamError};
use crate::models::{
    FetchVideoOptions, ListCollectionsOptions, ListVideosOptions, PlayDataOptions,
    UploadVideoOptions, DEFAULT_INCLUDE_THUMBNAILS, DEFAULT_KEEP_ORIGINAL_FILES,
    DEFAULT_TRANSCRIBE_FORCE,
};

const DEFAULT_BASE_URL: &str = "https://video.bunnycdn.com/library";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use bunny_stream::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> bunny_stream::Result<()> {
/// let client = ClientBuilder::new()
///     .access_key("c9e282c1-4e79-4c3a")
///     .library_id("146289")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    access_key: Option<String>,
    library_id: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            access_key: None,
            library_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the library-scoped API access key.
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Set the video library id all requests are rooted under.
    pub fn library_id(mut self, id: impl Into<String>) -> Self {
        self.library_id = Some(id.into());
        self
    }

    /// Override the API host root (defaults to
    /// `https://video.bunnycdn.com/library`). The library id segment is
    /// always appended to it.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// If no access key or library id was set, the builder will attempt to
    /// read the `BUNNY_STREAM_ACCESS_KEY` and `BUNNY_STREAM_LIBRARY_ID`
    /// environment variables.
    ///
    /// Returns [`StreamError::Config`] if either value is still missing, or
    /// if the access key cannot be carried in a request header.
    pub fn build(self) -> Result<Client> {
        let access_key = self
            .access_key
            .or_else(|| std::env::var("BUNNY_STREAM_ACCESS_KEY").ok())
            .ok_or_else(|| StreamError::Config {
                message: "access key is required. Pass it to ClientBuilder::access_key() \
                          or set the BUNNY_STREAM_ACCESS_KEY environment variable."
                    .into(),
            })?;

        let library_id = self
            .library_id
            .or_else(|| std::env::var("BUNNY_STREAM_LIBRARY_ID").ok())
            .ok_or_else(|| StreamError::Config {
                message: "library id is required. Pass it to ClientBuilder::library_id() \
                          or set the BUNNY_STREAM_LIBRARY_ID environment variable."
                    .into(),
            })?;

        // The AccessKey header rides on every request, so it is installed
        // once as a default header. Redirect following stays off: the
        // classifier must always see the raw status the API returned.
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&access_key).map_err(|_| StreamError::Config {
            message: "access key contains characters that cannot be sent in a header".into(),
        })?;
        headers.insert(HeaderName::from_static("accesskey"), key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .timeout(self.timeout)
            .build()
            .map_err(StreamError::Http)?;

        Ok(Client {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            library_id,
            access_key,
            http,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Bunny Stream API client.
///
/// Scoped to a single video library: every request is sent to
/// `https://video.bunnycdn.com/library/{library_id}/...` with the configured
/// access key in the `AccessKey` header. Use [`Client::new`] for quick
/// construction or [`ClientBuilder`] for full control.
///
/// Successful responses are returned as decoded [`serde_json::Value`]s,
/// exactly as the API sent them; the client performs no shape validation.
///
/// # Example
///
/// ```no_run
/// use bunny_stream::Client;
///
/// # async fn example() -> bunny_stream::Result<()> {
/// let client = Client::new("c9e282c1-4e79-4c3a", "146289");
///
/// let videos = client.list_videos(None).await?;
/// println!("{videos:#}");
/// # Ok(())
/// # }
/// ```
pub struct Client {
    base_url: String,
    library_id: String,
    access_key: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client with the given access key and library id and
    /// default settings.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    ///
    /// # Panics
    ///
    /// Panics if the access key cannot be carried in an HTTP header. Build
    /// through [`ClientBuilder`] to handle that as a [`StreamError::Config`]
    /// instead.
    pub fn new(access_key: impl Into<String>, library_id: impl Into<String>) -> Self {
        ClientBuilder::new()
            .access_key(access_key)
            .library_id(library_id)
            .build()
            .expect("failed to build HTTP client")
    }

    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// List the library's videos.
    ///
    /// Pass `None` to fetch the first page with default pagination. There is
    /// no cursor: to walk the full library, repeat the call while
    /// incrementing [`ListVideosOptions::page`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bunny_stream::{Client, ListVideosOptions};
    ///
    /// # async fn example() -> bunny_stream::Result<()> {
    /// # let client = Client::new("key", "library");
    /// let page = client
    ///     .list_videos(Some(ListVideosOptions {
    ///         search: Some("keynote".into()),
    ///         ..Default::default()
    ///     }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_videos(&self, opts: Option<ListVideosOptions>) -> Result<Value> {
        let opts = opts.unwrap_or_default();

        let mut query = Query::new();
        query.push("page", opts.page);
        query.push("itemsPerPage", opts.items_per_page);
        query.push_opt("search", opts.search);
        query.push_opt("collection", opts.collection);
        query.push_opt("orderBy", opts.order_by);

        let request = self.http.get(self.url("videos")).query(query.pairs());
        self.dispatch(request, ErrorMap::action("list videos")).await
    }

    /// Fetch a single video by its guid.
    pub async fn get_video(&self, video_id: &str) -> Result<Value> {
        let request = self.http.get(self.url(&format!("videos/{video_id}")));
        self.dispatch(request, ErrorMap::action("get video")).await
    }

    /// Update a video's metadata.
    ///
    /// The body is forwarded verbatim as JSON; see the Stream API reference
    /// for the accepted fields (`title`, `collectionId`, `chapters`, ...).
    pub async fn update_video(&self, video_id: &str, body: Value) -> Result<Value> {
        let request = self
            .http
            .put(self.url(&format!("videos/{video_id}")))
            .json(&body);
        self.dispatch(request, ErrorMap::action("update video")).await
    }

    /// Delete a video and all of its stored content.
    pub async fn delete_video(&self, video_id: &str) -> Result<Value> {
        let request = self.http.delete(self.url(&format!("videos/{video_id}")));
        self.dispatch(
            request,
            ErrorMap::action("delete video").video_not_found(video_id),
        )
        .await
    }

    /// Create a video record with no content yet.
    ///
    /// The response carries the server-assigned `guid`; upload the actual
    /// file with [`upload_video_with_video_id`](Self::upload_video_with_video_id),
    /// or use [`upload_video`](Self::upload_video) to do both in one call.
    pub async fn create_video(
        &self,
        title: &str,
        collection_id: Option<&str>,
        thumbnail_time: Option<u32>,
    ) -> Result<Value> {
        let mut body = json!({ "title": title });
        if let Some(collection_id) = collection_id {
            body["collectionId"] = json!(collection_id);
        }
        if let Some(thumbnail_time) = thumbnail_time {
            body["thumbnailTime"] = json!(thumbnail_time);
        }

        let request = self.http.post(self.url("videos")).json(&body);
        self.dispatch(request, ErrorMap::action("create video")).await
    }

    /// Upload a local file as the content of an existing video record.
    ///
    /// The file is read fully into memory before anything is sent;
    /// `enabled_resolutions` limits which renditions get encoded (e.g.
    /// `"240p,720p"`).
    ///
    /// # Errors
    ///
    /// - [`StreamError::Io`] if the file does not exist or cannot be read;
    ///   no request is made in that case.
    /// - [`StreamError::VideoNotFound`] if no video has the given guid.
    /// - [`StreamError::Operation`] if the video already has content
    ///   (HTTP 400).
    pub async fn upload_video_with_video_id(
        &self,
        video_id: &str,
        path: impl AsRef<Path>,
        enabled_resolutions: Option<&str>,
    ) -> Result<Value> {
        let bytes = read_file(path.as_ref()).await?;

        let mut query = Query::new();
        query.push_opt("enabledResolutions", enabled_resolutions);

        let request = self
            .http
            .put(self.url(&format!("videos/{video_id}")))
            .query(query.pairs())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes);
        self.dispatch(
            request,
            ErrorMap::action("upload video")
                .video_not_found(video_id)
                .bad_request("The requested video was already uploaded"),
        )
        .await
    }

    /// Create a video record and upload a local file to it in one call.
    ///
    /// This performs two round trips: a create (to obtain the guid) followed
    /// by the content upload. The two steps are not atomic. If the upload
    /// fails after a successful create, the empty video record remains in
    /// the library and no cleanup is attempted. Callers who care should
    /// [`delete_video`](Self::delete_video) the guid themselves.
    ///
    /// Returns the upload response, not the creation response.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bunny_stream::Client;
    ///
    /// # async fn example() -> bunny_stream::Result<()> {
    /// # let client = Client::new("key", "library");
    /// let video = client.upload_video("Keynote 2024", "keynote.mp4", None).await?;
    /// println!("uploaded as {}", video["guid"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_video(
        &self,
        title: &str,
        path: impl AsRef<Path>,
        opts: Option<UploadVideoOptions>,
    ) -> Result<Value> {
        let opts = opts.unwrap_or_default();

        let created = self
            .create_video(title, opts.collection_id.as_deref(), opts.thumbnail_time)
            .await?;

        let guid = created
            .get("guid")
            .and_then(|v| v.as_str())
            .ok_or_else(|| StreamError::Operation {
                message: "Create video response did not contain a guid.".to_string(),
            })?;

        self.upload_video_with_video_id(guid, path, opts.enabled_resolutions.as_deref())
            .await
    }

    /// Point the video's thumbnail at an image URL.
    pub async fn set_video_thumbnail(&self, video_id: &str, url: &str) -> Result<Value> {
        let mut query = Query::new();
        query.push("thumbnailUrl", url);

        let request = self
            .http
            .post(self.url(&format!("videos/{video_id}/thumbnail")))
            .query(query.pairs());
        self.dispatch(
            request,
            ErrorMap::action("set video thumbnail").video_not_found(video_id),
        )
        .await
    }

    /// Retrieve the watch-time heatmap for a video.
    pub async fn get_video_heatmap(&self, video_id: &str) -> Result<Value> {
        let request = self
            .http
            .get(self.url(&format!("videos/{video_id}/heatmap")));
        self.dispatch(
            request,
            ErrorMap::action("get video heatmap").video_not_found(video_id),
        )
        .await
    }

    /// Retrieve playback data for a video.
    ///
    /// For token-authenticated libraries, pass the token and its expiry via
    /// [`PlayDataOptions`].
    pub async fn get_video_play_data(
        &self,
        video_id: &str,
        opts: Option<PlayDataOptions>,
    ) -> Result<Value> {
        let opts = opts.unwrap_or_default();

        let mut query = Query::new();
        query.push_opt("token", opts.token);
        query.push_opt("expires", opts.expires);

        let request = self
            .http
            .get(self.url(&format!("videos/{video_id}/play")))
            .query(query.pairs());
        self.dispatch(
            request,
            ErrorMap::action("get video play data").video_not_found(video_id),
        )
        .await
    }

    /// Retrieve view statistics for the library.
    ///
    /// The query pairs are forwarded verbatim (`dateFrom`, `dateTo`,
    /// `hourly`, `videoGuid`, ...). The `video_id` does not appear in the
    /// request; it is only reported back if the API answers 404.
    pub async fn get_video_statistics(
        &self,
        video_id: &str,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let request = self.http.get(self.url("statistics")).query(query);
        self.dispatch(
            request,
            ErrorMap::action("get video statistics").video_not_found(video_id),
        )
        .await
    }

    /// Queue a video for re-encoding.
    pub async fn reencode_video(&self, video_id: &str) -> Result<Value> {
        let request = self
            .http
            .post(self.url(&format!("videos/{video_id}/reencode")));
        self.dispatch(
            request,
            ErrorMap::action("reencode video").video_not_found(video_id),
        )
        .await
    }

    /// Repackage a video using the library's current DRM configuration.
    ///
    /// `keep_original_files` defaults to `true` when `None`. Requires
    /// Enterprise DRM to be enabled for the library.
    pub async fn repackage_video(
        &self,
        video_id: &str,
        keep_original_files: Option<bool>,
    ) -> Result<Value> {
        let mut query = Query::new();
        query.push_bool(
            "keepOriginalFiles",
            keep_original_files.unwrap_or(DEFAULT_KEEP_ORIGINAL_FILES),
        );

        let request = self
            .http
            .get(self.url(&format!("videos/{video_id}/repackage")))
            .query(query.pairs());
        self.dispatch(
            request,
            ErrorMap::action("repackage video")
                .video_not_found(video_id)
                .bad_request("Enterprise DRM is disabled for the library, repackaging not available"),
        )
        .await
    }

    /// Have the service download a video from a URL instead of uploading it.
    ///
    /// Ingestion happens server-side; the call returns as soon as the fetch
    /// is queued. A 404 here is reported against the source `url`, since no
    /// guid exists yet.
    pub async fn fetch_video(&self, url: &str, opts: Option<FetchVideoOptions>) -> Result<Value> {
        let opts = opts.unwrap_or_default();

        let mut query = Query::new();
        query.push_opt("collectionId", opts.collection_id);
        query.push_opt("thumbnailTime", opts.thumbnail_time);

        let mut body = json!({ "url": url });
        if let Some(title) = opts.title {
            body["title"] = json!(title);
        }
        if let Some(headers) = opts.headers {
            body["headers"] = json!(headers);
        }

        let request = self
            .http
            .post(self.url("videos/fetch"))
            .query(query.pairs())
            .json(&body);
        self.dispatch(
            request,
            ErrorMap::action("fetch video")
                .video_not_found(url)
                .bad_request("Failed fetching the video"),
        )
        .await
    }

    /// Upload a caption file for a video.
    ///
    /// `srclang` is the caption's language code (e.g. `"en"`, `"de"`); the
    /// file content is read fully and transmitted base64-encoded in the
    /// request body, not streamed.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Io`] if the caption file cannot be read; no request
    ///   is made in that case.
    pub async fn add_caption(
        &self,
        video_id: &str,
        srclang: &str,
        path: impl AsRef<Path>,
        label: Option<&str>,
    ) -> Result<Value> {
        let contents = read_file(path.as_ref()).await?;

        let mut body = json!({
            "srclang": srclang,
            "captionsFile": general_purpose::STANDARD.encode(contents),
        });
        if let Some(label) = label {
            body["label"] = json!(label);
        }

        let request = self
            .http
            .post(self.url(&format!("videos/{video_id}/captions/{srclang}")))
            .json(&body);
        self.dispatch(
            request,
            ErrorMap::action("add caption")
                .video_not_found(video_id)
                .bad_request("Failed uploading the captions"),
        )
        .await
    }

    /// Delete a video's caption track for the given language.
    pub async fn delete_caption(&self, video_id: &str, srclang: &str) -> Result<Value> {
        let request = self
            .http
            .delete(self.url(&format!("videos/{video_id}/captions/{srclang}")));
        self.dispatch(
            request,
            ErrorMap::action("delete caption")
                .video_not_found(video_id)
                .bad_request("Failed deleting the caption"),
        )
        .await
    }

    /// Queue a video for automatic transcription.
    ///
    /// `force` (default `false`) re-transcribes a video that already has a
    /// transcription.
    pub async fn transcribe_video(
        &self,
        video_id: &str,
        language: &str,
        force: Option<bool>,
    ) -> Result<Value> {
        let mut query = Query::new();
        query.push("language", language);
        query.push_bool("force", force.unwrap_or(DEFAULT_TRANSCRIBE_FORCE));

        let request = self
            .http
            .post(self.url(&format!("videos/{video_id}/transcribe")))
            .query(query.pairs());
        self.dispatch(
            request,
            ErrorMap::action("transcribe video")
                .video_not_found(video_id)
                .bad_request("Invalid request for transcription queue"),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    /// List the library's collections.
    ///
    /// Pass `None` for the first page ordered by date, without thumbnails.
    pub async fn list_collections(&self, opts: Option<ListCollectionsOptions>) -> Result<Value> {
        let opts = opts.unwrap_or_default();

        let mut query = Query::new();
        query.push("page", opts.page);
        query.push("itemsPerPage", opts.items_per_page);
        query.push_bool("includeThumbnails", opts.include_thumbnails);
        query.push("orderBy", opts.order_by);
        query.push_opt("search", opts.search);

        let request = self.http.get(self.url("collections")).query(query.pairs());
        self.dispatch(request, ErrorMap::action("list collections"))
            .await
    }

    /// Fetch a single collection by id.
    ///
    /// `include_thumbnails` defaults to `false` when `None`.
    pub async fn get_collection(
        &self,
        collection_id: &str,
        include_thumbnails: Option<bool>,
    ) -> Result<Value> {
        let mut query = Query::new();
        query.push_bool(
            "includeThumbnails",
            include_thumbnails.unwrap_or(DEFAULT_INCLUDE_THUMBNAILS),
        );

        let request = self
            .http
            .get(self.url(&format!("collections/{collection_id}")))
            .query(query.pairs());
        self.dispatch(
            request,
            ErrorMap::action("get collection").collection_not_found(collection_id),
        )
        .await
    }

    /// Create a named collection.
    pub async fn create_collection(&self, name: &str) -> Result<Value> {
        let request = self
            .http
            .post(self.url("collections"))
            .json(&json!({ "name": name }));
        self.dispatch(request, ErrorMap::action("create collection"))
            .await
    }

    /// Rename a collection.
    pub async fn update_collection(&self, collection_id: &str, name: &str) -> Result<Value> {
        let request = self
            .http
            .put(self.url(&format!("collections/{collection_id}")))
            .json(&json!({ "name": name }));
        self.dispatch(
            request,
            ErrorMap::action("update collection").collection_not_found(collection_id),
        )
        .await
    }

    /// Delete a collection. Videos in it are kept, just unassigned.
    pub async fn delete_collection(&self, collection_id: &str) -> Result<Value> {
        let request = self
            .http
            .delete(self.url(&format!("collections/{collection_id}")));
        self.dispatch(
            request,
            ErrorMap::action("delete collection").collection_not_found(collection_id),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Absolute URL for an operation path under this client's library.
    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.library_id, path)
    }

    /// Send a request and classify the response.
    ///
    /// Classification order, identical for every operation:
    /// 1. 401: authentication failure carrying the configured access key.
    ///    Checked first so bad credentials classify the same everywhere,
    ///    regardless of what else the endpoint uses a status for.
    /// 2. 200: body decoded as JSON and returned as-is.
    /// 3. The operation's mapped 400/404 errors, if any.
    /// 4. Anything else: a generic failure naming the operation.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        errors: ErrorMap<'_>,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();

        if status == 401 {
            return Err(StreamError::Authentication {
                access_key: self.access_key.clone(),
            });
        }
        if status == 200 {
            return Ok(response.json().await?);
        }

        let ErrorMap {
            action,
            not_found,
            bad_request,
        } = errors;

        Err(match (status, bad_request, not_found) {
            (400, Some(message), _) => StreamError::Operation {
                message: message.to_string(),
            },
            (404, _, Some(NotFound::Video(id))) => StreamError::VideoNotFound {
                id: id.to_string(),
            },
            (404, _, Some(NotFound::Collection(id))) => StreamError::CollectionNotFound {
                id: id.to_string(),
            },
            _ => StreamError::Operation {
                message: format!("Could not {action}."),
            },
        })
    }
}

/// Declarative error mapping for one operation: the action name used by the
/// generic failure message, plus what the operation's 400/404 statuses mean.
/// Consumed by [`Client::dispatch`].
struct ErrorMap<'a> {
    action: &'static str,
    not_found: Option<NotFound<'a>>,
    bad_request: Option<&'static str>,
}

/// Which resource a mapped 404 refers to.
#[derive(Clone, Copy)]
enum NotFound<'a> {
    Video(&'a str),
    Collection(&'a str),
}

impl<'a> ErrorMap<'a> {
    fn action(action: &'static str) -> Self {
        Self {
            action,
            not_found: None,
            bad_request: None,
        }
    }

    /// Map 404 to [`StreamError::VideoNotFound`] with this identifier.
    fn video_not_found(mut self, id: &'a str) -> Self {
        self.not_found = Some(NotFound::Video(id));
        self
    }

    /// Map 404 to [`StreamError::CollectionNotFound`] with this identifier.
    fn collection_not_found(mut self, id: &'a str) -> Self {
        self.not_found = Some(NotFound::Collection(id));
        self
    }

    /// Map 400 to [`StreamError::Operation`] with this exact message.
    fn bad_request(mut self, message: &'static str) -> Self {
        self.bad_request = Some(message);
        self
    }
}

/// Query-string assembly with the omission rules in one place: unsupplied
/// optionals never appear, booleans are sent as the strings
/// `"true"`/`"false"`, and pairs keep insertion order.
struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    fn push(&mut self, key: &'static str, value: impl ToString) {
        self.pairs.push((key, value.to_string()));
    }

    fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    fn push_bool(&mut self, key: &'static str, value: bool) {
        self.push(key, if value { "true" } else { "false" });
    }

    fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Read a local payload file, tagging failures with the path. Upload and
/// caption operations call this before building any request.
async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| StreamError::Io {
        path: path.to_path_buf(),
        source,
    })
}
