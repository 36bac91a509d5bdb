//! # Bunny Stream client for Rust
//!
//! Rust client for the [Bunny Stream](https://bunny.net/stream/) video
//! management API. Create and upload videos, organize collections, manage
//! captions and transcription, and pull playback analytics -- all scoped to
//! one video library and authenticated with its access key.
//!
//! Responses are returned as raw [`serde_json::Value`]s, exactly as the API
//! sent them; failures are classified into the typed [`StreamError`]
//! variants (bad credentials, missing video/collection, local file
//! problems, everything else).
//!
//! ## Quick start
//!
//! ```no_run
//! use bunny_stream::Client;
//!
//! #[tokio::main]
//! async fn main() -> bunny_stream::Result<()> {
//!     let client = Client::new("c9e282c1-4e79-4c3a", "146289");
//!
//!     // Create a video record and upload a local file to it.
//!     let video = client.upload_video("Keynote 2024", "keynote.mp4", None).await?;
//!     println!("uploaded as {}", video["guid"]);
//!
//!     // Browse the library.
//!     let videos = client.list_videos(None).await?;
//!     for item in videos["items"].as_array().into_iter().flatten() {
//!         println!("  {} {}", item["guid"], item["title"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use bunny_stream::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> bunny_stream::Result<()> {
//! // Reads BUNNY_STREAM_ACCESS_KEY / BUNNY_STREAM_LIBRARY_ID from the
//! // environment for anything not set explicitly.
//! let client = ClientBuilder::new()
//!     .library_id("146289")
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod models;

pub use client::{Client, ClientBuilder};
pub use errors::{Result, StreamError};
pub use models::{
    FetchVideoOptions, ListCollectionsOptions, ListVideosOptions, PlayDataOptions,
    UploadVideoOptions, DEFAULT_COLLECTION_ORDER_BY, DEFAULT_INCLUDE_THUMBNAILS,
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_KEEP_ORIGINAL_FILES, DEFAULT_PAGE, DEFAULT_TRANSCRIBE_FORCE,
};
