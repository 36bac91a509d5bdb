//! Quick-start examples for the Bunny Stream Rust client.
//!
//! Run with:
//!   BUNNY_STREAM_ACCESS_KEY=... BUNNY_STREAM_LIBRARY_ID=... \
//!     cargo run --example quickstart
//!
//! Or pass the credentials directly in code (not recommended for production).

use bunny_stream::{ClientBuilder, ListVideosOptions, UploadVideoOptions};

#[tokio::main]
async fn main() -> bunny_stream::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Create a client (reads the BUNNY_STREAM_* environment variables)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    // Or provide the credentials directly:
    // let client = bunny_stream::Client::new("c9e282c1-4e79-4c3a", "146289");

    // -----------------------------------------------------------------------
    // 2. Organize: create a collection for this batch
    // -----------------------------------------------------------------------
    let collection = client.create_collection("Conference 2024").await?;
    let collection_id = collection["guid"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    println!("Collection: {} ({})", collection["name"], collection_id);
    println!();

    // -----------------------------------------------------------------------
    // 3. Upload a local file (create + upload in one call)
    // -----------------------------------------------------------------------
    let video = client
        .upload_video(
            "Opening keynote",
            "keynote.mp4",
            Some(UploadVideoOptions {
                collection_id: Some(collection_id.clone()),
                ..Default::default()
            }),
        )
        .await?;
    let guid = video["guid"].as_str().unwrap_or_default().to_string();
    println!("Uploaded video {guid}");
    println!();

    // -----------------------------------------------------------------------
    // 4. Ingest a remote file without uploading it yourself
    // -----------------------------------------------------------------------
    let fetched = client
        .fetch_video("https://example.com/panel-discussion.mp4", None)
        .await?;
    println!("Fetch queued: {}", fetched["id"]);
    println!();

    // -----------------------------------------------------------------------
    // 5. Captions and transcription
    // -----------------------------------------------------------------------
    client
        .add_caption(&guid, "en", "keynote.en.vtt", Some("English"))
        .await?;
    client.transcribe_video(&guid, "de", None).await?;
    println!("Captions uploaded, German transcription queued.");
    println!();

    // -----------------------------------------------------------------------
    // 6. Browse the library page by page
    // -----------------------------------------------------------------------
    let mut page = 1;
    loop {
        let listing = client
            .list_videos(Some(ListVideosOptions {
                collection: Some(collection_id.clone()),
                page,
                ..Default::default()
            }))
            .await?;

        let items = listing["items"].as_array().cloned().unwrap_or_default();
        for item in &items {
            println!("  {} | {}", item["guid"], item["title"]);
        }

        let total = listing["totalItems"].as_u64().unwrap_or(0);
        let per_page = listing["itemsPerPage"].as_u64().unwrap_or(1).max(1);
        if u64::from(page) * per_page >= total {
            break;
        }
        page += 1;
    }
    println!();

    // -----------------------------------------------------------------------
    // 7. Analytics
    // -----------------------------------------------------------------------
    let heatmap = client.get_video_heatmap(&guid).await?;
    println!("Heatmap points: {}", heatmap["heatmap"]);

    let stats = client
        .get_video_statistics(&guid, &[("videoGuid", guid.clone())])
        .await?;
    println!("Views: {}", stats["viewsChart"]);

    Ok(())
}
