pub mod builder;
pub mod config;
pub mod editor;
pub mod error;
pub mod library;
pub mod model;
pub mod normalizer;
pub mod providers;
pub mod sections;
pub mod server;
pub mod sources;
pub mod store;

use log::{debug, info};
use std::time::Duration;

use crate::sources::{AirtableSource, RecordSource};

// Re-export builder API
pub use builder::{generate_script, GeneratedScript, ScriptRequest, ScriptRequestBuilder};

// Re-export core types
pub use editor::ScriptEditor;
pub use error::ReelError;
pub use model::{CustomRequirements, Followers, Video};
pub use normalizer::{normalize_record, normalize_records, RawRecord};
pub use sections::{parse_script, reconstruct_script, ScriptSections, SectionKind};

/// Fetch every template row from the source and normalize it.
///
/// Order follows the source. Normalization never fails, so the only
/// errors come from the fetch itself.
pub async fn fetch_videos(source: &dyn RecordSource) -> Result<Vec<Video>, ReelError> {
    let records = source.fetch_records().await?;
    debug!(
        "Normalizing {} records from {}",
        records.len(),
        source.source_name()
    );

    let videos = normalize_records(&records);
    info!("Successfully processed {} videos", videos.len());
    Ok(videos)
}

/// Same as [`fetch_videos`], reading the Airtable settings from the
/// loaded configuration.
pub async fn fetch_videos_from_config() -> Result<Vec<Video>, ReelError> {
    let config = config::AppConfig::load()?;
    let source = AirtableSource::new(&config.airtable, config.timeout.map(Duration::from_secs))?;
    fetch_videos(&source).await
}
