mod airtable;

pub use airtable::AirtableSource;

use async_trait::async_trait;

use crate::normalizer::RawRecord;
use crate::ReelError;

/// Anything that can hand over the raw template rows
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ReelError>;
}
