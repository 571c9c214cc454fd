//! Turns loosely-typed tabular records into [`Video`] values.

mod field;
mod video;

pub use field::{parse_formatted_number, FieldValue};
pub use video::normalize_record;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::Video;

/// One row as returned by the record source: an id plus whatever columns
/// the table happens to have.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn normalize(&self) -> Video {
        normalize_record(&self.id, &self.fields)
    }
}

impl From<&RawRecord> for Video {
    fn from(record: &RawRecord) -> Self {
        record.normalize()
    }
}

/// Normalizes every record, preserving order.
pub fn normalize_records(records: &[RawRecord]) -> Vec<Video> {
    records.iter().map(Video::from).collect()
}
