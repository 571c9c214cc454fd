use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::sections::ScriptSections;

pub const UNTITLED_VIDEO: &str = "Untitled Video";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis not available";
pub const FALLBACK_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=400&h=600&fit=crop";

pub const DEFAULT_DURATION: &str = "30-60 seconds";
pub const DEFAULT_VOICE_TONE: &str = "Energetic & Enthusiastic";

/// A viral video template, normalized from whatever the record source
/// returned. Every field carries a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    pub id: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub author: String,
    pub caption: String,
    /// Script of the original video; empty when the source has none.
    pub script: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub followers: Followers,
    pub hook_type: String,
    pub industry: String,
    pub video_objective: String,
    pub title: String,
    pub why_this_works: String,
    /// 0-10 rating supplied by the data source
    pub viral_score: f64,
}

impl Default for Video {
    fn default() -> Self {
        Video {
            id: String::new(),
            video_url: String::new(),
            thumbnail_url: FALLBACK_THUMBNAIL_URL.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            caption: String::new(),
            script: String::new(),
            views: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            followers: Followers::default(),
            hook_type: UNKNOWN_LABEL.to_string(),
            industry: UNKNOWN_LABEL.to_string(),
            video_objective: UNKNOWN_LABEL.to_string(),
            title: UNTITLED_VIDEO.to_string(),
            why_this_works: ANALYSIS_UNAVAILABLE.to_string(),
            viral_score: 0.0,
        }
    }
}

impl Video {
    /// (likes + comments + shares) / views as a percentage, 0 for unseen videos.
    pub fn engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        let interactions = self.likes as f64 + self.comments as f64 + self.shares as f64;
        interactions / self.views as f64 * 100.0
    }
}

/// Follower count as the source reports it: a plain number, or a
/// descriptive label such as "1.2M" that is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Followers {
    Count(u64),
    Label(String),
}

impl Default for Followers {
    fn default() -> Self {
        Followers::Count(0)
    }
}

impl fmt::Display for Followers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Followers::Count(n) => write!(f, "{}", n),
            Followers::Label(label) => f.write_str(label),
        }
    }
}

/// Brand parameters the generated script is adapted to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomRequirements {
    pub target_audience: String,
    pub brand: String,
    pub brand_description: String,
    pub call_to_action: String,
    /// Duration bucket, e.g. "15-30 seconds"
    pub duration: String,
    pub voice_tone: String,
    pub additional_notes: String,
}

impl Default for CustomRequirements {
    fn default() -> Self {
        CustomRequirements {
            target_audience: String::new(),
            brand: String::new(),
            brand_description: String::new(),
            call_to_action: String::new(),
            duration: DEFAULT_DURATION.to_string(),
            voice_tone: DEFAULT_VOICE_TONE.to_string(),
            additional_notes: String::new(),
        }
    }
}

/// The part of a video kept alongside a saved script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnapshot {
    pub title: String,
    pub author: String,
    pub hook_type: String,
    pub industry: String,
    pub viral_score: f64,
}

impl From<&Video> for VideoSnapshot {
    fn from(video: &Video) -> Self {
        VideoSnapshot {
            title: video.title.clone(),
            author: video.author.clone(),
            hook_type: video.hook_type.clone(),
            industry: video.industry.clone(),
            viral_score: video.viral_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub category: Option<String>,
    pub target_audience: Option<String>,
    pub call_to_action: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a user supplies when creating a brand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandDraft {
    pub name: String,
    pub category: Option<String>,
    pub target_audience: Option<String>,
    pub call_to_action: Option<String>,
    pub description: Option<String>,
}

/// Partial brand update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub target_audience: Option<String>,
    pub call_to_action: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScript {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub script_sections: ScriptSections,
    pub original_video_data: Option<VideoSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScript {
    pub title: String,
    pub content: String,
    pub script_sections: ScriptSections,
    pub original_video_data: Option<VideoSnapshot>,
}

/// Partial saved-script update applied as one write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub script_sections: Option<ScriptSections>,
}
