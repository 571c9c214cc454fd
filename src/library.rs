//! Browsing helpers over a fetched list of videos.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::Video;

/// Filter value meaning "no filter".
pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    ViralScore,
    Views,
    Engagement,
}

/// Search, filter and sort settings for the template library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryQuery {
    /// Case-insensitive match against title, author and caption
    pub search: String,
    pub industry: Option<String>,
    pub hook_type: Option<String>,
    pub sort: SortOrder,
}

fn is_active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|value| *value != ALL)
}

impl LibraryQuery {
    pub fn matches(&self, video: &Video) -> bool {
        let needle = self.search.to_lowercase();
        if !needle.is_empty()
            && ![&video.title, &video.author, &video.caption]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }

        if let Some(industry) = is_active(&self.industry) {
            if video.industry != industry {
                return false;
            }
        }

        if let Some(hook_type) = is_active(&self.hook_type) {
            if video.hook_type != hook_type {
                return false;
            }
        }

        true
    }

    /// Matching videos, best first according to `sort`.
    pub fn apply(&self, videos: &[Video]) -> Vec<Video> {
        let mut selected: Vec<Video> = videos
            .iter()
            .filter(|video| self.matches(video))
            .cloned()
            .collect();

        selected.sort_by(|a, b| match self.sort {
            SortOrder::ViralScore => descending(a.viral_score, b.viral_score),
            SortOrder::Views => b.views.cmp(&a.views),
            SortOrder::Engagement => descending(a.engagement_rate(), b.engagement_rate()),
        });

        selected
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Summary figures shown above the library
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub count: usize,
    pub total_views: u64,
    pub average_viral_score: f64,
    pub industries: usize,
}

impl LibraryStats {
    pub fn from_videos(videos: &[Video]) -> Self {
        if videos.is_empty() {
            return Self::default();
        }

        let total_score: f64 = videos.iter().map(|video| video.viral_score).sum();
        let industries: BTreeSet<&str> =
            videos.iter().map(|video| video.industry.as_str()).collect();

        LibraryStats {
            count: videos.len(),
            total_views: videos
                .iter()
                .fold(0u64, |total, video| total.saturating_add(video.views)),
            average_viral_score: total_score / videos.len() as f64,
            industries: industries.len(),
        }
    }
}

/// Distinct values of a field, sorted, for building filter options.
pub fn distinct<'a>(videos: &'a [Video], field: impl Fn(&'a Video) -> &'a str) -> Vec<&'a str> {
    let values: BTreeSet<&str> = videos.iter().map(field).collect();
    values.into_iter().collect()
}

/// Compact counter display: `1.2M`, `93.0K`, `850`.
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
