use log::debug;
use serde_json::{json, Map, Value};

use super::field::FieldValue;
use crate::model::{
    Followers, Video, ANALYSIS_UNAVAILABLE, FALLBACK_THUMBNAIL_URL, UNKNOWN_AUTHOR, UNKNOWN_LABEL,
    UNTITLED_VIDEO,
};

// Accepted column names per logical field, highest priority first.
pub const VIDEO_URL: &[&str] = &["Video Url", "Video URL", "_Video Url"];
pub const THUMBNAIL: &[&str] = &["thumbnail", "Thumbnail"];
pub const AUTHOR: &[&str] = &["username", "Author"];
pub const CAPTION: &[&str] = &["Caption*", "captions", "Caption"];
pub const SCRIPT: &[&str] = &["Script*", "Script", "Output"];
pub const VIEWS: &[&str] = &["Views*", "_Views", "Views"];
pub const LIKES: &[&str] = &["Likes*", "_Likes", "Likes"];
pub const COMMENTS: &[&str] = &["Comments*", "comments", "Comments"];
pub const SHARES: &[&str] = &["Shares*", "_Shares", "Shares"];
pub const FOLLOWERS: &[&str] = &["Followers*", "followers"];
pub const HOOK_TYPE: &[&str] = &["Hook type*", "hook type", "Hook Type"];
pub const INDUSTRY: &[&str] = &["Industry/Niche*", "industry/niche", "Industry", "industry"];
pub const VIDEO_OBJECTIVE: &[&str] = &["Video Objective"];
pub const TITLE: &[&str] = &["Reel Title", "Title"];
pub const WHY_THIS_WORKS: &[&str] = &["Why this works*", "why this works"];
pub const VIRAL_SCORE: &[&str] = &["Viral Score"];

fn text_or(fields: &Map<String, Value>, aliases: &[&str], default: &str) -> String {
    let value = FieldValue::lookup(fields, aliases).string();
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn count(fields: &Map<String, Value>, aliases: &[&str]) -> u64 {
    FieldValue::lookup(fields, aliases).count()
}

fn followers(value: FieldValue<'_>) -> Followers {
    if let FieldValue::Number(_) = value {
        return Followers::Count(value.count());
    }
    let text = value.string();
    if text.is_empty() {
        return Followers::default();
    }
    match text.trim().parse::<u64>() {
        Ok(n) => Followers::Count(n),
        Err(_) => Followers::Label(text),
    }
}

/// Builds a [`Video`] from one loosely-typed record.
///
/// Never fails: each field degrades to its own default when the record
/// omits it or carries an unexpected shape.
pub fn normalize_record(id: &str, fields: &Map<String, Value>) -> Video {
    debug!("Normalizing record {} ({} fields)", id, fields.len());

    let industry = FieldValue::lookup(fields, INDUSTRY).first_string();
    let viral_score = FieldValue::lookup(fields, VIRAL_SCORE).number().clamp(0.0, 10.0);

    Video {
        id: id.to_string(),
        video_url: text_or(fields, VIDEO_URL, ""),
        thumbnail_url: FieldValue::lookup(fields, THUMBNAIL)
            .attachment_url()
            .unwrap_or(FALLBACK_THUMBNAIL_URL)
            .to_string(),
        author: text_or(fields, AUTHOR, UNKNOWN_AUTHOR),
        caption: text_or(fields, CAPTION, ""),
        script: text_or(fields, SCRIPT, ""),
        views: count(fields, VIEWS),
        likes: count(fields, LIKES),
        comments: count(fields, COMMENTS),
        shares: count(fields, SHARES),
        followers: followers(FieldValue::lookup(fields, FOLLOWERS)),
        hook_type: text_or(fields, HOOK_TYPE, UNKNOWN_LABEL),
        industry: if industry.is_empty() {
            UNKNOWN_LABEL.to_string()
        } else {
            industry
        },
        video_objective: text_or(fields, VIDEO_OBJECTIVE, UNKNOWN_LABEL),
        title: text_or(fields, TITLE, UNTITLED_VIDEO),
        why_this_works: text_or(fields, WHY_THIS_WORKS, ANALYSIS_UNAVAILABLE),
        viral_score,
    }
}

impl Video {
    /// Writes the video back out under the preferred column names, in the
    /// same shapes the record source uses.
    pub fn to_fields(&self) -> Map<String, Value> {
        let followers = match &self.followers {
            Followers::Count(n) => json!(n),
            Followers::Label(label) => json!(label),
        };

        let mut fields = Map::new();
        fields.insert(VIDEO_URL[0].into(), json!(self.video_url));
        fields.insert(THUMBNAIL[0].into(), json!([{ "url": self.thumbnail_url }]));
        fields.insert(AUTHOR[0].into(), json!(self.author));
        fields.insert(CAPTION[0].into(), json!(self.caption));
        fields.insert(SCRIPT[0].into(), json!(self.script));
        fields.insert(VIEWS[0].into(), json!(self.views));
        fields.insert(LIKES[0].into(), json!(self.likes));
        fields.insert(COMMENTS[0].into(), json!(self.comments));
        fields.insert(SHARES[0].into(), json!(self.shares));
        fields.insert(FOLLOWERS[0].into(), followers);
        fields.insert(HOOK_TYPE[0].into(), json!(self.hook_type));
        fields.insert(INDUSTRY[0].into(), json!([self.industry]));
        fields.insert(VIDEO_OBJECTIVE[0].into(), json!(self.video_objective));
        fields.insert(TITLE[0].into(), json!(self.title));
        fields.insert(WHY_THIS_WORKS[0].into(), json!(self.why_this_works));
        fields.insert(VIRAL_SCORE[0].into(), json!(self.viral_score));
        fields
    }
}
