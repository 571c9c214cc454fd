use reelscript::model::{FALLBACK_THUMBNAIL_URL, UNKNOWN_AUTHOR, UNKNOWN_LABEL, UNTITLED_VIDEO};
use reelscript::{normalize_records, Followers, RawRecord};
use serde_json::json;

/// A page body in the shape Airtable returns, with columns named
/// inconsistently across rows.
fn records() -> Vec<RawRecord> {
    let body = json!([
        {
            "id": "recMorning",
            "createdTime": "2024-05-01T09:00:00.000Z",
            "fields": {
                "Reel Title": "3 habits that fixed my mornings",
                "username": "@morningcoach",
                "Caption*": "Try this tomorrow",
                "Views*": "2.5M",
                "Likes*": "185K",
                "Comments*": 1200,
                "Shares*": "9,400",
                "Followers*": "120K",
                "Hook type*": "Question Hook",
                "industry": ["Productivity", "Other"],
                "Viral Score": 9.2,
                "thumbnail": [{ "url": "https://dl.airtable.com/thumb.jpg", "filename": "thumb.jpg" }]
            }
        },
        {
            "id": "recLegacy",
            "fields": {
                "Title": "Legacy row",
                "Author": { "value": "Old Import" },
                "_Views": 850,
                "Likes": "93K",
                "Industry": "Fitness",
                "Viral Score": "7.5"
            }
        },
        {
            "id": "recEmpty",
            "fields": {}
        }
    ]);
    serde_json::from_value(body).unwrap()
}

#[test]
fn test_normalizes_every_record_in_order() {
    let videos = normalize_records(&records());
    let ids: Vec<&str> = videos.iter().map(|video| video.id.as_str()).collect();
    assert_eq!(ids, vec!["recMorning", "recLegacy", "recEmpty"]);
}

#[test]
fn test_current_column_names() {
    let videos = normalize_records(&records());
    let video = &videos[0];

    assert_eq!(video.title, "3 habits that fixed my mornings");
    assert_eq!(video.author, "@morningcoach");
    assert_eq!(video.caption, "Try this tomorrow");
    assert_eq!(video.views, 2_500_000);
    assert_eq!(video.likes, 185_000);
    assert_eq!(video.comments, 1_200);
    assert_eq!(video.shares, 9_400);
    assert_eq!(video.followers, Followers::Label("120K".to_string()));
    assert_eq!(video.hook_type, "Question Hook");
    assert_eq!(video.industry, "Productivity");
    assert_eq!(video.viral_score, 9.2);
    assert_eq!(video.thumbnail_url, "https://dl.airtable.com/thumb.jpg");
}

#[test]
fn test_legacy_column_names_and_shapes() {
    let videos = normalize_records(&records());
    let video = &videos[1];

    assert_eq!(video.title, "Legacy row");
    assert_eq!(video.author, "Old Import");
    assert_eq!(video.views, 850);
    assert_eq!(video.likes, 93_000);
    assert_eq!(video.industry, "Fitness");
    assert_eq!(video.viral_score, 7.5);
    assert_eq!(video.thumbnail_url, FALLBACK_THUMBNAIL_URL);
}

#[test]
fn test_empty_record_gets_defaults() {
    let videos = normalize_records(&records());
    let video = &videos[2];

    assert_eq!(video.title, UNTITLED_VIDEO);
    assert_eq!(video.author, UNKNOWN_AUTHOR);
    assert_eq!(video.industry, UNKNOWN_LABEL);
    assert_eq!(video.viral_score, 0.0);
    assert_eq!(
        (video.views, video.likes, video.comments, video.shares),
        (0, 0, 0, 0)
    );
    assert_eq!(video.thumbnail_url, FALLBACK_THUMBNAIL_URL);
}

#[test]
fn test_serializes_with_camel_case_keys() {
    let videos = normalize_records(&records());
    let value = serde_json::to_value(&videos[0]).unwrap();

    assert_eq!(value["hookType"], "Question Hook");
    assert_eq!(value["viralScore"], 9.2);
    assert_eq!(value["thumbnailUrl"], "https://dl.airtable.com/thumb.jpg");
    assert_eq!(value["followers"], "120K");
    assert!(value.get("hook_type").is_none());
}
