use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::AirtableConfig;
use crate::normalizer::RawRecord;
use crate::sources::RecordSource;
use crate::ReelError;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct ListRecordsPage {
    records: Option<Vec<RawRecord>>,
    offset: Option<String>,
}

/// Reads every row of one Airtable table, following the `offset` cursor.
pub struct AirtableSource {
    client: Client,
    api_key: String,
    base_url: String,
    base_id: String,
    table: String,
    page_size: u32,
}

impl AirtableSource {
    pub fn new(config: &AirtableConfig, timeout: Option<Duration>) -> Result<Self, ReelError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("AIRTABLE_API_KEY").ok())
            .ok_or_else(|| {
                ReelError::SourceError(
                    "AIRTABLE_API_KEY not found in config or environment".to_string(),
                )
            })?;

        if config.base_id.is_empty() || config.table.is_empty() {
            return Err(ReelError::SourceError(
                "Airtable base_id and table must be configured".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(AirtableSource {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            base_id: config.base_id.clone(),
            table: config.table.clone(),
            page_size: config
                .page_size
                .unwrap_or(MAX_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/v0/{}/{}", self.base_url, self.base_id, self.table)
    }
}

#[async_trait]
impl RecordSource for AirtableSource {
    fn source_name(&self) -> &str {
        "airtable"
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ReelError> {
        let url = self.table_url();
        debug!("Request URL: {}", url);

        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", self.page_size.to_string())];
            if let Some(offset) = &offset {
                query.push(("offset", offset.clone()));
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .query(&query)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ReelError::SourceError(format!(
                    "Airtable API error: {} - {}",
                    status, body
                )));
            }

            let page: ListRecordsPage = response.json().await?;
            let page_records = page.records.ok_or_else(|| {
                ReelError::SourceError("No records found in Airtable response".to_string())
            })?;
            debug!("Received page with {} records", page_records.len());
            records.extend(page_records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        info!("Found {} records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(base_url: String) -> AirtableConfig {
        AirtableConfig {
            api_key: Some("pat_test".to_string()),
            base_id: "appTest".to_string(),
            table: "tblVideos".to_string(),
            base_url,
            page_size: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_single_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/appTest/tblVideos")
            .match_header("authorization", "Bearer pat_test")
            .match_query(Matcher::UrlEncoded("pageSize".into(), "100".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "records": [
                        { "id": "rec1", "createdTime": "2024-05-01T00:00:00.000Z", "fields": { "Reel Title": "One" } },
                        { "id": "rec2", "fields": {} }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = AirtableSource::new(&config(server.url()), None).unwrap();
        let records = source.fetch_records().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "rec1");
        assert_eq!(records[0].fields["Reel Title"], "One");
        assert!(records[1].fields.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_follows_offset() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/v0/appTest/tblVideos")
            .match_query(Matcher::Exact("pageSize=100".into()))
            .with_status(200)
            .with_body(r#"{ "records": [{ "id": "rec1", "fields": {} }], "offset": "itr2" }"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v0/appTest/tblVideos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageSize".into(), "100".into()),
                Matcher::UrlEncoded("offset".into(), "itr2".into()),
            ]))
            .with_status(200)
            .with_body(r#"{ "records": [{ "id": "rec2", "fields": {} }] }"#)
            .create_async()
            .await;

        let source = AirtableSource::new(&config(server.url()), None).unwrap();
        let records = source.fetch_records().await.unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rec1", "rec2"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/appTest/tblVideos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"type": "INVALID_PERMISSIONS"}}"#)
            .create_async()
            .await;

        let source = AirtableSource::new(&config(server.url()), None).unwrap();
        let err = source.fetch_records().await.unwrap_err();

        assert!(matches!(err, ReelError::SourceError(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_fetch_missing_records() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v0/appTest/tblVideos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{ "unexpected": true }"#)
            .create_async()
            .await;

        let source = AirtableSource::new(&config(server.url()), None).unwrap();
        let err = source.fetch_records().await.unwrap_err();
        assert!(err.to_string().contains("No records found"));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut cfg = config("https://api.airtable.com/".to_string());
        cfg.page_size = Some(500);
        let source = AirtableSource::new(&cfg, None).unwrap();
        assert_eq!(source.page_size, 100);
        assert_eq!(
            source.table_url(),
            "https://api.airtable.com/v0/appTest/tblVideos"
        );
    }

    #[test]
    fn test_missing_table_is_rejected() {
        let mut cfg = config("https://api.airtable.com".to_string());
        cfg.table = String::new();
        assert!(AirtableSource::new(&cfg, None).is_err());
    }
}
