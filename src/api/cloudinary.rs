//! Cloudinary Admin + Search API client.
//!
//! | Call | Endpoint |
//! |---|---|
//! | List folders | `GET {base}/{cloud}/folders` |
//! | Search page | `POST {base}/{cloud}/resources/search` |
//!
//! Both authenticate with HTTP Basic (`api_key:api_secret`). Requests are
//! blocking and issued one at a time; there is no retry. A failed call
//! surfaces as an [`ApiError`] and the run stops.
//!
//! Response decoding lives in free functions ([`parse_folders`],
//! [`parse_search_page`], [`error_message`]) so it is testable without a
//! network.

use super::backend::{ApiError, MediaApi, SearchPage, SearchRequest};
use crate::config::{ApiConfig, Credentials};
use crate::types::RawAsset;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

/// Blocking client for one Cloudinary account.
pub struct CloudinaryApi {
    agent: Agent,
    account_url: String,
    authorization: String,
}

impl CloudinaryApi {
    pub fn new(credentials: &Credentials, api: &ApiConfig) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build();
        Self {
            agent,
            account_url: format!(
                "{}/{}",
                api.base_url.trim_end_matches('/'),
                credentials.cloud_name
            ),
            authorization: basic_auth(&credentials.api_key, &credentials.api_secret),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.account_url, path)
    }
}

impl MediaApi for CloudinaryApi {
    fn list_folders(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .agent
            .get(&self.endpoint("folders"))
            .set("Authorization", &self.authorization)
            .call();
        parse_folders(&read_body(response)?)
    }

    fn search_page(&self, request: &SearchRequest) -> Result<SearchPage, ApiError> {
        let response = self
            .agent
            .post(&self.endpoint("resources/search"))
            .set("Authorization", &self.authorization)
            .send_json(search_body(request));
        parse_search_page(&read_body(response)?)
    }
}

/// `Authorization` header value for HTTP Basic auth.
pub fn basic_auth(key: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{key}:{secret}")))
}

/// JSON body of a search call.
pub fn search_body(request: &SearchRequest) -> Value {
    let mut body = json!({
        "expression": request.expression,
        "sort_by": [{ "created_at": "desc" }],
        "max_results": request.max_results,
    });
    if let Some(cursor) = &request.next_cursor {
        body["next_cursor"] = Value::String(cursor.clone());
    }
    body
}

/// Turn a ureq result into a response body, mapping HTTP and transport
/// failures to [`ApiError`].
fn read_body(result: Result<ureq::Response, ureq::Error>) -> Result<String, ApiError> {
    match result {
        Ok(response) => response
            .into_string()
            .map_err(|e| ApiError::Transport(e.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(ApiError::Status {
                status,
                message: error_message(&body),
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
    }
}

#[derive(Deserialize)]
struct FolderList {
    #[serde(default)]
    folders: Vec<FolderEntry>,
}

#[derive(Deserialize)]
struct FolderEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: Option<String>,
}

/// Decode a folder listing into folder keys, keeping the provider's order.
///
/// The key is the folder `path`, falling back to `name` when the path is
/// missing or empty.
pub fn parse_folders(body: &str) -> Result<Vec<String>, ApiError> {
    let list: FolderList =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(list
        .folders
        .into_iter()
        .map(|entry| match entry.path {
            Some(path) if !path.is_empty() => path,
            _ => entry.name,
        })
        .filter(|key| !key.is_empty())
        .collect())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resources: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Decode one search response. An empty cursor counts as the last page.
///
/// Records are read one by one, so a malformed record degrades to an
/// empty-ish asset instead of failing the page.
pub fn parse_search_page(body: &str) -> Result<SearchPage, ApiError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(SearchPage {
        resources: response
            .resources
            .into_iter()
            .map(RawAsset::from_record)
            .collect(),
        next_cursor: response.next_cursor.filter(|cursor| !cursor.is_empty()),
    })
}

/// Pull the human-readable message out of an error body.
///
/// Cloudinary answers failures with `{"error": {"message": "..."}}`.
/// Anything else is returned trimmed, or a placeholder when empty.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| match body.trim() {
            "" => "(empty response body)".to_string(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AssetKind, asset_kind, classify};

    fn credentials() -> Credentials {
        Credentials {
            cloud_name: "demo".into(),
            api_key: "1234".into(),
            api_secret: "s3cret".into(),
        }
    }

    #[test]
    fn endpoints_are_scoped_to_account() {
        let api = CloudinaryApi::new(
            &credentials(),
            &ApiConfig {
                base_url: "https://api.cloudinary.com/v1_1/".into(),
                timeout_secs: 5,
            },
        );
        assert_eq!(
            api.endpoint("folders"),
            "https://api.cloudinary.com/v1_1/demo/folders"
        );
        assert_eq!(
            api.endpoint("resources/search"),
            "https://api.cloudinary.com/v1_1/demo/resources/search"
        );
    }

    #[test]
    fn basic_auth_encodes_key_and_secret() {
        // base64("1234:s3cret")
        assert_eq!(basic_auth("1234", "s3cret"), "Basic MTIzNDpzM2NyZXQ=");
    }

    #[test]
    fn search_body_first_page_has_no_cursor() {
        let body = search_body(&SearchRequest {
            expression: r#"folder="trip""#.into(),
            max_results: 500,
            next_cursor: None,
        });
        assert_eq!(
            body,
            json!({
                "expression": "folder=\"trip\"",
                "sort_by": [{ "created_at": "desc" }],
                "max_results": 500,
            })
        );
    }

    #[test]
    fn search_body_carries_cursor() {
        let body = search_body(&SearchRequest {
            expression: r#"folder="trip""#.into(),
            max_results: 100,
            next_cursor: Some("abc".into()),
        });
        assert_eq!(body["next_cursor"], json!("abc"));
        assert_eq!(body["max_results"], json!(100));
    }

    #[test]
    fn parse_folders_prefers_path() {
        let body = r#"{"folders":[
            {"name":"2024-april","path":"2024-april"},
            {"name":"misc","path":""},
            {"name":"","path":""}
        ],"total_count":3}"#;
        assert_eq!(parse_folders(body).unwrap(), vec!["2024-april", "misc"]);
    }

    #[test]
    fn parse_folders_empty_listing() {
        assert!(parse_folders(r#"{"folders":[]}"#).unwrap().is_empty());
        assert!(parse_folders("{}").unwrap().is_empty());
    }

    #[test]
    fn parse_folders_rejects_garbage() {
        assert!(matches!(
            parse_folders("<html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn parse_search_page_with_cursor() {
        let body = r#"{
            "total_count": 2,
            "resources": [
                {"public_id":"trip/a","secure_url":"https://res.cloudinary.com/demo/image/upload/v1/trip/a.jpg",
                 "resource_type":"image","format":"jpg","folder":"trip","created_at":"2024-04-02T10:00:00Z"},
                {"public_id":"trip/b","secure_url":"https://res.cloudinary.com/demo/video/upload/v1/trip/b.heic",
                 "resource_type":"video","format":"heic","folder":"trip","created_at":"2024-04-01T10:00:00Z"}
            ],
            "next_cursor": "c2"
        }"#;
        let page = parse_search_page(body).unwrap();
        assert_eq!(page.resources.len(), 2);
        assert_eq!(page.resources[1].format, "heic");
        assert_eq!(page.next_cursor.as_deref(), Some("c2"));
    }

    #[test]
    fn parse_search_page_last_page() {
        let page = parse_search_page(r#"{"resources":[]}"#).unwrap();
        assert!(page.resources.is_empty());
        assert_eq!(page.next_cursor, None);

        let page = parse_search_page(r#"{"resources":[],"next_cursor":""}"#).unwrap();
        assert_eq!(page.next_cursor, None);

        let page = parse_search_page(r#"{"resources":[],"next_cursor":null}"#).unwrap();
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn parse_search_page_keeps_malformed_records() {
        let body = r#"{
            "resources": [
                {"secure_url":"https://res.cloudinary.com/demo/image/upload/v1/trip/a.jpg",
                 "resource_type":"image","format":"jpg","folder":"trip","width":"640"},
                {"secure_url":"https://res.cloudinary.com/demo/image/upload/v1/trip/b.jpg",
                 "resource_type":"image","format":"jpg","created_at":1700000000},
                {"secure_url":"https://res.cloudinary.com/demo/video/upload/v1/trip/c.mov",
                 "resource_type":["video"],"format":42},
                "not a record"
            ]
        }"#;
        let page = parse_search_page(body).unwrap();
        let kinds: Vec<AssetKind> = page.resources.iter().map(asset_kind).collect();
        assert_eq!(
            kinds,
            [
                AssetKind::Image,
                AssetKind::Image,
                AssetKind::Passthrough,
                AssetKind::Passthrough,
            ]
        );
        assert_eq!(page.resources[0].width, None);
        assert_eq!(
            classify(&page.resources[2]).url,
            "https://res.cloudinary.com/demo/video/upload/v1/trip/c.mov"
        );
    }

    #[test]
    fn parse_search_page_rejects_non_array_resources() {
        assert!(matches!(
            parse_search_page(r#"{"resources":"nope"}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn error_message_from_provider_body() {
        let body = r#"{"error":{"message":"Unknown API key 1234"}}"#;
        assert_eq!(error_message(body), "Unknown API key 1234");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(""), "(empty response body)");
    }
}
