//! Submission pipeline
//!
//! Validation of candidate records, id assignment and insertion into the
//! catalog store, plus the URL-derived metadata used to pre-fill a
//! submission. Nothing here performs I/O; the caller supplies the clock.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    CatalogError, CatalogStore, PricingModel, ToolCategory, ToolRecord, ToolStatus,
};

/// Submitter id recorded when the candidate does not name one
pub const DEFAULT_SUBMITTER: &str = "anonymous";

fn default_submitter() -> String {
    DEFAULT_SUBMITTER.to_string()
}

/// A record as entered by a user: everything except id, timestamp and status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCandidate {
    pub name: String,
    pub url: String,
    pub description: String,
    pub category: ToolCategory,
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_submitter")]
    pub submitted_by_user_id: String,
}

/// Error type for submissions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please fill in all required fields (missing: {})", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Error type for URL metadata derivation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlInfoError {
    #[error("Invalid URL provided: {0:?}")]
    InvalidUrl(String),
}

/// Metadata derived from a tool's URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Check that every required field is present. Reports all missing fields at once.
pub fn validate(candidate: &ToolCandidate) -> Result<(), SubmissionError> {
    let missing: Vec<&'static str> = [
        ("name", &candidate.name),
        ("url", &candidate.url),
        ("description", &candidate.description),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SubmissionError::Validation(missing))
    }
}

/// Millisecond timestamp id, moved forward until it is unused in `store`
pub fn next_id(store: &CatalogStore, now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while store.contains_id(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Validate `candidate`, stamp it and prepend it to `store`.
///
/// Submissions are auto-approved. On any error the store is left untouched.
pub fn submit(
    store: &mut CatalogStore,
    candidate: ToolCandidate,
    now: DateTime<Utc>,
) -> Result<ToolRecord, SubmissionError> {
    validate(&candidate)?;

    let record = ToolRecord {
        id: next_id(store, now),
        name: candidate.name.trim().to_string(),
        url: candidate.url.trim().to_string(),
        description: candidate.description.trim().to_string(),
        category: candidate.category,
        tags: candidate.tags,
        pricing_model: candidate.pricing_model,
        image_url: candidate
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        submitted_by_user_id: if candidate.submitted_by_user_id.trim().is_empty() {
            default_submitter()
        } else {
            candidate.submitted_by_user_id
        },
        created_at: now,
        status: ToolStatus::Approved,
    };

    store.insert_front(record.clone())?;
    Ok(record)
}

/// Split comma-separated tag input. Order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derive a display name, placeholder description and image from a URL.
///
/// The host's first label becomes the name: `https://www.example.com/page`
/// gives `Example`. Nothing is fetched.
pub fn derive_info_from_url(url: &str) -> Result<UrlInfo, UrlInfoError> {
    let trimmed = url.trim();
    if trimmed.is_empty() || !trimmed.contains('.') {
        return Err(UrlInfoError::InvalidUrl(url.to_string()));
    }

    let re = Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://)?(?:[^@/?#]*@)?([^/?#:]+)").unwrap();
    let host = re
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| UrlInfoError::InvalidUrl(url.to_string()))?;

    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().unwrap_or_default();
    if label.is_empty() {
        return Err(UrlInfoError::InvalidUrl(url.to_string()));
    }

    let name = capitalize(label);

    Ok(UrlInfo {
        description: format!(
            "Automatically derived description for {name}. Edit it to describe what the tool does."
        ),
        image_url: format!("https://picsum.photos/seed/{label}/400/300"),
        name,
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{query, FilterSpec};
    use crate::pagination::PageWindow;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn candidate(name: &str) -> ToolCandidate {
        ToolCandidate {
            name: name.to_string(),
            url: "https://newtool.dev".to_string(),
            description: "A brand new tool".to_string(),
            category: ToolCategory::DevelopmentTools,
            pricing_model: PricingModel::Free,
            tags: vec!["cli".to_string(), "cli".to_string()],
            image_url: None,
            submitted_by_user_id: "user9".to_string(),
        }
    }

    #[test]
    fn test_submit_empty_name_leaves_store_unchanged() {
        let mut store = CatalogStore::seeded();
        let before = store.len();

        let result = submit(&mut store, candidate(""), now());

        assert_eq!(result, Err(SubmissionError::Validation(vec!["name"])));
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_validation_lists_every_missing_field() {
        let mut c = candidate("  ");
        c.url = String::new();
        c.description = "\n".to_string();

        let err = validate(&c).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Validation(vec!["name", "url", "description"])
        );
        assert!(err.to_string().contains("name, url, description"));
    }

    #[test]
    fn test_submit_prepends_and_is_queryable() {
        let mut store = CatalogStore::seeded();
        let before = store.len();

        let record = submit(&mut store, candidate("Shiny"), now()).unwrap();

        assert_eq!(store.len(), before + 1);
        assert_eq!(store.snapshot()[0], record);
        assert_eq!(record.status, ToolStatus::Approved);
        assert_eq!(record.created_at, now());
        assert_eq!(record.id, now().timestamp_millis().to_string());
        assert_eq!(record.tags, vec!["cli", "cli"]);

        let result = query(
            store.snapshot(),
            &FilterSpec::default(),
            PageWindow::new(1, 9).unwrap(),
        );
        assert_eq!(result.data[0].id, record.id);
        assert_eq!(result.total_count, before + 1);
    }

    #[test]
    fn test_submit_same_instant_gets_distinct_ids() {
        let mut store = CatalogStore::new();
        let first = submit(&mut store, candidate("One"), now()).unwrap();
        let second = submit(&mut store, candidate("Two"), now()).unwrap();

        assert_ne!(first.id, second.id);
        let first_ms: i64 = first.id.parse().unwrap();
        let second_ms: i64 = second.id.parse().unwrap();
        assert_eq!(second_ms, first_ms + 1);
    }

    #[test]
    fn test_submit_defaults_blank_submitter_and_image() {
        let mut store = CatalogStore::new();
        let mut c = candidate("Anon");
        c.submitted_by_user_id = " ".to_string();
        c.image_url = Some("   ".to_string());

        let record = submit(&mut store, c, now()).unwrap();
        assert_eq!(record.submitted_by_user_id, DEFAULT_SUBMITTER);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_candidate_json_defaults() {
        let c: ToolCandidate = serde_json::from_str(
            r#"{"name": "X", "url": "https://x.io", "description": "d",
                "category": "CRM", "pricing_model": "Paid"}"#,
        )
        .unwrap();
        assert!(c.tags.is_empty());
        assert_eq!(c.submitted_by_user_id, DEFAULT_SUBMITTER);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags(" api, free,,api ,  "),
            vec!["api", "free", "api"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_derive_info_rejects_non_url() {
        assert_eq!(
            derive_info_from_url("not-a-url"),
            Err(UrlInfoError::InvalidUrl("not-a-url".to_string()))
        );
        assert!(derive_info_from_url("").is_err());
    }

    #[test]
    fn test_derive_info_strips_scheme_and_www() {
        let info = derive_info_from_url("https://www.example.com/page").unwrap();
        assert_eq!(info.name, "Example");
        assert_eq!(info.image_url, "https://picsum.photos/seed/example/400/300");
        assert!(info.description.contains("Example"));
    }

    #[test]
    fn test_derive_info_without_scheme() {
        let info = derive_info_from_url("notion.so").unwrap();
        assert_eq!(info.name, "Notion");
    }

    #[test]
    fn test_derive_info_with_port_and_subdomain() {
        let info = derive_info_from_url("http://gemini.google.com:8080/app").unwrap();
        assert_eq!(info.name, "Gemini");
    }
}
