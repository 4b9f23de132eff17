//! Catalog domain types and the in-memory catalog store
//!
//! The store is an explicitly owned value: the shell constructs it once at
//! startup and hands it to the query engine and the submission pipeline by
//! reference. Records are kept newest-first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error type for catalog store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("A tool with id {0} already exists in the catalog")]
    DuplicateId(String),
}

/// Error returned when a category or pricing label cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}. Valid values: {valid}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

/// Fixed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    #[serde(rename = "AI Assistant")]
    AiAssistant,
    #[serde(rename = "Image Generation")]
    ImageGeneration,
    #[serde(rename = "CRM")]
    Crm,
    #[serde(rename = "Marketing Automation")]
    MarketingAutomation,
    #[serde(rename = "Development Tools")]
    DevelopmentTools,
    #[serde(rename = "Analytics")]
    Analytics,
    #[serde(rename = "No-Code/Low-Code")]
    NoCodeLowCode,
    #[serde(rename = "Productivity")]
    Productivity,
    #[serde(rename = "Video Generation")]
    VideoGeneration,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 9] = [
        ToolCategory::AiAssistant,
        ToolCategory::ImageGeneration,
        ToolCategory::Crm,
        ToolCategory::MarketingAutomation,
        ToolCategory::DevelopmentTools,
        ToolCategory::Analytics,
        ToolCategory::NoCodeLowCode,
        ToolCategory::Productivity,
        ToolCategory::VideoGeneration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::AiAssistant => "AI Assistant",
            ToolCategory::ImageGeneration => "Image Generation",
            ToolCategory::Crm => "CRM",
            ToolCategory::MarketingAutomation => "Marketing Automation",
            ToolCategory::DevelopmentTools => "Development Tools",
            ToolCategory::Analytics => "Analytics",
            ToolCategory::NoCodeLowCode => "No-Code/Low-Code",
            ToolCategory::Productivity => "Productivity",
            ToolCategory::VideoGeneration => "Video Generation",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ToolCategory {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLabelError {
                kind: "category",
                value: s.to_string(),
                valid: join_labels(ToolCategory::ALL.iter().map(|c| c.label())),
            })
    }
}

/// Fixed set of pricing models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingModel {
    #[serde(rename = "Free")]
    Free,
    #[serde(rename = "Freemium")]
    Freemium,
    #[serde(rename = "Paid")]
    Paid,
    #[serde(rename = "Contact for Price")]
    ContactForPrice,
    #[serde(rename = "Open Source")]
    OpenSource,
}

impl PricingModel {
    pub const ALL: [PricingModel; 5] = [
        PricingModel::Free,
        PricingModel::Freemium,
        PricingModel::Paid,
        PricingModel::ContactForPrice,
        PricingModel::OpenSource,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PricingModel::Free => "Free",
            PricingModel::Freemium => "Freemium",
            PricingModel::Paid => "Paid",
            PricingModel::ContactForPrice => "Contact for Price",
            PricingModel::OpenSource => "Open Source",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PricingModel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PricingModel::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLabelError {
                kind: "pricing model",
                value: s.to_string(),
                valid: join_labels(PricingModel::ALL.iter().map(|p| p.label())),
            })
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Moderation status. Only approved records are visible to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Pending,
    Approved,
    Rejected,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub category: ToolCategory,
    pub tags: Vec<String>,
    pub pricing_model: PricingModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub submitted_by_user_id: String,
    pub created_at: DateTime<Utc>,
    pub status: ToolStatus,
}

impl ToolRecord {
    pub fn is_approved(&self) -> bool {
        self.status == ToolStatus::Approved
    }
}

/// Ordered, insert-only collection of tool records (newest first)
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<ToolRecord>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records already in display order
    pub fn from_records(records: Vec<ToolRecord>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Store holding the built-in seed catalog
    pub fn seeded() -> Self {
        Self {
            records: crate::seed::seed_records(),
        }
    }

    /// Prepend a record. Rejects ids already present and leaves the store unchanged.
    pub fn insert_front(&mut self, record: ToolRecord) -> Result<(), CatalogError> {
        if self.contains_id(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        self.records.insert(0, record);
        Ok(())
    }

    pub fn snapshot(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, name: &str) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://{}.example.com", name.to_lowercase()),
            description: format!("{name} does things"),
            category: ToolCategory::Productivity,
            tags: vec![],
            pricing_model: PricingModel::Free,
            image_url: None,
            submitted_by_user_id: "tester".to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            status: ToolStatus::Approved,
        }
    }

    #[test]
    fn test_insert_front_prepends() {
        let mut store = CatalogStore::new();
        store.insert_front(record("1", "First")).unwrap();
        store.insert_front(record("2", "Second")).unwrap();

        let ids: Vec<&str> = store.snapshot().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_front_rejects_duplicate_id() {
        let mut store = CatalogStore::new();
        store.insert_front(record("1", "First")).unwrap();

        let result = store.insert_front(record("1", "Again"));
        assert_eq!(result, Err(CatalogError::DuplicateId("1".to_string())));
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].name, "First");
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let result = CatalogStore::from_records(vec![record("a", "A"), record("a", "B")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_seeded_store_has_fifteen_approved_records() {
        let store = CatalogStore::seeded();
        assert_eq!(store.len(), 15);
        assert!(store.snapshot().iter().all(|r| r.is_approved()));
        assert_eq!(store.snapshot()[0].name, "Gemini");
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!(
            "no-code/low-code".parse::<ToolCategory>().unwrap(),
            ToolCategory::NoCodeLowCode
        );
        assert_eq!(ToolCategory::Crm.to_string(), "CRM");
        let err = "Gaming".parse::<ToolCategory>().unwrap_err();
        assert!(err.to_string().contains("Unknown category: Gaming"));
    }

    #[test]
    fn test_pricing_serializes_as_label() {
        let json = serde_json::to_string(&PricingModel::ContactForPrice).unwrap();
        assert_eq!(json, "\"Contact for Price\"");
        let parsed: PricingModel = serde_json::from_str("\"Open Source\"").unwrap();
        assert_eq!(parsed, PricingModel::OpenSource);
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(record("7", "Loom")).unwrap();
        assert_eq!(value["status"], "approved");
        assert_eq!(value["category"], "Productivity");
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
        assert!(value.get("image_url").is_none());
    }
}
