use crate::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use toolshelf_core::catalog::{CatalogStore, PricingModel, ToolCategory, ToolRecord};
use toolshelf_core::pagination::PageWindow;
use toolshelf_core::query::{self, FilterSpec, QueryResult};
use toolshelf_core::submission::{self, ToolCandidate, UrlInfo};

/// Asynchronous catalog operations consumed by the controller and the server.
///
/// `CatalogService` is the in-process implementation; anything that can
/// answer these calls (a remote backend, a test double) can stand in for it.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn get_tools(
        &self,
        filters: &FilterSpec,
        window: PageWindow,
    ) -> std::result::Result<QueryResult, Error>;

    async fn get_categories(&self) -> std::result::Result<Vec<ToolCategory>, Error>;

    async fn get_pricing_models(&self) -> std::result::Result<Vec<PricingModel>, Error>;

    async fn get_tags(&self) -> std::result::Result<Vec<String>, Error>;

    async fn add_tool(&self, candidate: ToolCandidate) -> std::result::Result<ToolRecord, Error>;

    async fn fetch_info_from_url(&self, url: &str) -> std::result::Result<UrlInfo, Error>;
}

/// Process-wide owner of the catalog store. Cloning shares the same store.
#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    store: Arc<RwLock<CatalogStore>>,
}

impl CatalogService {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Service over the built-in catalog, or over the records in `seed_file`
    pub fn load(seed_file: Option<&Path>) -> Result<Self> {
        let store = match seed_file {
            Some(path) => load_seed_file(path)?,
            None => CatalogStore::seeded(),
        };
        log::info!("catalog loaded with {} records", store.len());
        Ok(Self::new(store))
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<ToolRecord> {
        self.store.read().await.snapshot().to_vec()
    }
}

/// Read a JSON array of tool records, kept in file order
pub fn load_seed_file(path: &Path) -> Result<CatalogStore> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read catalog file {}", path.display()))?;
    let records: Vec<ToolRecord> = serde_json::from_str(&contents)
        .wrap_err_with(|| f!("Failed to parse catalog file {}", path.display()))?;
    CatalogStore::from_records(records)
        .map_err(|e| eyre!("Invalid catalog file {}: {}", path.display(), e))
}

impl CatalogApi for CatalogService {
    async fn get_tools(
        &self,
        filters: &FilterSpec,
        window: PageWindow,
    ) -> std::result::Result<QueryResult, Error> {
        log::debug!(
            "get_tools: filters={:?} page={} limit={}",
            filters,
            window.page(),
            window.limit()
        );
        let store = self.store.read().await;
        Ok(query::query(store.snapshot(), filters, window))
    }

    async fn get_categories(&self) -> std::result::Result<Vec<ToolCategory>, Error> {
        Ok(query::distinct_categories(self.store.read().await.snapshot()))
    }

    async fn get_pricing_models(&self) -> std::result::Result<Vec<PricingModel>, Error> {
        Ok(query::distinct_pricing_models(
            self.store.read().await.snapshot(),
        ))
    }

    async fn get_tags(&self) -> std::result::Result<Vec<String>, Error> {
        Ok(query::distinct_tags(self.store.read().await.snapshot()))
    }

    async fn add_tool(&self, candidate: ToolCandidate) -> std::result::Result<ToolRecord, Error> {
        let mut store = self.store.write().await;
        let record = submission::submit(&mut store, candidate, chrono::Utc::now())?;
        log::info!("added tool {} ({})", record.name, record.id);
        Ok(record)
    }

    async fn fetch_info_from_url(&self, url: &str) -> std::result::Result<UrlInfo, Error> {
        log::debug!("fetch_info_from_url: {url}");
        Ok(submission::derive_info_from_url(url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn candidate(name: &str) -> ToolCandidate {
        ToolCandidate {
            name: name.to_string(),
            url: "https://fresh.tools".to_string(),
            description: "Freshly submitted".to_string(),
            category: ToolCategory::Productivity,
            pricing_model: PricingModel::Free,
            tags: vec!["new".to_string()],
            image_url: None,
            submitted_by_user_id: "tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_tools_default_query() {
        let service = CatalogService::load(None).unwrap();
        let result = service
            .get_tools(&FilterSpec::default(), PageWindow::new(1, 9).unwrap())
            .await
            .unwrap();
        assert_eq!(result.total_count, 15);
        assert_eq!(result.data.len(), 9);
    }

    #[tokio::test]
    async fn test_add_tool_visible_to_clones() {
        let service = CatalogService::load(None).unwrap();
        let handle = service.clone();

        let record = service.add_tool(candidate("Fresh")).await.unwrap();

        assert_eq!(handle.len().await, 16);
        assert_eq!(handle.snapshot().await[0].id, record.id);
        let tags = handle.get_tags().await.unwrap();
        assert!(tags.contains(&"new".to_string()));
    }

    #[tokio::test]
    async fn test_add_tool_validation_error() {
        let service = CatalogService::load(None).unwrap();
        let err = service.add_tool(candidate("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(service.len().await, 15);
    }

    #[tokio::test]
    async fn test_fetch_info_invalid_url() {
        let service = CatalogService::default();
        let err = service.fetch_info_from_url("not-a-url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let info = service
            .fetch_info_from_url("https://www.example.com/page")
            .await
            .unwrap();
        assert_eq!(info.name, "Example");
    }

    #[tokio::test]
    async fn test_facet_calls_are_sorted() {
        let service = CatalogService::load(None).unwrap();
        let pricing = service.get_pricing_models().await.unwrap();
        assert_eq!(pricing.first(), Some(&PricingModel::Free));
        let categories = service.get_categories().await.unwrap();
        assert_eq!(categories.first(), Some(&ToolCategory::AiAssistant));
    }

    #[test]
    fn test_load_seed_file() {
        let records = toolshelf_core::catalog::CatalogStore::seeded()
            .snapshot()
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let store = load_seed_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[0].name, "Gemini");
    }

    #[test]
    fn test_load_seed_file_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(load_seed_file(file.path()).is_err());
    }
}
