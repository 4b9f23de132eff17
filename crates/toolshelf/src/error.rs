#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidUrl(String),

    #[error("Catalog conflict: {0}")]
    Conflict(String),

    #[error("Failed to fetch tools: {0}")]
    QueryFailure(String),

    #[error("Failed to load filter options: {0}")]
    FacetLoadFailure(String),
}

impl Error {
    /// The message carried by the error, without the kind prefix
    pub fn detail(&self) -> &str {
        match self {
            Error::Validation(msg)
            | Error::InvalidUrl(msg)
            | Error::Conflict(msg)
            | Error::QueryFailure(msg)
            | Error::FacetLoadFailure(msg) => msg,
        }
    }
}

impl From<toolshelf_core::submission::SubmissionError> for Error {
    fn from(err: toolshelf_core::submission::SubmissionError) -> Self {
        use toolshelf_core::submission::SubmissionError;
        match &err {
            SubmissionError::Validation(_) => Error::Validation(err.to_string()),
            SubmissionError::Catalog(inner) => Error::Conflict(inner.to_string()),
        }
    }
}

impl From<toolshelf_core::submission::UrlInfoError> for Error {
    fn from(err: toolshelf_core::submission::UrlInfoError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

impl From<toolshelf_core::query::QueryError> for Error {
    fn from(err: toolshelf_core::query::QueryError) -> Self {
        Error::QueryFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolshelf_core::catalog::CatalogError;
    use toolshelf_core::submission::SubmissionError;

    #[test]
    fn test_duplicate_id_is_a_conflict() {
        let err: Error = SubmissionError::Catalog(CatalogError::DuplicateId("7".to_string())).into();
        assert_eq!(
            err,
            Error::Conflict("A tool with id 7 already exists in the catalog".to_string())
        );
        assert!(err.to_string().starts_with("Catalog conflict:"));
    }

    #[test]
    fn test_missing_fields_are_validation() {
        let err: Error = SubmissionError::Validation(vec!["name"]).into();
        assert_eq!(
            err,
            Error::Validation("Please fill in all required fields (missing: name)".to_string())
        );
    }

    #[test]
    fn test_detail_drops_prefix() {
        let err = Error::QueryFailure("tags unavailable".to_string());
        assert_eq!(err.to_string(), "Failed to fetch tools: tags unavailable");
        assert_eq!(err.detail(), "tags unavailable");
    }
}
