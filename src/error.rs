use std::path::PathBuf;

/// Errors surfaced by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The dataset could not be read or parsed. Nothing is returned.
    #[error("dataset {} is unavailable: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A filter value outside its field's domain.
    #[error("invalid value '{value}' for {field}")]
    InvalidCriteria { field: String, value: String },

    /// Projection requested on a column that is not a known free-text or Likert column.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

impl FilterError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        FilterError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterError::InvalidCriteria {
            field: field.into(),
            value: value.into(),
        }
    }
}
