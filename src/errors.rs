// /src/errors.rs
//! Error handling that never panics and names the field or element at fault
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComboBoxError {
    #[error("Configuration error for '{field}': {details}")]
    Config { field: String, details: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Element '{element_id}' already has an enhancement instance attached")]
    AlreadyAttached { element_id: String },

    #[error("Expected element is missing: {details}")]
    MissingElement { details: String },

    #[error("Remote options are not configured for this combo box")]
    RemoteNotConfigured,

    #[error("Combo box '{root_id}' has been destroyed")]
    Destroyed { root_id: String },

    #[error("Enhancement failed for element '{element_id}': {details}")]
    Enhancement { element_id: String, details: String },
}

// Dataset field extraction. The first form requires the key and decodes it
// as JSON into `$ty`; the second form returns `None` for absent or empty
// string values (JS truthiness).
#[macro_export]
macro_rules! config_field {
    ($dataset:expr, $key:expr, json $ty:ty) => {{
        let raw = $dataset.get($key).ok_or_else(|| $crate::errors::ComboBoxError::Config {
            field: $key.to_string(),
            details: "missing from dataset".to_string(),
        })?;
        serde_json::from_str::<$ty>(raw).map_err(|e| $crate::errors::ComboBoxError::Config {
            field: $key.to_string(),
            details: format!("expected {}: {}", stringify!($ty), e),
        })?
    }};
    ($dataset:expr, $key:expr, optional) => {{
        $dataset
            .get($key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }};
}

impl ComboBoxError {
    pub fn config(field: &str, details: impl Into<String>) -> Self {
        ComboBoxError::Config {
            field: field.to_string(),
            details: details.into(),
        }
    }

    pub fn missing(details: impl Into<String>) -> Self {
        ComboBoxError::MissingElement {
            details: details.into(),
        }
    }
}
