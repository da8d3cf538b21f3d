use serde::{Deserialize, Serialize};

/// Every listmonk response wraps its payload in `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Error body returned by the plugin boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub summary: String,
    pub detail: String,
    pub kind: String,
}

impl Diagnostic {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>, kind: impl ToString) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            kind: kind.to_string(),
        }
    }
}
