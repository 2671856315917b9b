use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stock: u32,
}

/// Body of a successful mutation, mirroring the `{status, detail}` shape
/// the API has always produced.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: u16,
    pub detail: String,
}

impl StatusResponse {
    pub fn ok(detail: &str) -> Self {
        Self {
            status: 200,
            detail: detail.to_string(),
        }
    }
}

/// Body of a successful product deletion, which carries the detail alone.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}
