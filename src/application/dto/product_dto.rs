use serde::Deserialize;

/// Partial update of a product's own fields. Only non-null fields are
/// applied; the file list is never touched through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub stock: Option<u32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none() && self.stock.is_none()
    }
}
