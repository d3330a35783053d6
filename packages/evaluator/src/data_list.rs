use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node id → field id of the enclosing data source
pub type Bindings = BTreeMap<String, String>;

/// How a bound template is materialized in the preview
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ListMode {
    /// One clone per sample record
    List,
    /// A single clone for the record at `preview_index`
    Detail,
}

/// Detail-mode record selection through a route parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field: String,
    pub param_name: String,
}

/// Binds one container element to a data source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataListConfig {
    pub element_id: String,
    pub source_id: String,
    /// Absent means the template is shown as is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ListMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub preview_index: usize,
}

impl DataListConfig {
    pub fn new(element_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            source_id: source_id.into(),
            mode: None,
            limit: None,
            filters: Vec::new(),
            preview_index: 0,
        }
    }

    pub fn with_mode(mut self, mode: ListMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_preview_index(mut self, index: usize) -> Self {
        self.preview_index = index;
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, param_name: impl Into<String>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            param_name: param_name.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_shape() {
        let config = DataListConfig::new("list", "posts")
            .with_mode(ListMode::Detail)
            .with_preview_index(1)
            .with_filter("slug", "slug");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["elementId"], "list");
        assert_eq!(json["mode"], "detail");
        assert_eq!(json["previewIndex"], 1);
        assert_eq!(json["filters"][0]["paramName"], "slug");
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: DataListConfig =
            serde_json::from_str(r#"{"elementId":"list","sourceId":"posts"}"#).unwrap();

        assert_eq!(config, DataListConfig::new("list", "posts"));
    }
}
