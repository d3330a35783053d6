//! Pages, reusable components and the site file holding both.

use crate::error::WorkspaceResult;
use pagecraft_evaluator::{extract_route_params, Bindings, DataListConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One page. `html` is the source of truth; the node tree is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub path: String,
    pub html: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub bindings: Bindings,
    #[serde(default)]
    pub data_list_config: Option<DataListConfig>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            html: html.into(),
            parent_id: None,
            bindings: Bindings::new(),
            data_list_config: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Bracketed parameters of this page's route, e.g. `slug` in `/blog/[slug]`
    pub fn route_params(&self) -> Vec<String> {
        extract_route_params(&self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub html: String,
}

/// Route of a new page named `name` under `parent`.
///
/// `index` pages take their parent's path (`/` at the root); any other name is
/// appended as a segment.
pub fn child_path(parent: Option<&Document>, name: &str) -> String {
    let base = parent.map(|parent| parent.path.as_str()).unwrap_or("");
    let base = base.trim_end_matches('/');
    if name == "index" {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else {
        format!("{}/{}", base, name)
    }
}

/// Documents and components as persisted in the site file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Site {
    pub documents: Vec<Document>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Site {
    pub fn load(path: &Path) -> WorkspaceResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let site: Site = serde_json::from_str(&json)?;
        debug!(path = %path.display(), documents = site.documents.len(), "Loaded site");
        Ok(site)
    }

    pub fn save(&self, path: &Path) -> WorkspaceResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Saved site");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_path() {
        let products = Document::new("products", "products", "/products", "");
        let root = Document::new("index", "index", "/", "");

        assert_eq!(child_path(None, "index"), "/");
        assert_eq!(child_path(None, "about"), "/about");
        assert_eq!(child_path(Some(&products), "index"), "/products");
        assert_eq!(child_path(Some(&products), "[slug]"), "/products/[slug]");
        assert_eq!(child_path(Some(&root), "team"), "/team");
    }

    #[test]
    fn test_document_json_shape() {
        let doc = Document::new("blog-slug", "[slug]", "/blog/[slug]", "<main></main>").with_parent("blog");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["parentId"], "blog");
        assert!(json["dataListConfig"].is_null());
        assert_eq!(doc.route_params(), vec!["slug"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let doc: Document = serde_json::from_str(
            r#"{"id":"a","name":"a","path":"/a","html":"","parentId":null}"#,
        )
        .unwrap();

        assert!(doc.bindings.is_empty());
        assert!(doc.data_list_config.is_none());
    }

    #[test]
    fn test_site_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        let site = Site {
            documents: vec![Document::new("index", "index", "/", "<main></main>")],
            components: vec![],
        };

        site.save(&path).unwrap();
        assert_eq!(Site::load(&path).unwrap(), site);
    }
}
