//! # Data Sources
//!
//! External collections a template can be bound to. The expander only relies
//! on the shape: an id, ordered fields and ordered sample records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// One sample record: field id → value, in field order
pub type SampleRecord = IndexMap<String, String>;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data source definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate data source id: {0}")]
    DuplicateId(String),

    #[error("Data source '{source_id}' record {index} has unknown field '{field}'")]
    UnknownField {
        source_id: String,
        index: usize,
        field: String,
    },
}

/// Coarse type of a field, used to pick an editor icon and a bind target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    #[default]
    Text,
    Image,
    Date,
    Link,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataField {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl DataField {
    pub fn new(id: &str, name: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub fields: Vec<DataField>,
    #[serde(default)]
    pub sample_data: Vec<SampleRecord>,
}

impl DataSource {
    pub fn field(&self, id: &str) -> Option<&DataField> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Every record key must name a declared field
    fn validate(&self) -> Result<(), DataSourceError> {
        for (index, record) in self.sample_data.iter().enumerate() {
            if let Some(field) = record.keys().find(|key| self.field(key).is_none()) {
                return Err(DataSourceError::UnknownField {
                    source_id: self.id.clone(),
                    index,
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Lookup table of the data sources available to templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRegistry {
    sources: Vec<DataSource>,
}

impl DataSourceRegistry {
    pub fn new(sources: Vec<DataSource>) -> Result<Self, DataSourceError> {
        for (index, source) in sources.iter().enumerate() {
            if sources[..index].iter().any(|other| other.id == source.id) {
                return Err(DataSourceError::DuplicateId(source.id.clone()));
            }
            source.validate()?;
        }
        Ok(Self { sources })
    }

    /// The sources shipped with the editor
    pub fn builtin() -> Self {
        Self {
            sources: builtin_sources(),
        }
    }

    /// Parse a JSON array of data sources
    pub fn from_json(json: &str) -> Result<Self, DataSourceError> {
        let sources: Vec<DataSource> = serde_json::from_str(json)?;
        Self::new(sources)
    }

    pub fn load(path: &Path) -> Result<Self, DataSourceError> {
        let json = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&json)?;
        debug!(path = %path.display(), sources = registry.sources.len(), "Loaded data sources");
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&DataSource> {
        self.sources.iter().find(|source| source.id == id)
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }
}

impl Default for DataSourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Bracketed parameter names of a route path, in order.
///
/// `/products/[slug]/posts/[id]` → `["slug", "id"]`
pub fn extract_route_params(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix('[')?.strip_suffix(']'))
        .filter(|name| !name.is_empty() && !name.contains(['[', ']']))
        .map(str::to_string)
        .collect()
}

fn record(pairs: &[(&str, &str)]) -> SampleRecord {
    pairs
        .iter()
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

fn builtin_sources() -> Vec<DataSource> {
    vec![
        DataSource {
            id: "posts".to_string(),
            name: "News".to_string(),
            fields: vec![
                DataField::new("title", "Title", FieldKind::Text),
                DataField::new("excerpt", "Excerpt", FieldKind::Text),
                DataField::new("thumbnail", "Thumbnail", FieldKind::Image),
                DataField::new("publishedAt", "Published", FieldKind::Date),
                DataField::new("slug", "Slug", FieldKind::Link),
            ],
            sample_data: vec![
                record(&[
                    ("title", "New feature released"),
                    ("excerpt", "The long-awaited feature is finally here. Read on..."),
                    ("thumbnail", "https://picsum.photos/seed/post1/400/200"),
                    ("publishedAt", "2024-01-15"),
                    ("slug", "new-feature-release"),
                ]),
                record(&[
                    ("title", "Event announced"),
                    ("excerpt", "We are joining next month's conference. Come and visit..."),
                    ("thumbnail", "https://picsum.photos/seed/post2/400/200"),
                    ("publishedAt", "2024-01-10"),
                    ("slug", "event-announcement"),
                ]),
                record(&[
                    ("title", "Scheduled maintenance"),
                    ("excerpt", "The system will be briefly unavailable during maintenance..."),
                    ("thumbnail", "https://picsum.photos/seed/post3/400/200"),
                    ("publishedAt", "2024-01-05"),
                    ("slug", "maintenance-notice"),
                ]),
            ],
        },
        DataSource {
            id: "works".to_string(),
            name: "Works".to_string(),
            fields: vec![
                DataField::new("title", "Title", FieldKind::Text),
                DataField::new("image", "Image", FieldKind::Image),
                DataField::new("client", "Client", FieldKind::Text),
            ],
            sample_data: vec![
                record(&[
                    ("title", "Corporate site redesign"),
                    ("image", "https://picsum.photos/seed/work1/400/300"),
                    ("client", "ABC Inc."),
                ]),
                record(&[
                    ("title", "E-commerce build"),
                    ("image", "https://picsum.photos/seed/work2/400/300"),
                    ("client", "DEF LLC"),
                ]),
            ],
        },
        DataSource {
            id: "members".to_string(),
            name: "Team".to_string(),
            fields: vec![
                DataField::new("name", "Name", FieldKind::Text),
                DataField::new("role", "Role", FieldKind::Text),
                DataField::new("avatar", "Avatar", FieldKind::Image),
            ],
            sample_data: vec![
                record(&[
                    ("name", "Taro Tanaka"),
                    ("role", "CEO"),
                    ("avatar", "https://picsum.photos/seed/member1/100/100"),
                ]),
                record(&[
                    ("name", "Hanako Suzuki"),
                    ("role", "CTO"),
                    ("avatar", "https://picsum.photos/seed/member2/100/100"),
                ]),
                record(&[
                    ("name", "Jiro Sato"),
                    ("role", "Designer"),
                    ("avatar", "https://picsum.photos/seed/member3/100/100"),
                ]),
            ],
        },
    ]
}
