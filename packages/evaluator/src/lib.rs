//! # Pagecraft Evaluator
//!
//! Turns stored page markup into preview markup by expanding data-bound
//! templates against sample data.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_evaluator::{DataSourceRegistry, TemplateExpander};
//!
//! let sources = DataSourceRegistry::builtin();
//! let preview = TemplateExpander::new(&sources).expand(&page.html, &page.bindings, page.data_list_config.as_ref());
//! ```

pub mod data_list;
pub mod data_source;
pub mod expander;

#[cfg(test)]
mod tests_expander;

pub use data_list::{Bindings, DataListConfig, Filter, ListMode};
pub use data_source::{
    extract_route_params, DataField, DataSource, DataSourceError, DataSourceRegistry, FieldKind,
    SampleRecord,
};
pub use expander::{
    expand_template_with_data, TemplateExpander, DATA_BIND_ATTR, TEMPLATE_PREVIEW_CLASS,
};
