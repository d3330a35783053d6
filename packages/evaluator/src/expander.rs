//! # Template Expander
//!
//! Materializes data-bound `template` elements into preview markup.
//!
//! Every `template[data-source]` outside another template is replaced by a
//! `div.editor-template-preview` container holding one clone of the template
//! content per selected sample record. Bound nodes inside each clone receive
//! the record's field value and a `data-bind` marker.
//!
//! The output is for display only and is never written back to a document:
//! the same inputs always produce the same markup, and nothing passed in is
//! modified.

use crate::data_list::{Bindings, DataListConfig, ListMode};
use crate::data_source::{DataSource, DataSourceRegistry, SampleRecord};
use pagecraft_parser::{
    is_image_tag, parse_fragment, serialize, Content, Element, DATA_SOURCE_ATTR, NODE_ID_ATTR,
};
use tracing::{debug, instrument, warn};

pub const DATA_BIND_ATTR: &str = "data-bind";

/// Class of the layout-neutral clone container (`display: contents`)
pub const TEMPLATE_PREVIEW_CLASS: &str = "editor-template-preview";

pub struct TemplateExpander<'a> {
    sources: &'a DataSourceRegistry,
}

impl<'a> TemplateExpander<'a> {
    pub fn new(sources: &'a DataSourceRegistry) -> Self {
        Self { sources }
    }

    /// Expand every bound template in `markup`.
    ///
    /// Without a configured mode, or for an unknown source, templates are
    /// left in place.
    #[instrument(skip_all, fields(len = markup.len()))]
    pub fn expand(
        &self,
        markup: &str,
        bindings: &Bindings,
        config: Option<&DataListConfig>,
    ) -> String {
        let mut fragment = match parse_fragment(markup) {
            Ok(fragment) => fragment,
            Err(error) => {
                warn!(%error, "Preview markup could not be parsed, showing it unexpanded");
                return markup.to_string();
            }
        };

        let mode = config.and_then(|config| config.mode);
        let preview_index = config.map(|config| config.preview_index).unwrap_or(0);
        let pass = Pass {
            sources: self.sources,
            bindings,
            mode,
            preview_index,
        };

        let expanded = pass.expand_children(&mut fragment.children);
        debug!(expanded, "Expanded templates");
        serialize(&fragment)
    }
}

/// Expand using the built-in data sources
pub fn expand_template_with_data(
    markup: &str,
    bindings: &Bindings,
    config: Option<&DataListConfig>,
) -> String {
    TemplateExpander::new(&DataSourceRegistry::builtin()).expand(markup, bindings, config)
}

struct Pass<'a> {
    sources: &'a DataSourceRegistry,
    bindings: &'a Bindings,
    mode: Option<ListMode>,
    preview_index: usize,
}

impl Pass<'_> {
    /// Returns the number of templates replaced
    fn expand_children(&self, children: &mut [Content]) -> usize {
        let mut expanded = 0;
        for child in children.iter_mut() {
            let Content::Element(element) = child else {
                continue;
            };

            if !element.is_template() {
                expanded += self.expand_children(&mut element.children);
                continue;
            }

            // Template content is inert: nested templates are not searched
            if let Some(container) = self.expand_template(element) {
                *child = Content::Element(container);
                expanded += 1;
            }
        }
        expanded
    }

    fn expand_template(&self, template: &Element) -> Option<Element> {
        let source_id = template.attr(DATA_SOURCE_ATTR).filter(|id| !id.is_empty())?;
        let Some(source) = self.sources.get(source_id) else {
            debug!(source = source_id, "Unknown data source, leaving template as is");
            return None;
        };
        let mode = self.mode?;

        let mut container = Element::new("div")
            .with_attr("class", TEMPLATE_PREVIEW_CLASS)
            .with_attr(NODE_ID_ATTR, template.attr(NODE_ID_ATTR).unwrap_or_default())
            .with_attr(DATA_SOURCE_ATTR, source_id);

        for record in self.records(source, mode) {
            let mut clone = template.children.clone();
            self.bind_record(&mut clone, record);
            container.children.extend(clone);
        }
        Some(container)
    }

    fn records<'s>(&self, source: &'s DataSource, mode: ListMode) -> &'s [SampleRecord] {
        match mode {
            ListMode::List => &source.sample_data,
            ListMode::Detail => {
                let start = self.preview_index.min(source.sample_data.len());
                let end = (start + 1).min(source.sample_data.len());
                &source.sample_data[start..end]
            }
        }
    }

    fn bind_record(&self, children: &mut [Content], record: &SampleRecord) {
        for child in children.iter_mut() {
            let Content::Element(element) = child else {
                continue;
            };

            let field = element.id().and_then(|id| self.bindings.get(id));
            if let Some(field) = field {
                element.set_attr(DATA_BIND_ATTR, field.as_str());
                match record.get(field).filter(|value| !value.is_empty()) {
                    Some(value) if is_image_tag(&element.tag) => element.set_attr("src", value.as_str()),
                    Some(value) => element.set_text(value.as_str()),
                    None => {}
                }
            }

            if !element.is_template() {
                self.bind_record(&mut element.children, record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(node, field)| (node.to_string(), field.to_string()))
            .collect()
    }

    #[test]
    fn test_no_mode_leaves_template() {
        let markup = r#"<ul data-node-id="l"><template data-source="posts" data-node-id="t"><li data-node-id="i">x</li></template></ul>"#;
        let config = DataListConfig::new("l", "posts");

        assert_eq!(expand_template_with_data(markup, &Bindings::new(), Some(&config)), markup);
        assert_eq!(expand_template_with_data(markup, &Bindings::new(), None), markup);
    }

    #[test]
    fn test_unknown_source_leaves_template() {
        let markup = r#"<ul data-node-id="l"><template data-source="nope" data-node-id="t"><li data-node-id="i">x</li></template></ul>"#;
        let config = DataListConfig::new("l", "nope").with_mode(ListMode::List);

        assert_eq!(expand_template_with_data(markup, &Bindings::new(), Some(&config)), markup);
    }

    #[test]
    fn test_container_replaces_template() {
        let markup = r#"<ul data-node-id="l"><template data-source="works" data-node-id="t"><li data-node-id="i">x</li></template></ul>"#;
        let config = DataListConfig::new("l", "works").with_mode(ListMode::List);

        let html = expand_template_with_data(markup, &Bindings::new(), Some(&config));

        assert_eq!(
            html,
            r#"<ul data-node-id="l"><div class="editor-template-preview" data-node-id="t" data-source="works"><li data-node-id="i">x</li><li data-node-id="i">x</li></div></ul>"#
        );
    }

    #[test]
    fn test_image_binding_sets_src() {
        let markup = r#"<div data-node-id="d"><template data-source="members" data-node-id="t"><img data-node-id="a" src="p.png"><b data-node-id="n">Name</b></template></div>"#;
        let config = DataListConfig::new("d", "members")
            .with_mode(ListMode::Detail)
            .with_preview_index(2);

        let html = expand_template_with_data(
            markup,
            &bindings(&[("a", "avatar"), ("n", "name")]),
            Some(&config),
        );

        assert!(html.contains(r#"<img data-node-id="a" src="https://picsum.photos/seed/member3/100/100" data-bind="avatar">"#));
        assert!(html.contains(r#"<b data-node-id="n" data-bind="name">Jiro Sato</b>"#));
    }

    #[test]
    fn test_missing_value_keeps_placeholder() {
        let registry = DataSourceRegistry::from_json(
            r#"[{"id":"s","name":"S","fields":[{"id":"f","name":"F"}],"sampleData":[{"f":""},{}]}]"#,
        )
        .unwrap();
        let markup = r#"<div data-node-id="d"><template data-source="s" data-node-id="t"><p data-node-id="p">Placeholder</p></template></div>"#;
        let config = DataListConfig::new("d", "s").with_mode(ListMode::List);

        let html = TemplateExpander::new(&registry).expand(markup, &bindings(&[("p", "f")]), Some(&config));

        assert_eq!(html.matches(r#"data-bind="f">Placeholder</p>"#).count(), 2);
    }

    #[test]
    fn test_detail_out_of_range_is_empty_container() {
        let markup = r#"<div data-node-id="d"><template data-source="works" data-node-id="t"><p data-node-id="p">x</p></template></div>"#;
        let config = DataListConfig::new("d", "works")
            .with_mode(ListMode::Detail)
            .with_preview_index(9);

        let html = expand_template_with_data(markup, &Bindings::new(), Some(&config));

        assert_eq!(
            html,
            r#"<div data-node-id="d"><div class="editor-template-preview" data-node-id="t" data-source="works"></div></div>"#
        );
    }

    #[test]
    fn test_nested_templates_are_not_expanded() {
        let markup = r#"<div data-node-id="d"><template data-source="posts" data-node-id="t"><template data-source="works" data-node-id="t2"><i data-node-id="x">w</i></template></template></div>"#;
        let config = DataListConfig::new("d", "posts").with_mode(ListMode::Detail);

        let html = expand_template_with_data(markup, &Bindings::new(), Some(&config));

        assert_eq!(html.matches("editor-template-preview").count(), 1);
        assert!(html.contains(r#"<template data-source="works" data-node-id="t2">"#));
    }
}
