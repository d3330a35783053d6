//! Expansion scenarios over realistic page markup

use crate::*;
use pagecraft_parser::parse;

const NEWS: &str = r#"<main data-node-id="main"><section data-node-id="news" class="grid grid-cols-3 gap-4"><template data-source="posts" data-node-id="tpl"><article data-node-id="card" class="rounded"><img data-node-id="thumb" src="https://picsum.photos/seed/placeholder/400/200" alt="Thumbnail"><h3 data-node-id="title">Title</h3><p data-node-id="excerpt">Excerpt</p></article></template></section></main>"#;

fn news_bindings() -> Bindings {
    [("thumb", "thumbnail"), ("title", "title"), ("excerpt", "excerpt")]
        .into_iter()
        .map(|(node, field)| (node.to_string(), field.to_string()))
        .collect()
}

fn cards(html: &str) -> Vec<pagecraft_parser::Node> {
    let tree = parse(html).nodes;
    let container = pagecraft_parser::find_node_by_id(&tree, "tpl").expect("container");
    assert_eq!(container.tag, "div");
    container.children.clone()
}

#[test]
fn test_list_mode_clones_every_record() {
    let config = DataListConfig::new("news", "posts").with_mode(ListMode::List);

    let html = expand_template_with_data(NEWS, &news_bindings(), Some(&config));

    let cards = cards(&html);
    assert_eq!(cards.len(), 3);
    let titles: Vec<_> = cards
        .iter()
        .map(|card| card.children[1].text_content.clone().unwrap_or_default())
        .collect();
    assert_eq!(
        titles,
        vec!["New feature released", "Event announced", "Scheduled maintenance"]
    );
}

#[test]
fn test_list_mode_ignores_limit() {
    let mut config = DataListConfig::new("news", "posts").with_mode(ListMode::List);
    config.limit = Some(1);

    let html = expand_template_with_data(NEWS, &news_bindings(), Some(&config));

    assert_eq!(cards(&html).len(), 3);
}

#[test]
fn test_detail_mode_uses_preview_index() {
    let config = DataListConfig::new("news", "posts")
        .with_mode(ListMode::Detail)
        .with_preview_index(1)
        .with_filter("slug", "slug");

    let html = expand_template_with_data(NEWS, &news_bindings(), Some(&config));

    let cards = cards(&html);
    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(
        card.children[0].attributes.get("src").map(String::as_str),
        Some("https://picsum.photos/seed/post2/400/200")
    );
    assert_eq!(card.children[1].text_content.as_deref(), Some("Event announced"));
    assert_eq!(
        card.children[2].attributes.get(DATA_BIND_ATTR).map(String::as_str),
        Some("excerpt")
    );
}

#[test]
fn test_container_keeps_parent_layout() {
    let config = DataListConfig::new("news", "posts").with_mode(ListMode::List);

    let html = expand_template_with_data(NEWS, &news_bindings(), Some(&config));

    let tree = parse(&html).nodes;
    let section = pagecraft_parser::find_node_by_id(&tree, "news").unwrap();
    assert_eq!(section.children.len(), 1);
    assert_eq!(
        section.children[0].attributes.get("class").map(String::as_str),
        Some(TEMPLATE_PREVIEW_CLASS)
    );
    assert_eq!(
        section.attributes.get("class").map(String::as_str),
        Some("grid grid-cols-3 gap-4")
    );
}

#[test]
fn test_expansion_is_idempotent_and_pure() {
    let bindings = news_bindings();
    let config = DataListConfig::new("news", "posts").with_mode(ListMode::List);
    let before = (NEWS.to_string(), bindings.clone(), config.clone());

    let first = expand_template_with_data(NEWS, &bindings, Some(&config));
    let second = expand_template_with_data(NEWS, &bindings, Some(&config));

    assert_eq!(first, second);
    assert_eq!(before, (NEWS.to_string(), bindings, config));
}

#[test]
fn test_unbound_nodes_keep_template_content() {
    let config = DataListConfig::new("news", "posts").with_mode(ListMode::Detail);

    let html = expand_template_with_data(NEWS, &Bindings::new(), Some(&config));

    assert!(!html.contains(DATA_BIND_ATTR));
    assert!(html.contains(r#"<h3 data-node-id="title">Title</h3>"#));
}

#[test]
fn test_registry_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sources.json");
    std::fs::write(
        &path,
        r#"[{"id":"posts","name":"Posts","fields":[{"id":"title","name":"Title","kind":"text"}],"sampleData":[{"title":"Only one"}]}]"#,
    )
    .unwrap();

    let registry = DataSourceRegistry::load(&path).unwrap();
    let config = DataListConfig::new("news", "posts").with_mode(ListMode::List);
    let html = TemplateExpander::new(&registry).expand(NEWS, &news_bindings(), Some(&config));

    let cards = cards(&html);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].children[1].text_content.as_deref(), Some("Only one"));
}
