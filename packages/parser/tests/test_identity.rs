//! Stable identity across parse, edit and serialize

use pagecraft_parser::{
    ancestor_path, find_node_by_id, parse, parse_with_generator, serialize_nodes, IDGenerator,
    NODE_ID_ATTR,
};

#[test]
fn test_heading_inside_main() {
    let output = parse(r#"<main><h1 data-node-id="a">Hi</h1></main>"#);

    assert_eq!(output.nodes.len(), 1);
    let main = &output.nodes[0];
    assert_eq!(main.tag, "main");
    assert!(!main.id.is_empty());
    assert_eq!(main.attributes.get(NODE_ID_ATTR), Some(&main.id));

    let h1 = find_node_by_id(&output.nodes, "a").expect("h1");
    assert_eq!(h1.text_content.as_deref(), Some("Hi"));
}

#[test]
fn test_ids_survive_repeated_parses() {
    let markup = r#"
<main class="p-8">
  <section class="space-y-4">
    <h2>Latest</h2>
    <ul><li>One</li><li>Two</li></ul>
  </section>
</main>"#;

    let first = parse(markup);
    let second = parse(&first.html);
    let third = parse(&second.html);

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(second.html, third.html);
}

#[test]
fn test_every_element_gets_an_id() {
    let output = parse("<div><p>a<b>b</b></p><img src=x.png><br></div>");

    fn walk(nodes: &[pagecraft_parser::Node], count: &mut usize) {
        for node in nodes {
            assert!(!node.id.is_empty(), "{} has no id", node.tag);
            *count += 1;
            walk(&node.children, count);
        }
    }

    let mut count = 0;
    walk(&output.nodes, &mut count);
    assert_eq!(count, 5);
}

#[test]
fn test_sequential_generator_is_deterministic() {
    let markup = "<section><h1>Title</h1><p>Body</p></section>";

    let a = parse_with_generator(markup, &mut IDGenerator::sequential("doc"));
    let b = parse_with_generator(markup, &mut IDGenerator::sequential("doc"));

    assert_eq!(a, b);
    let path: Vec<_> = ancestor_path(&a.nodes, "doc-3")
        .iter()
        .map(|n| n.tag.as_str())
        .collect();
    assert_eq!(path, vec!["section", "p"]);
}

#[test]
fn test_serialize_nodes_matches_canonical_html() {
    let output = parse(r#"<main class="p-8"><h1>Title</h1><img src="x.png" alt="logo"></main>"#);

    assert_eq!(serialize_nodes(&output.nodes), output.html);
}

#[test]
fn test_mixed_content_preserved_in_html() {
    let output = parse(r#"<p data-node-id="p">Hello <em data-node-id="e">there</em>!</p>"#);

    assert_eq!(
        output.html,
        r#"<p data-node-id="p">Hello <em data-node-id="e">there</em>!</p>"#
    );
    assert_eq!(output.nodes[0].text_content, None);
}

#[test]
fn test_empty_markup() {
    let output = parse("");

    assert!(output.nodes.is_empty());
    assert_eq!(output.html, "");
}
