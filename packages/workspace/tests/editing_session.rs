//! End-to-end editing flows over the seed site

use pagecraft_editor::{MovePosition, Mutation};
use pagecraft_evaluator::{DataListConfig, DataSourceRegistry, ListMode, DATA_BIND_ATTR};
use pagecraft_parser::{find_node_by_id, Node};
use pagecraft_workspace::*;

fn seed_session() -> EditSession {
    EditSession::new(initial_state(), DataSourceRegistry::builtin())
}

fn child_ids(node: &Node) -> Vec<String> {
    node.children.iter().map(|child| child.id.clone()).collect()
}

fn action(json: &str) -> Action {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_bind_then_unbind_leaves_other_bindings() {
    let mut store = EditorStore::new(initial_state());
    store.dispatch(action(
        r#"{"type":"BIND_FIELD","documentId":"index","nodeId":"n0","fieldId":"excerpt"}"#,
    ));
    let before = store.state().document("index").unwrap().bindings.clone();

    store.dispatch(action(
        r#"{"type":"BIND_FIELD","documentId":"index","nodeId":"n1","fieldId":"title"}"#,
    ));
    store.dispatch(action(
        r#"{"type":"UNBIND_FIELD","documentId":"index","nodeId":"n1"}"#,
    ));

    let after = &store.state().document("index").unwrap().bindings;
    assert!(!after.contains_key("n1"));
    assert_eq!(after, &before);
}

#[test]
fn test_remove_data_list_always_clears_bindings() {
    let mut store = EditorStore::new(initial_state());
    for node in ["a", "b", "c"] {
        store.dispatch(Action::BindField {
            document_id: "blog".to_string(),
            node_id: node.to_string(),
            field_id: "title".to_string(),
        });
    }

    store.dispatch(action(r#"{"type":"REMOVE_DATA_LIST","documentId":"blog"}"#));

    let blog = store.state().document("blog").unwrap();
    assert!(blog.bindings.is_empty());
    assert!(blog.data_list_config.is_none());
}

#[test]
fn test_unknown_actions_are_ignored() {
    let mut store = EditorStore::new(initial_state());
    let before = store.state().clone();

    store.dispatch(action(r#"{"type":"RESET_EVERYTHING","hard":true}"#));

    assert_eq!(store.state(), &before);
}

#[test]
fn test_reorder_sections_of_seed_page() {
    let mut session = seed_session();
    let tree = session.tree().unwrap();
    let main = &tree[0];
    let ids = child_ids(main);

    session
        .move_node(&ids[2], &ids[0], MovePosition::Before)
        .unwrap();

    let tree = session.tree().unwrap();
    assert_eq!(child_ids(&tree[0]), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
}

#[test]
fn test_news_grid_as_data_list() -> anyhow::Result<()> {
    let mut session = seed_session();
    let tree = session.tree()?;
    let grid = tree[0].children[1].clone();
    let card = &grid.children[0];
    let thumb = card.children[0].id.clone();
    let title = card.children[1].id.clone();

    session
        .set_data_list(DataListConfig::new(grid.id.clone(), "posts").with_mode(ListMode::List))?;
    session.bind_field(&thumb, "thumbnail")?;
    session.bind_field(&title, "title")?;

    let preview = session.preview_html();
    assert_eq!(preview.matches(&format!(r#"{DATA_BIND_ATTR}="title""#)).count(), 3);
    assert!(preview.contains("https://picsum.photos/seed/post1/400/200"));
    assert!(preview.contains("Event announced"));
    // stored markup keeps the single authored card
    let stored = &session.selected_document()?.html;
    assert!(stored.contains("<template"));
    assert!(!stored.contains("Event announced"));
    Ok(())
}

#[test]
fn test_deleting_list_element_drops_config() {
    let mut session = seed_session();
    let tree = session.tree().unwrap();
    let grid = tree[0].children[1].clone();
    let title = grid.children[0].children[1].id.clone();

    session
        .set_data_list(DataListConfig::new(grid.id.clone(), "posts").with_mode(ListMode::List))
        .unwrap();
    session.bind_field(&title, "title").unwrap();
    session.dispatch(Action::SelectNode {
        node_id: Some(grid.id.clone()),
    });

    session
        .apply_mutation(&Mutation::DeleteNode {
            node_id: grid.id.clone(),
        })
        .unwrap();

    let doc = session.selected_document().unwrap();
    assert!(doc.data_list_config.is_none());
    assert!(doc.bindings.is_empty());
    assert_eq!(session.state().selected_node_id, None);
}

#[test]
fn test_switching_documents_resets_preview_selection() {
    let mut session = seed_session();
    let tree = session.tree().unwrap();
    let heading = tree[0].children[0].id.clone();
    let (first_paint, mut surface) = session.connect_preview();
    assert!(first_paint.contains("Latest news"));
    session.pump_preview();

    surface.click(&heading);
    session.pump_preview();
    surface.pump();
    assert_eq!(surface.highlighted(), vec![heading]);

    session.select_document("about").unwrap();
    assert_eq!(session.sync_preview(), 2);
    surface.pump();

    assert!(surface.body_html().contains("About Us"));
    assert!(surface.highlighted().is_empty());
}

#[test]
fn test_site_roundtrip_keeps_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");
    let mut session = seed_session();
    let ids = child_ids(&session.tree().unwrap()[0]);

    let state = session.into_state();
    Site {
        documents: state.documents,
        components: state.components,
    }
    .save(&path)
    .unwrap();

    let site = Site::load(&path).unwrap();
    let mut reopened = EditSession::new(
        EditorState {
            selected_document_id: Some("index".to_string()),
            ..EditorState::new(site.documents, site.components)
        },
        DataSourceRegistry::builtin(),
    );
    let tree = reopened.tree().unwrap();
    assert_eq!(child_ids(&tree[0]), ids);
    assert!(find_node_by_id(&tree, &ids[1]).is_some());
}

#[test]
fn test_select_missing_document() {
    let mut session = seed_session();

    assert!(matches!(
        session.select_document("nope"),
        Err(WorkspaceError::DocumentNotFound(_))
    ));
    assert_eq!(session.state().selected_document_id.as_deref(), Some("index"));
}
