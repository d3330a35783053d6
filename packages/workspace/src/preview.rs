//! # Preview Sync
//!
//! Keeps an isolated preview surface in step with the editor without
//! reloading it.
//!
//! ```text
//!  PreviewHost ──updateHtml / updateSelection / updateClass──▶ PreviewSurface
//!              ◀──────────────── load / select ───────────────
//! ```
//!
//! The two sides share nothing but a pair of channels carrying JSON text.
//! Messages are fire-and-forget: no acknowledgement, no retry. The surface
//! always replaces its whole body on `updateHtml`, so a later message fully
//! supersedes an earlier one.

use pagecraft_parser::{parse_fragment, serialize, Content, Fragment, NODE_ID_ATTR};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Class marking the selected element inside the preview
pub const SELECTED_CLASS: &str = "editor-selected";

/// Host → surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    UpdateHtml { html: String },
    UpdateSelection { id: Option<String> },
    #[serde(rename_all = "camelCase")]
    UpdateClass { id: String, class_name: String },
}

/// Surface → host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceMessage {
    /// First paint finished; the surface is ready for messages
    Load,
    /// The user activated the element carrying `id`
    Select { id: String },
}

/// One end of the preview channel pair
#[derive(Debug)]
pub struct Link {
    tx: UnboundedSender<String>,
    rx: UnboundedReceiver<String>,
}

impl Link {
    /// Serialize and send; a closed peer is logged and otherwise ignored
    fn send<T: Serialize>(&self, message: &T) {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "Could not encode preview message");
                return;
            }
        };
        if self.tx.send(json).is_err() {
            debug!("Preview peer is gone, dropping message");
        }
    }

    /// Next well-formed message, skipping anything that does not decode
    fn try_recv<T: DeserializeOwned>(&mut self) -> Option<T> {
        while let Ok(json) = self.rx.try_recv() {
            match serde_json::from_str(&json) {
                Ok(message) => return Some(message),
                Err(error) => debug!(%error, "Ignoring malformed preview message"),
            }
        }
        None
    }
}

/// Create the host and surface ends of a preview connection
pub fn preview_channel() -> (Link, Link) {
    let (host_tx, surface_rx) = unbounded_channel();
    let (surface_tx, host_rx) = unbounded_channel();
    (
        Link {
            tx: host_tx,
            rx: host_rx,
        },
        Link {
            tx: surface_tx,
            rx: surface_rx,
        },
    )
}

/// Editor side of the preview connection.
///
/// Nothing is sent before the surface reports `load`; afterwards markup and
/// selection are only sent when they differ from what was last sent.
#[derive(Debug)]
pub struct PreviewHost {
    link: Link,
    loaded: bool,
    current_html: String,
    current_selection: Option<String>,
    painted_html: Option<String>,
    sent_html: Option<String>,
    sent_selection: Option<Option<String>>,
}

impl PreviewHost {
    pub fn new(link: Link) -> Self {
        Self {
            link,
            loaded: false,
            current_html: String::new(),
            current_selection: None,
            painted_html: None,
            sent_html: None,
            sent_selection: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Record the latest markup and selection and push whatever changed.
    ///
    /// Returns the number of messages sent.
    pub fn sync(&mut self, html: &str, selection: Option<&str>) -> usize {
        self.current_html = html.to_string();
        self.current_selection = selection.map(str::to_string);
        if !self.loaded {
            return 0;
        }

        let mut sent = 0;
        if self.sent_html.as_deref() != Some(html) {
            self.link.send(&HostMessage::UpdateHtml {
                html: html.to_string(),
            });
            self.sent_html = Some(html.to_string());
            sent += 1;
        }
        if self.sent_selection.as_ref() != Some(&self.current_selection) {
            self.link.send(&HostMessage::UpdateSelection {
                id: self.current_selection.clone(),
            });
            self.sent_selection = Some(self.current_selection.clone());
            sent += 1;
        }
        sent
    }

    /// First-paint document for a surface about to open with `html`.
    ///
    /// Markup synced before the surface loads is pushed once it does.
    pub fn first_paint(&mut self, html: &str) -> String {
        self.painted_html = Some(html.to_string());
        build_preview_document(html)
    }

    /// Replace one element's class list without resending the markup
    pub fn update_class(&mut self, id: &str, class_name: &str) {
        if self.loaded {
            self.link.send(&HostMessage::UpdateClass {
                id: id.to_string(),
                class_name: class_name.to_string(),
            });
        }
    }

    /// Handle everything the surface sent; returns the ids it selected
    pub fn pump(&mut self) -> Vec<String> {
        let mut selected = Vec::new();
        while let Some(message) = self.link.try_recv::<SurfaceMessage>() {
            match message {
                SurfaceMessage::Load => self.on_load(),
                SurfaceMessage::Select { id } => selected.push(id),
            }
        }
        selected
    }

    fn on_load(&mut self) {
        debug!("Preview surface loaded");
        self.loaded = true;
        let painted = self
            .painted_html
            .take()
            .unwrap_or_else(|| self.current_html.clone());
        self.sent_html = Some(painted);
        self.sent_selection = Some(None);

        let html = self.current_html.clone();
        let selection = self.current_selection.clone();
        self.sync(&html, selection.as_deref());
    }
}

/// The isolated preview side: holds the rendered body and the highlight
#[derive(Debug)]
pub struct PreviewSurface {
    link: Link,
    body: Fragment,
    selected: Option<String>,
}

impl PreviewSurface {
    /// Paint `html` as the initial body and report `load` to the host
    pub fn open(link: Link, html: &str) -> Self {
        let surface = Self {
            link,
            body: parse_body(html),
            selected: None,
        };
        surface.link.send(&SurfaceMessage::Load);
        surface
    }

    /// Handle every pending host message; returns how many were applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.link.try_recv::<HostMessage>() {
            match message {
                HostMessage::UpdateHtml { html } => {
                    self.body = parse_body(&html);
                    self.apply_selection();
                }
                HostMessage::UpdateSelection { id } => {
                    self.selected = id;
                    self.apply_selection();
                }
                HostMessage::UpdateClass { id, class_name } => {
                    if let Some(element) = self.body.find_element_mut(&id) {
                        element.set_attr("class", class_name);
                    }
                }
            }
            applied += 1;
        }
        applied
    }

    /// Pointer activation on the element carrying `id`
    pub fn click(&self, id: &str) {
        if self.body.find_element(id).is_some() {
            self.link.send(&SurfaceMessage::Select { id: id.to_string() });
        }
    }

    pub fn body_html(&self) -> String {
        serialize(&self.body)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Ids of the elements currently carrying the highlight class
    pub fn highlighted(&self) -> Vec<String> {
        let mut ids = Vec::new();
        collect_highlighted(&self.body.children, &mut ids);
        ids
    }

    fn apply_selection(&mut self) {
        self.body
            .visit_elements_mut(&mut |element| element.remove_class(SELECTED_CLASS));
        if let Some(id) = &self.selected {
            if let Some(element) = self.body.find_element_mut(id) {
                element.add_class(SELECTED_CLASS);
            }
        }
    }
}

fn collect_highlighted(children: &[Content], ids: &mut Vec<String>) {
    for element in children.iter().filter_map(Content::as_element) {
        if element.has_class(SELECTED_CLASS) {
            ids.push(element.attr(NODE_ID_ATTR).unwrap_or_default().to_string());
        }
        collect_highlighted(&element.children, ids);
    }
}

fn parse_body(html: &str) -> Fragment {
    match parse_fragment(html) {
        Ok(fragment) => fragment,
        Err(error) => {
            warn!(%error, "Preview body could not be parsed");
            Fragment::default()
        }
    }
}

const PREVIEW_STYLE: &str = r#"    [data-node-id] {
      cursor: pointer;
      transition: outline 0.1s;
    }
    [data-node-id]:hover {
      outline: 1px dashed #3b82f6;
    }
    .editor-selected {
      outline: 2px solid #3b82f6 !important;
    }
    .editor-template-preview {
      display: contents;
    }"#;

const PREVIEW_SCRIPT: &str = r#"    document.addEventListener('click', (e) => {
      const target = e.target.closest('[data-node-id]');
      if (target) {
        e.preventDefault();
        e.stopPropagation();
        window.parent.postMessage({ type: 'select', id: target.getAttribute('data-node-id') }, '*');
      }
    });

    let currentSelectedId = null;
    function applySelection() {
      document.querySelectorAll('.editor-selected').forEach((el) => el.classList.remove('editor-selected'));
      if (currentSelectedId) {
        const el = document.querySelector('[data-node-id="' + currentSelectedId + '"]');
        if (el) el.classList.add('editor-selected');
      }
    }

    window.addEventListener('message', (e) => {
      if (e.data?.type === 'updateSelection') {
        currentSelectedId = e.data.id;
        applySelection();
      }
      if (e.data?.type === 'updateHtml') {
        document.body.innerHTML = e.data.html;
        applySelection();
      }
      if (e.data?.type === 'updateClass') {
        const el = document.querySelector('[data-node-id="' + e.data.id + '"]');
        if (el) el.className = e.data.className;
      }
    });"#;

/// First-paint document for the preview frame, with `html` inlined in `<body>`
pub fn build_preview_document(html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <script src="https://cdn.tailwindcss.com"></script>
  <style>
{PREVIEW_STYLE}
  </style>
</head>
<body>
  {html}
  <script>
{PREVIEW_SCRIPT}
  </script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<main data-node-id="m"><h1 data-node-id="a">Hi</h1><p data-node-id="b">Body</p></main>"#;

    fn connect(html: &str) -> (PreviewHost, PreviewSurface) {
        let (host_link, surface_link) = preview_channel();
        let host = PreviewHost::new(host_link);
        let surface = PreviewSurface::open(surface_link, html);
        (host, surface)
    }

    #[test]
    fn test_nothing_sent_before_load() {
        let (host_link, mut surface_link) = preview_channel();
        let mut host = PreviewHost::new(host_link);

        assert_eq!(host.sync(PAGE, Some("a")), 0);
        assert!(surface_link.try_recv::<HostMessage>().is_none());
    }

    #[test]
    fn test_load_pushes_initial_selection_only() {
        let (mut host, mut surface) = connect(PAGE);
        host.sync(PAGE, Some("a"));

        host.pump();

        assert!(host.is_loaded());
        assert_eq!(surface.pump(), 1);
        assert_eq!(surface.highlighted(), vec!["a"]);
        assert_eq!(host.sync(PAGE, Some("a")), 0);
    }

    #[test]
    fn test_markup_changed_before_load_is_pushed() {
        let (host_link, surface_link) = preview_channel();
        let mut host = PreviewHost::new(host_link);
        host.sync(PAGE, None);
        let document = host.first_paint(PAGE);
        let mut surface = PreviewSurface::open(surface_link, PAGE);
        assert!(document.contains(PAGE));

        let edited = PAGE.replace("Hi", "Edited");
        assert_eq!(host.sync(&edited, None), 0);
        host.pump();

        assert_eq!(surface.pump(), 1);
        assert!(surface.body_html().contains("Edited"));
        assert_eq!(host.sync(&edited, None), 0);
    }

    #[test]
    fn test_redundant_updates_suppressed() {
        let (mut host, mut surface) = connect(PAGE);
        host.sync(PAGE, None);
        host.pump();

        let edited = PAGE.replace("Hi", "Hello");
        assert_eq!(host.sync(&edited, None), 1);
        assert_eq!(host.sync(&edited, None), 0);
        assert_eq!(host.sync(&edited, Some("b")), 1);
        assert_eq!(host.sync(&edited, Some("b")), 0);

        assert_eq!(surface.pump(), 2);
        assert!(surface.body_html().contains("Hello"));
        assert_eq!(surface.highlighted(), vec!["b"]);
    }

    #[test]
    fn test_update_html_reapplies_selection() {
        let (mut host, mut surface) = connect(PAGE);
        host.sync(PAGE, Some("b"));
        host.pump();
        surface.pump();

        host.sync(&PAGE.replace("Body", "New body"), Some("b"));
        surface.pump();

        assert_eq!(surface.selected(), Some("b"));
        assert_eq!(surface.highlighted(), vec!["b"]);
        assert!(surface
            .body_html()
            .contains(r#"<p data-node-id="b" class="editor-selected">New body</p>"#));
    }

    #[test]
    fn test_selection_moves_highlight() {
        let (mut host, mut surface) = connect(PAGE);
        host.sync(PAGE, Some("a"));
        host.pump();
        surface.pump();

        host.sync(PAGE, Some("b"));
        surface.pump();
        assert_eq!(surface.highlighted(), vec!["b"]);

        host.sync(PAGE, None);
        surface.pump();
        assert!(surface.highlighted().is_empty());
    }

    #[test]
    fn test_click_reports_selection() {
        let (mut host, surface) = connect(PAGE);

        surface.click("b");
        surface.click("missing");

        assert_eq!(host.pump(), vec!["b".to_string()]);
    }

    #[test]
    fn test_update_class() {
        let (mut host, mut surface) = connect(PAGE);
        host.pump();

        host.update_class("a", "text-4xl font-bold");
        surface.pump();

        assert!(surface
            .body_html()
            .contains(r#"<h1 data-node-id="a" class="text-4xl font-bold">Hi</h1>"#));
    }

    #[test]
    fn test_message_json_shape() {
        let json = serde_json::to_string(&HostMessage::UpdateClass {
            id: "a".to_string(),
            class_name: "p-4".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"updateClass","id":"a","className":"p-4"}"#);

        let select: SurfaceMessage = serde_json::from_str(r#"{"type":"select","id":"a"}"#).unwrap();
        assert_eq!(select, SurfaceMessage::Select { id: "a".to_string() });
    }

    #[test]
    fn test_preview_document_embeds_markup() {
        let document = build_preview_document(PAGE);

        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains(PAGE));
        assert!(document.contains(".editor-template-preview {\n      display: contents;"));
        assert!(document.contains("type: 'select'"));
    }
}
