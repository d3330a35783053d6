use super::{open_session, save_session};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_evaluator::Bindings;
use pagecraft_parser::Node;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Document id
    pub document: String,

    /// Print the node tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print the document's node tree. Ids assigned on the way are saved.
pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let (config, mut session) = open_session(cwd, Some(&args.document))?;
    let before = session.selected_document()?.html.clone();
    let nodes = session.tree()?;

    if session.selected_document()?.html != before {
        save_session(&config, cwd, &session)?;
        tracing::info!(document = %args.document, "Saved canonical markup with ids");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    let bindings = &session.selected_document()?.bindings;
    let mut out = String::new();
    for node in &nodes {
        render(node, 0, bindings, &mut out);
    }
    print!("{}", out);
    Ok(())
}

fn render(node: &Node, depth: usize, bindings: &Bindings, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}", node.tag.bright_blue(), node.id.dimmed()));
    if let Some(class) = node.attributes.get("class") {
        out.push_str(&format!(" .{}", class.replace(' ', ".")));
    }
    if let Some(field) = bindings.get(&node.id) {
        out.push_str(&format!(" {}", format!("⇐ {}", field).yellow()));
    }
    if let Some(text) = &node.text_content {
        out.push_str(&format!(" {:?}", text));
    }
    out.push('\n');

    for child in &node.children {
        render(child, depth + 1, bindings, out);
    }
}
