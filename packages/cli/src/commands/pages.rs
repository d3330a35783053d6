use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::Document;

#[derive(Debug, Args)]
pub struct PagesArgs {
    /// Print the documents as JSON instead
    #[arg(long)]
    pub json: bool,
}

pub fn pages(args: PagesArgs, cwd: &str) -> Result<()> {
    let (_, session) = open_session(cwd, None)?;
    let documents = &session.state().documents;

    if args.json {
        println!("{}", serde_json::to_string_pretty(documents)?);
        return Ok(());
    }

    println!("📄 {} pages", documents.len().to_string().bold());
    println!();
    for doc in documents {
        println!("{}", describe(doc));
    }
    Ok(())
}

fn describe(doc: &Document) -> String {
    let indent = if doc.parent_id.is_some() { "    " } else { "  " };
    let mut line = format!("{}{:<16} {}", indent, doc.id.bright_white(), doc.path.cyan());

    let params = doc.route_params();
    if !params.is_empty() {
        line.push_str(&format!("  {}", format!("params: {}", params.join(", ")).dimmed()));
    }
    if let Some(config) = &doc.data_list_config {
        line.push_str(&format!(
            "  {} {} → {}",
            "list".yellow(),
            config.element_id,
            config.source_id
        ));
    }
    if !doc.bindings.is_empty() {
        line.push_str(&format!("  {}", format!("{} bound", doc.bindings.len()).dimmed()));
    }
    line
}
