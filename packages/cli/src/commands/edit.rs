use super::{open_session, save_session};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{MovePosition, Mutation};

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Document id
    pub document: String,

    /// Id of the node to move
    pub source: String,

    /// Id of the node it is placed relative to
    pub target: String,

    /// before, after or inside
    #[arg(short, long, default_value = "inside")]
    pub position: MovePosition,
}

#[derive(Debug, Args)]
pub struct MutateArgs {
    /// Document id
    pub document: String,

    /// Mutation as JSON, e.g. {"type":"DeleteNode","nodeId":"n1"}
    pub mutation: String,
}

pub fn move_node(args: MoveArgs, cwd: &str) -> Result<()> {
    let mutation = Mutation::MoveNode {
        source_id: args.source,
        target_id: args.target,
        position: args.position,
    };
    run(&args.document, &mutation, cwd)
}

pub fn mutate(args: MutateArgs, cwd: &str) -> Result<()> {
    let mutation: Mutation =
        serde_json::from_str(&args.mutation).context("Invalid mutation JSON")?;
    run(&args.document, &mutation, cwd)
}

fn run(document: &str, mutation: &Mutation, cwd: &str) -> Result<()> {
    let (config, mut session) = open_session(cwd, Some(document))?;
    // Ids must be materialized before the mutation can address them
    session.tree()?;

    let result = session.apply_mutation(mutation)?;
    save_session(&config, cwd, &session)?;

    println!("{} {} on {}", "✓".green(), describe(mutation), document.bright_white());
    if let Some(id) = result.created_id {
        println!("  created {}", id.cyan());
    }
    Ok(())
}

fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::MoveNode {
            source_id,
            target_id,
            position,
        } => format!("moved {} {:?} {}", source_id, position, target_id).to_lowercase(),
        Mutation::ChangeTag { node_id, new_tag } => format!("retagged {} to <{}>", node_id, new_tag),
        Mutation::InsertElement { tag, .. } => format!("inserted <{}>", tag),
        Mutation::DeleteNode { node_id } => format!("deleted {}", node_id),
        Mutation::SetClass { node_id, .. } => format!("set class on {}", node_id),
        Mutation::SetText { node_id, .. } => format!("set text on {}", node_id),
        Mutation::SetAttribute { node_id, name, .. } => format!("set {} on {}", name, node_id),
        Mutation::AttachTemplate {
            element_id,
            source_id,
        } => format!("attached {} template to {}", source_id, element_id),
        Mutation::DetachTemplate { element_id } => format!("detached template from {}", element_id),
    }
}
