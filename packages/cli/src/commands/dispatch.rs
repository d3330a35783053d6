use super::{open_session, save_session};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::Action;

#[derive(Debug, Args)]
pub struct DispatchArgs {
    /// Action as JSON, e.g. {"type":"ADD_DOCUMENT","name":"team","parentId":"about"}
    pub action: String,
}

/// Run one store action against the site and save the result
pub fn dispatch(args: DispatchArgs, cwd: &str) -> Result<()> {
    let action: Action = serde_json::from_str(&args.action).context("Invalid action JSON")?;
    if action == Action::Unknown {
        println!("{} Unknown action type, site left unchanged", "⚠️".yellow());
        return Ok(());
    }

    let (config, mut session) = open_session(cwd, None)?;
    let name = action.name();
    session.dispatch(action);
    save_session(&config, cwd, &session)?;

    println!("{} {}", "✓".green(), name.bright_white());
    Ok(())
}
