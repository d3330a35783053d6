use super::{open_session, save_session};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::build_preview_document;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Document id
    pub document: String,

    /// Write the preview document here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Render the first-paint preview document with data lists expanded
pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let (config, mut session) = open_session(cwd, Some(&args.document))?;
    let before = session.selected_document()?.html.clone();
    session.tree()?;
    if session.selected_document()?.html != before {
        save_session(&config, cwd, &session)?;
    }

    let document = build_preview_document(&session.preview_html());
    match args.out {
        Some(path) => {
            std::fs::write(&path, document)?;
            println!(
                "{} Preview of {} at {}px → {}",
                "✓".green(),
                args.document.bright_white(),
                session.state().viewport.device_width,
                path.display()
            );
        }
        None => print!("{}", document),
    }
    Ok(())
}
