use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::{seed_components, seed_documents, Site};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site file to create
    #[arg(short, long, default_value = "site.json")]
    pub site_file: String,

    /// Device width for the preview frame
    #[arg(short, long, default_value_t = pagecraft_workspace::DEFAULT_DEVICE_WIDTH)]
    pub device_width: u32,

    /// Force overwrite existing config and site file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing pagecraft site...".bright_blue().bold());

    let config = Config {
        site_file: args.site_file.clone(),
        data_sources: None,
        device_width: args.device_width,
    };

    let site_path = config.site_path(cwd);
    if site_path.exists() && !args.force {
        println!("  {} Keeping existing {}", "•".dimmed(), args.site_file);
    } else {
        let site = Site {
            documents: seed_documents(),
            components: seed_components(),
        };
        site.save(&site_path)?;
        println!(
            "  {} Created {} ({} pages)",
            "✓".green(),
            args.site_file,
            site.documents.len()
        );
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft pages");
    println!("  2. Run: pagecraft tree index");
    println!("  3. Run: pagecraft preview index --out preview.html");

    Ok(())
}
