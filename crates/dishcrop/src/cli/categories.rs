//! The `dishcrop categories` command.

use clap::{Args, Subcommand};
use dishcrop_core::api::prepare_categories;
use dishcrop_core::{Config, MenuClient};

/// Arguments for the `categories` command.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// Replace the menu's categories with the given list, in order
    Save {
        /// Category names; 其他 is appended if missing
        #[arg(required = true)]
        names: Vec<String>,

        /// Menu to update (defaults to api.default_menu_id)
        #[arg(long)]
        menu_id: Option<i64>,
    },
}

/// Execute the categories command.
pub async fn execute(args: CategoriesArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        CategoriesCommand::Save { names, menu_id } => {
            let menu_id = super::resolve_menu_id(menu_id, config)?;
            let categories = prepare_categories(names.as_slice())?;
            let client = MenuClient::new(&config.api)?;
            client.save_categories(menu_id, &categories).await?;

            let listed: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
            println!("Saved categories for menu {}: {}", menu_id, listed.join(", "));
        }
    }
    Ok(())
}
