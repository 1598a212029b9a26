//! The `dishcrop menu` command.

use clap::{Args, Subcommand};
use dishcrop_core::{Config, MenuClient, OutputFormat, OutputWriter};

/// Arguments for the `menu` command.
#[derive(Args, Debug)]
pub struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCommand,
}

#[derive(Subcommand, Debug)]
pub enum MenuCommand {
    /// Print a menu with its categories and dishes as JSON
    Show {
        /// Menu id (defaults to api.default_menu_id)
        id: Option<i64>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Execute the menu command.
pub async fn execute(args: MenuArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        MenuCommand::Show { id, pretty } => {
            let menu_id = super::resolve_menu_id(id, config)?;
            let client = MenuClient::new(&config.api)?;
            let info = client.combine_info(menu_id).await?;
            tracing::info!(
                "Menu {:?}: {} categories, {} dishes",
                info.menu.name,
                info.categories.len(),
                info.dishes.len()
            );

            let mut writer = OutputWriter::new(std::io::stdout().lock(), OutputFormat::Json, pretty);
            writer.write_json(&info)?;
            writer.flush()?;
        }
    }
    Ok(())
}
