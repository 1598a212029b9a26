//! The `dishcrop dish` commands.

use clap::{Args, Subcommand};
use dishcrop_core::api::{validate_category_name, validate_dish_name};
use dishcrop_core::{AddDishRequest, Config, MenuClient};
use std::path::PathBuf;

/// Arguments for the `dish` command.
#[derive(Args, Debug)]
pub struct DishArgs {
    #[command(subcommand)]
    pub command: DishCommand,
}

#[derive(Subcommand, Debug)]
pub enum DishCommand {
    /// Normalize a photo and create a dish with it
    Add(AddArgs),

    /// Delete a dish by name
    Delete {
        /// Dish name
        name: String,

        /// Menu to delete from (defaults to api.default_menu_id)
        #[arg(long)]
        menu_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Photo of the dish
    #[arg(required = true)]
    pub image: PathBuf,

    /// Dish name (1-20 characters)
    #[arg(short, long)]
    pub name: String,

    /// Category (defaults to 其他)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Menu to add to (defaults to api.default_menu_id)
    #[arg(long)]
    pub menu_id: Option<i64>,
}

/// Execute the dish command.
pub async fn execute(args: DishArgs, config: &Config) -> anyhow::Result<()> {
    let client = MenuClient::new(&config.api)?;

    match args.command {
        DishCommand::Add(add) => {
            let menu_id = super::resolve_menu_id(add.menu_id, config)?;
            // Check names before spending time on the photo.
            validate_dish_name(&add.name)?;
            if let Some(category) = add.category.as_deref().filter(|c| !c.trim().is_empty()) {
                validate_category_name(category)?;
            }

            let (image, report) = super::normalize_file(&add.image, config).await?;
            tracing::debug!("Payload ready: {} JPEG bytes", report.encoded_bytes);

            let request = AddDishRequest::new(menu_id, &add.name, add.category.as_deref(), image);
            client.add_dish(&request).await?;
            println!(
                "Added {} to menu {} ({})",
                request.name, menu_id, request.category_name
            );
        }

        DishCommand::Delete { name, menu_id } => {
            let menu_id = super::resolve_menu_id(menu_id, config)?;
            client.delete_dish(menu_id, &name).await?;
            println!("Deleted {} from menu {}", name.trim(), menu_id);
        }
    }

    Ok(())
}
