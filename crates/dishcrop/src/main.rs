//! Dishcrop CLI - normalize dish photos and manage menus.
//!
//! Photos are center-cropped to a square, scaled to 640×640 and encoded as
//! base64 JPEG, then uploaded to the menu backend.
//!
//! # Usage
//!
//! ```bash
//! # Print the base64 payload for a photo
//! dishcrop normalize dish.jpg
//!
//! # Normalize and upload as a new dish
//! dishcrop dish add dish.jpg --name 番茄炒蛋 --category 炒菜 --menu-id 1
//!
//! # Show a menu
//! dishcrop menu show 1
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Dishcrop - normalize dish photos and manage menus.
#[derive(Parser, Debug)]
#[command(name = "dishcrop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Crop, scale and encode a photo without uploading it
    Normalize(cli::normalize::NormalizeArgs),

    /// Add or delete dishes
    Dish(cli::dish::DishArgs),

    /// Inspect menus
    Menu(cli::menu::MenuArgs),

    /// Manage a menu's categories
    Categories(cli::categories::CategoriesArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match dishcrop_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `dishcrop config path`."
            );
            dishcrop_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Dishcrop v{}", dishcrop_core::VERSION);

    match cli.command {
        Commands::Normalize(args) => cli::normalize::execute(args, &config).await,
        Commands::Dish(args) => cli::dish::execute(args, &config).await,
        Commands::Menu(args) => cli::menu::execute(args, &config).await,
        Commands::Categories(args) => cli::categories::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dish_add() {
        let parsed = Cli::try_parse_from([
            "dishcrop", "dish", "add", "dish.jpg", "--name", "番茄炒蛋", "--menu-id", "3",
        ])
        .unwrap();
        match parsed.command {
            Commands::Dish(args) => match args.command {
                cli::dish::DishCommand::Add(add) => {
                    assert_eq!(add.name, "番茄炒蛋");
                    assert_eq!(add.menu_id, Some(3));
                    assert!(add.category.is_none());
                }
                other => panic!("unexpected command: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_normalize_defaults_to_raw() {
        let parsed = Cli::try_parse_from(["dishcrop", "normalize", "a.png"]).unwrap();
        match parsed.command {
            Commands::Normalize(args) => {
                assert_eq!(args.format, cli::normalize::Format::Raw);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
