// ABOUTME: Cookly CLI - fridge photo and ingredient list to recipe suggestions from the terminal
// ABOUTME: Handles analysis, search, favorites, share links, shopping list, and language selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors
//!
//! Usage:
//! ```bash
//! # Suggest recipes from a fridge photo
//! cookly analyze fridge.jpg --filter vegetarian
//!
//! # Suggest recipes from typed ingredients and save them
//! cookly suggest eggs spinach feta --cuisine Greek --save
//!
//! # Look up an ingredient
//! cookly info sumac
//!
//! # Favorites
//! cookly favorites list
//! cookly favorites share "Spinach Frittata"
//!
//! # Open a shared link and keep the recipe
//! cookly open "https://cookly.app/?recipe=..." --save
//!
//! # Shopping list
//! cookly shopping add "lemons"
//! cookly shopping done 1718000000000
//!
//! # Switch interface language
//! cookly lang es
//! ```

mod commands;
mod display;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cookly::assistant::RecipeAssistant;
use cookly::config::AssistantConfig;
use cookly::logging::LoggingConfig;
use cookly::models::DietaryFilter;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "cookly",
    about = "Turn what is in your fridge into recipes",
    long_about = "Analyze a fridge photo or a list of ingredients and get recipe suggestions, \
                  with favorites, share links, and a shopping list kept on this machine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Language for this run (two-letter code, e.g. "es")
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Options shared by commands that produce suggestions
#[derive(clap::Args)]
struct SearchOptions {
    /// Dietary filter (repeatable): vegetarian, vegan, gluten-free, keto, ...
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<DietaryFilter>,

    /// Preferred cuisine (repeatable)
    #[arg(long = "cuisine")]
    cuisines: Vec<String>,

    /// Save every suggestion to favorites
    #[arg(long)]
    save: bool,

    /// Skip fetching dish images
    #[arg(long)]
    no_images: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Suggest recipes from a fridge photo
    Analyze {
        /// Photo file (JPEG, PNG, or WebP)
        photo: PathBuf,

        /// Ingredients to add to what the photo shows
        #[arg(long = "with")]
        extra: Vec<String>,

        #[command(flatten)]
        options: SearchOptions,
    },

    /// Suggest recipes from typed ingredients
    Suggest {
        /// Ingredients you have
        #[arg(required = true)]
        ingredients: Vec<String>,

        #[command(flatten)]
        options: SearchOptions,
    },

    /// Short facts about an ingredient, with sources
    Info {
        /// Ingredient name
        ingredient: String,
    },

    /// Favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Open a shared recipe link
    Open {
        /// Link containing a `recipe` parameter
        url: String,

        /// Save the recipe to favorites
        #[arg(long)]
        save: bool,
    },

    /// Shopping list
    Shopping {
        #[command(subcommand)]
        action: ShoppingCommand,
    },

    /// Show or change the interface language
    Lang {
        /// Language code; lists languages when omitted
        code: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FavoritesCommand {
    /// List saved recipes
    List {
        /// Show ingredients and steps
        #[arg(long, short = 'd')]
        detailed: bool,

        /// Fetch images for favorites that have none
        #[arg(long)]
        images: bool,
    },

    /// Show one saved recipe in full
    Show {
        /// Recipe name
        name: String,
    },

    /// Remove a saved recipe
    Remove {
        /// Recipe name
        name: String,
    },

    /// Print a share link for a saved recipe
    Share {
        /// Recipe name
        name: String,
    },

    /// Add a recipe's missing ingredients to the shopping list
    Shop {
        /// Recipe name
        name: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ShoppingCommand {
    /// List items
    List,

    /// Add an item
    Add {
        /// Item name
        name: String,
    },

    /// Remove an item
    Remove {
        /// Item id
        id: String,
    },

    /// Tick or untick an item
    Done {
        /// Item id
        id: String,
    },

    /// Change an item's quantity
    Quantity {
        /// Item id
        id: String,

        /// New quantity
        quantity: u32,
    },
}

fn parse_filter(value: &str) -> Result<DietaryFilter, String> {
    DietaryFilter::parse(value).ok_or_else(|| {
        let known: Vec<&str> = DietaryFilter::ALL.iter().map(DietaryFilter::key).collect();
        format!("unknown filter '{value}' (expected one of {})", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = AssistantConfig::from_env().context("Failed to load configuration")?;
    if cli.lang.is_some() {
        config.initial_language.clone_from(&cli.lang);
    }
    debug!(?config, "Configuration loaded");

    let mut assistant =
        RecipeAssistant::from_config(&config).context("Failed to start the assistant")?;
    if let Some(code) = cli.lang.as_deref() {
        if !matches!(cli.command, Command::Lang { .. }) {
            commands::switch_language(&mut assistant, code).await;
        }
    }

    match cli.command {
        Command::Analyze {
            photo,
            extra,
            options,
        } => commands::recipes::analyze(&mut assistant, &photo, &extra, options.into()).await,
        Command::Suggest {
            ingredients,
            options,
        } => commands::recipes::suggest(&mut assistant, &ingredients, options.into()).await,
        Command::Info { ingredient } => commands::recipes::info(&assistant, &ingredient).await,
        Command::Favorites { action } => match action {
            FavoritesCommand::List { detailed, images } => {
                commands::favorites::list(&mut assistant, detailed, images).await;
                Ok(())
            }
            FavoritesCommand::Show { name } => commands::favorites::show(&assistant, &name),
            FavoritesCommand::Remove { name } => commands::favorites::remove(&mut assistant, &name),
            FavoritesCommand::Share { name } => commands::favorites::share(&mut assistant, &name),
            FavoritesCommand::Shop { name } => commands::favorites::shop(&mut assistant, &name),
        },
        Command::Open { url, save } => commands::favorites::open(&mut assistant, &url, save),
        Command::Shopping { action } => match action {
            ShoppingCommand::List => {
                commands::shopping::list(&assistant);
                Ok(())
            }
            ShoppingCommand::Add { name } => commands::shopping::add(&mut assistant, &name),
            ShoppingCommand::Remove { id } => commands::shopping::remove(&mut assistant, &id),
            ShoppingCommand::Done { id } => commands::shopping::toggle(&mut assistant, &id),
            ShoppingCommand::Quantity { id, quantity } => {
                commands::shopping::set_quantity(&mut assistant, &id, quantity)
            }
        },
        Command::Lang { code } => {
            commands::language(&mut assistant, code.as_deref()).await;
            Ok(())
        }
    }
}

impl From<SearchOptions> for commands::recipes::Search {
    fn from(options: SearchOptions) -> Self {
        Self {
            filters: options.filters,
            cuisines: options.cuisines,
            save: options.save,
            images: !options.no_images,
        }
    }
}
