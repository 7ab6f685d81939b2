//! CLI module - Command-line interface for screen-search
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// screen-search - movie search proxy with a favorites list
#[derive(Parser)]
#[command(name = "screen-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Search the movie catalog through the cache
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Manage favorites
    #[command(alias = "fav")]
    Favorites {
        /// User owning the list (defaults to the configured user)
        #[arg(long, global = true)]
        user: Option<String>,

        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Manage the search cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// List favorites, newest first
    #[command(alias = "ls")]
    List,
    /// Add a movie to favorites
    Add {
        /// IMDb ID, e.g. tt0372784
        imdb_id: String,
        /// Movie title
        title: String,
        /// Release year
        year: String,
        /// Poster URL
        #[arg(long)]
        poster: Option<String>,
    },
    /// Remove a movie from favorites
    #[command(alias = "rm")]
    Remove {
        /// IMDb ID
        imdb_id: String,
    },
    /// Show a single favorite
    Show {
        /// IMDb ID
        imdb_id: String,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Drop every cached search result
    Clear,
}

pub use commands::*;
