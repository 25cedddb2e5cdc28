//! Menu loading and printing.
//!
//! Menus are YAML files with a list of `name`/`price` entries. Without a
//! file the built-in menu (`crates/cli/menu.yaml`) is used.

use std::io::Write;
use std::path::Path;

use makcik_core::Menu;
use thiserror::Error;
use tracing::{error, info};

const DEFAULT_MENU: &str = include_str!("../../menu.yaml");

/// Errors that can occur while loading a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Menu parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} menu validation errors found")]
    Invalid(usize),
}

/// Parse and validate menu YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the menu fails validation.
pub fn parse(content: &str) -> Result<Menu, MenuError> {
    let menu: Menu = serde_yaml::from_str(content)?;

    let errors = menu.validate();
    if !errors.is_empty() {
        error!("Menu validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(MenuError::Invalid(errors.len()));
    }

    Ok(menu)
}

/// Load the menu from `path`, or the built-in menu when `None`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or invalid.
pub async fn load(path: Option<&Path>) -> Result<Menu, MenuError> {
    let Some(path) = path else {
        return parse(DEFAULT_MENU);
    };

    if !path.exists() {
        return Err(MenuError::NotFound(path.display().to_string()));
    }

    info!(path = %path.display(), "Loading menu from file");
    let content = tokio::fs::read_to_string(path).await?;
    let menu = parse(&content)?;
    info!(items = menu.len(), "Parsed menu");
    Ok(menu)
}

/// Numbered menu listing, as shown in the item selector.
#[must_use]
pub fn listing(menu: &Menu, currency_symbol: &str) -> String {
    let width = menu
        .items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("  0. -- Select an item --\n");
    for (index, item) in menu.items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<width$}  {}\n",
            index + 1,
            item.name,
            item.price.display_with(currency_symbol),
        ));
        if let Some(description) = &item.description {
            out.push_str(&format!("     {description}\n"));
        }
    }
    out
}

/// Print the menu to stdout.
///
/// # Errors
///
/// Returns an error if the menu cannot be loaded or stdout is closed.
pub async fn print(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let menu = load(path).await?;
    let config = makcik_ordering::OrderingConfig::from_env()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(listing(&menu, &config.currency_symbol).as_bytes())?;
    Ok(())
}
