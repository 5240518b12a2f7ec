// ABOUTME: Shopping list commands for the cookly CLI
// ABOUTME: Handles list, add, remove, tick, and quantity changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use anyhow::{anyhow, bail, Context, Result};
use cookly::assistant::RecipeAssistant;

use crate::display::print_shopping_item;

/// Print every item, open ones first
pub fn list(assistant: &RecipeAssistant) {
    let items = assistant.shopping_list().items();
    if items.is_empty() {
        println!("{}", assistant.messages().shopping_list_empty);
        return;
    }
    for item in items.iter().filter(|i| !i.completed) {
        print_shopping_item(item);
    }
    for item in items.iter().filter(|i| i.completed) {
        print_shopping_item(item);
    }
}

/// Add an item by name
pub fn add(assistant: &mut RecipeAssistant, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Item name cannot be empty");
    }
    if assistant.add_to_shopping_list(name) {
        println!("Added '{}'", name.trim());
    } else {
        println!("'{}' is already on the list", name.trim());
    }
    Ok(())
}

/// Remove an item by id
pub fn remove(assistant: &mut RecipeAssistant, id: &str) -> Result<()> {
    if !assistant.remove_shopping_item(id) {
        bail!("No shopping list item with id '{id}'");
    }
    println!("Removed {id}");
    Ok(())
}

/// Tick or untick an item
pub fn toggle(assistant: &mut RecipeAssistant, id: &str) -> Result<()> {
    let completed = assistant
        .toggle_shopping_item(id)
        .ok_or_else(|| anyhow!("No shopping list item with id '{id}'"))?;
    println!("{id}: {}", if completed { "done" } else { "to buy" });
    Ok(())
}

/// Change an item's quantity
pub fn set_quantity(assistant: &mut RecipeAssistant, id: &str, quantity: u32) -> Result<()> {
    let mut item = assistant
        .shopping_list()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("No shopping list item with id '{id}'"))?;
    item.quantity = quantity;
    assistant
        .update_shopping_item(item)
        .context("Failed to update the item")?;
    println!("{id}: x{quantity}");
    Ok(())
}
