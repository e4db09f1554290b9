// src/db/migrations.rs
//! Database migration implementations
//!
//! This module contains the individual migration functions for evolving
//! the recipe store schema. Each migration function handles a specific
//! version upgrade.

use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Initial schema - Version 1
///
/// Creates all core tables for the recipe store:
/// - recipes: One row per recipe revision, grouped by group_id
/// - ingredients: Shared ingredient entities, deduplicated by name
/// - tags: Shared tag entities, deduplicated by name
/// - instructions: Ordered steps belonging to one revision
/// - recipe_ingredients: Ingredient links with quantity and unit
/// - recipe_tags: Tag links
pub fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Recipes: one row per revision. A revision group is the set of
        -- rows sharing group_id; the group id equals the id of the
        -- group's first revision.
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_id INTEGER,
            version INTEGER NOT NULL CHECK(version >= 1),
            title TEXT NOT NULL,
            description TEXT,
            comments TEXT,
            prep_time INTEGER,
            cook_time INTEGER,
            servings INTEGER,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX idx_recipes_group_id ON recipes(group_id);

        -- Ingredients: shared across all recipes, one row per name
        CREATE TABLE ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            category TEXT CHECK(category IN ('vegetable', 'meat', 'fish', 'fruit', 'spice'))
        );

        -- Tags: shared across all recipes. parent_id points at the tag
        -- this one is a more specific form of.
        CREATE TABLE tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            parent_id INTEGER,
            FOREIGN KEY (parent_id) REFERENCES tags(id)
        );

        CREATE INDEX idx_tags_parent_id ON tags(parent_id);

        -- Instructions: steps belonging to exactly one revision
        CREATE TABLE instructions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            step_number INTEGER NOT NULL,
            description TEXT NOT NULL,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_instructions_recipe_id ON instructions(recipe_id);

        -- Ingredient links: a revision cannot link the same ingredient twice
        CREATE TABLE recipe_ingredients (
            recipe_id INTEGER NOT NULL,
            ingredient_id INTEGER NOT NULL,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL CHECK(unit IN ('g', 'kg', 'ml', 'l', 'dl', 'pcs')),
            PRIMARY KEY (recipe_id, ingredient_id),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            FOREIGN KEY (ingredient_id) REFERENCES ingredients(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_recipe_ingredients_recipe_id ON recipe_ingredients(recipe_id);

        -- Tag links: a revision cannot link the same tag twice
        CREATE TABLE recipe_tags (
            recipe_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (recipe_id, tag_id),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_recipe_tags_recipe_id ON recipe_tags(recipe_id);
        ",
    )?;

    debug!("Schema version 1 created");
    Ok(())
}
