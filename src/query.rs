// src/query.rs

//! Reading recipes back out of the store
//!
//! The mirror of `revision::write_revision`: reassembles the full recipe
//! graph for one revision, or lists the revisions of a group.

use crate::db::models::{Instruction, Recipe, RecipeIngredient, Tag};
use crate::error::Result;
use rusqlite::Connection;

/// Load one revision as a full recipe graph.
///
/// Instructions come back ordered by step number; ingredient and tag
/// links in the order they were written. An unknown id yields `None`.
pub fn load_recipe(conn: &Connection, recipe_id: i64) -> Result<Option<Recipe>> {
    let Some(mut recipe) = Recipe::find_by_id(conn, recipe_id)? else {
        return Ok(None);
    };

    recipe.instructions = Instruction::find_by_recipe(conn, recipe_id)?;
    recipe.ingredients = RecipeIngredient::find_by_recipe(conn, recipe_id)?;
    recipe.tags = Tag::find_by_recipe(conn, recipe_id)?;

    Ok(Some(recipe))
}

/// List all revisions of a group, ordered by version, scalar fields only
pub fn group_history(conn: &Connection, group_id: i64) -> Result<Vec<Recipe>> {
    Recipe::find_by_group(conn, group_id)
}
