// src/lib.rs

//! Larder - versioned recipe store
//!
//! Persists structured recipes (ingredients, instructions, tags) into
//! SQLite, keeping every revision of a recipe over time.
//!
//! # Architecture
//!
//! - Revision groups: all versions of "the same" recipe share a group id
//!   equal to the first revision's own id; versions count 1, 2, 3, ...
//! - Shared entities: ingredients and tags are global rows deduplicated
//!   by exact name, created lazily and never deleted by the store
//! - Atomic writes: a revision and all its detail rows commit in one
//!   transaction or not at all
//! - Single writer: no locking or conflict resolution; the store assumes
//!   one process appending revisions

pub mod db;
mod error;
pub mod query;
pub mod revision;

pub use db::models::{
    Ingredient, IngredientCategory, Instruction, Recipe, RecipeIngredient, Tag, Unit,
};
pub use error::{Error, Result};
pub use query::{group_history, load_recipe};
pub use revision::{WrittenRevision, delete_revision, write_revision};
