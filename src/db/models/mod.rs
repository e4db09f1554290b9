// src/db/models/mod.rs

//! Data models for recipe store entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating, reading, and deleting records.
//! `Ingredient::resolve_or_create` and `Tag::resolve_or_create` implement
//! the lookup-or-insert deduplication that keeps one row per entity name.

mod ingredient;
mod instruction;
mod recipe;
mod recipe_ingredient;
mod tag;

pub use ingredient::{Ingredient, IngredientCategory};
pub use instruction::Instruction;
pub use recipe::Recipe;
pub use recipe_ingredient::{RecipeIngredient, Unit};
pub use tag::Tag;
