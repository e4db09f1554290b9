// src/db/models/recipe_ingredient.rs

//! RecipeIngredient model - links one revision to a shared ingredient
//! with a revision-specific quantity and unit

use crate::db::models::Ingredient;
use crate::error::Result;
use rusqlite::{Connection, Row, params};
use serde::Serialize;
use std::str::FromStr;

/// Measurement unit for an ingredient link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "dl")]
    Deciliter,
    #[serde(rename = "pcs")]
    Pieces,
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Deciliter => "dl",
            Unit::Pieces => "pcs",
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "g" => Ok(Unit::Gram),
            "kg" => Ok(Unit::Kilogram),
            "ml" => Ok(Unit::Milliliter),
            "l" => Ok(Unit::Liter),
            "dl" => Ok(Unit::Deciliter),
            "pcs" => Ok(Unit::Pieces),
            _ => Err(format!("Invalid unit: {s}")),
        }
    }
}

/// An ingredient link belonging to exactly one recipe revision.
///
/// The (recipe, ingredient) pair is the link's identity; a revision
/// cannot link the same ingredient twice.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: Unit,
}

impl RecipeIngredient {
    /// Create a new RecipeIngredient
    pub fn new(ingredient: Ingredient, quantity: f64, unit: Unit) -> Self {
        Self {
            ingredient,
            quantity,
            unit,
        }
    }

    /// Insert this link for the given recipe revision and resolved
    /// ingredient id
    pub fn insert(&self, conn: &Connection, recipe_id: i64, ingredient_id: i64) -> Result<()> {
        conn.execute(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit)
             VALUES (?1, ?2, ?3, ?4)",
            params![recipe_id, ingredient_id, self.quantity, self.unit.as_str()],
        )?;
        Ok(())
    }

    /// Find all ingredient links for a recipe revision, joined to their
    /// ingredient, in link insertion order
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT i.id, i.name, i.category, ri.quantity, ri.unit
             FROM recipe_ingredients ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = ?1
             ORDER BY ri.rowid",
        )?;

        let links = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(links)
    }

    /// Convert a joined database row to a RecipeIngredient
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let ingredient = Ingredient::from_row(row)?;

        let unit_str: String = row.get(4)?;
        let unit = unit_str.parse::<Unit>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })?;

        Ok(Self {
            ingredient,
            quantity: row.get(3)?,
            unit,
        })
    }
}
