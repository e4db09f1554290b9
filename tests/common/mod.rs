// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use larder::db;
use larder::{Ingredient, IngredientCategory, Instruction, Recipe, RecipeIngredient, Tag, Unit};
use tempfile::TempDir;

/// Create an empty, migrated test database.
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_test_db() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    (temp_dir, db_path)
}

/// The Pancakes recipe used by the revision workflow tests
pub fn pancakes() -> Recipe {
    let mut recipe = Recipe::new("Pancakes");
    recipe.description = Some("Fluffy breakfast pancakes.".to_string());
    recipe.prep_time = Some(10);
    recipe.cook_time = Some(15);
    recipe.servings = Some(4);
    recipe.ingredients = vec![
        RecipeIngredient::new(Ingredient::new("Flour"), 200.0, Unit::Gram),
        RecipeIngredient::new(Ingredient::new("Milk"), 300.0, Unit::Milliliter),
    ];
    recipe.instructions = vec![
        Instruction::new(1, "Mix"),
        Instruction::new(2, "Cook"),
    ];
    recipe.tags = vec![Tag::new("Breakfast")];
    recipe
}

/// A fuller recipe exercising categories, comments, and nested tags
pub fn spaghetti() -> Recipe {
    let mut recipe = Recipe::new("Spaghetti Bolognese");
    recipe.description = Some("Classic Italian pasta with meat sauce.".to_string());
    recipe.comments = Some("Simmer longer for a deeper sauce.".to_string());
    recipe.prep_time = Some(15);
    recipe.cook_time = Some(45);
    recipe.servings = Some(4);
    recipe.ingredients = vec![
        RecipeIngredient::new(Ingredient::new("Spaghetti"), 400.0, Unit::Gram),
        RecipeIngredient::new(
            Ingredient::with_category("Ground Beef", IngredientCategory::Meat),
            500.0,
            Unit::Gram,
        ),
        RecipeIngredient::new(
            Ingredient::with_category("Onion", IngredientCategory::Vegetable),
            1.0,
            Unit::Pieces,
        ),
    ];
    recipe.instructions = vec![
        Instruction::new(1, "Boil spaghetti until al dente."),
        Instruction::new(2, "Saute onions until translucent."),
        Instruction::new(3, "Add ground beef and cook until browned."),
    ];
    recipe.tags = vec![
        Tag::new("Dinner"),
        Tag::with_child("Cuisine", Tag::new("Italian")),
    ];
    recipe
}
