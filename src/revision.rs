// src/revision.rs

//! Writing recipe revisions
//!
//! `write_revision` is the single entry point for persisting a recipe
//! graph. Each call flattens one revision - scalar row, instructions,
//! ingredient links, tag links - inside one transaction, so a failed
//! write leaves no partial revision behind.

use crate::db;
use crate::db::models::{Recipe, Tag};
use crate::error::{Error, Result, is_constraint_violation};
use rusqlite::{Connection, Transaction};
use tracing::info;

/// Identifiers assigned to a freshly written revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenRevision {
    pub recipe_id: i64,
    pub group_id: i64,
    pub version: i64,
}

/// Write one revision of a recipe.
///
/// With `group_id = None` a new revision group is started: the revision
/// gets version 1 and the group id equals the new recipe id. With
/// `group_id = Some(g)` the revision is appended to group `g` with
/// version = max existing version + 1; an unknown group id is a caller
/// error and nothing is written.
///
/// Ingredients and tags are resolved through the shared entity tables,
/// creating rows only for previously unseen names. Listing the same
/// ingredient or tag twice in one revision fails with
/// [`Error::DuplicateLink`] and rolls back the whole revision.
pub fn write_revision(
    conn: &mut Connection,
    recipe: &Recipe,
    group_id: Option<i64>,
) -> Result<WrittenRevision> {
    recipe.validate()?;

    let written = db::transaction(conn, |tx| {
        let version = match group_id {
            Some(group) => next_version(tx, group)?,
            None => 1,
        };

        let recipe_id = recipe.insert_revision(tx, group_id, version)?;

        let group_id = match group_id {
            Some(group) => group,
            None => {
                // First revision of a new group: self-link
                tx.execute("UPDATE recipes SET group_id = ?1 WHERE id = ?1", [recipe_id])?;
                recipe_id
            }
        };

        write_details(tx, recipe, recipe_id)?;

        Ok(WrittenRevision {
            recipe_id,
            group_id,
            version,
        })
    })?;

    info!(
        "Wrote '{}' as version {} of group {} (recipe id {})",
        recipe.title, written.version, written.group_id, written.recipe_id
    );
    Ok(written)
}

/// Delete a revision and, via schema cascades, its detail rows.
///
/// Shared ingredient and tag rows are never deleted.
pub fn delete_revision(conn: &Connection, recipe_id: i64) -> Result<()> {
    Recipe::delete(conn, recipe_id)?;
    info!("Deleted recipe revision {}", recipe_id);
    Ok(())
}

/// Next version number within an existing group.
///
/// A group with no stored revisions cannot be appended to; the first
/// revision of a group is only ever created through the `None` path of
/// `write_revision`.
fn next_version(tx: &Transaction, group_id: i64) -> Result<i64> {
    let max_version: Option<i64> = tx.query_row(
        "SELECT MAX(version) FROM recipes WHERE group_id = ?1",
        [group_id],
        |row| row.get(0),
    )?;

    match max_version {
        Some(version) => Ok(version + 1),
        None => Err(Error::UnknownGroup(group_id)),
    }
}

/// Persist instructions, ingredient links, and tag links in input order
fn write_details(tx: &Transaction, recipe: &Recipe, recipe_id: i64) -> Result<()> {
    for instruction in &recipe.instructions {
        instruction.insert(tx, recipe_id)?;
    }

    for link in &recipe.ingredients {
        let ingredient_id = link.ingredient.resolve_or_create(tx)?;
        link.insert(tx, recipe_id, ingredient_id)
            .map_err(|e| classify_link_error(e, "ingredient", &link.ingredient.name))?;
    }

    for tag in &recipe.tags {
        let tag_id = tag.resolve_or_create(tx)?;
        Tag::link(tx, recipe_id, tag_id)
            .map_err(|e| classify_link_error(e, "tag", &tag.name))?;
    }

    Ok(())
}

/// Turn a composite-key violation on a link insert into a caller-facing
/// duplicate error; pass anything else through unchanged
fn classify_link_error(err: Error, kind: &'static str, name: &str) -> Error {
    match err {
        Error::Database(ref db_err) if is_constraint_violation(db_err) => Error::DuplicateLink {
            kind,
            name: name.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::models::{Ingredient, Instruction, RecipeIngredient, Tag, Unit};
    use tempfile::NamedTempFile;

    fn create_test_db() -> (String, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();
        drop(temp_file);

        db::init(&db_path).unwrap();
        let conn = db::open(&db_path).unwrap();
        (db_path, conn)
    }

    fn pancakes() -> Recipe {
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
            Instruction::new(1, "Mix all dry ingredients."),
            Instruction::new(2, "Cook until golden."),
        ];
        recipe.tags = vec![Tag::new("Breakfast")];
        recipe
    }

    #[test]
    fn test_new_group_is_self_linked() {
        let (_path, mut conn) = create_test_db();

        let written = write_revision(&mut conn, &pancakes(), None).unwrap();
        assert_eq!(written.version, 1);
        assert_eq!(written.group_id, written.recipe_id);

        let stored = Recipe::find_by_id(&conn, written.recipe_id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.group_id, Some(written.recipe_id));
    }

    #[test]
    fn test_versions_increment_within_group() {
        let (_path, mut conn) = create_test_db();

        let first = write_revision(&mut conn, &pancakes(), None).unwrap();
        let second = write_revision(&mut conn, &pancakes(), Some(first.group_id)).unwrap();
        let third = write_revision(&mut conn, &pancakes(), Some(first.group_id)).unwrap();

        assert_eq!(
            [first.version, second.version, third.version],
            [1, 2, 3]
        );
        assert_eq!(second.group_id, first.group_id);
        assert_eq!(third.group_id, first.group_id);
        assert_ne!(second.recipe_id, first.recipe_id);
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let (_path, mut conn) = create_test_db();

        let result = write_revision(&mut conn, &pancakes(), Some(999));
        assert!(matches!(result, Err(Error::UnknownGroup(999))));

        // Nothing was written
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_entities_are_reused_across_revisions() {
        let (_path, mut conn) = create_test_db();

        let first = write_revision(&mut conn, &pancakes(), None).unwrap();
        write_revision(&mut conn, &pancakes(), Some(first.group_id)).unwrap();

        let ingredients: i64 = conn
            .query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))
            .unwrap();
        let tags: i64 = conn
            .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(ingredients, 2);
        assert_eq!(tags, 1);
    }

    #[test]
    fn test_duplicate_ingredient_rolls_back_revision() {
        let (_path, mut conn) = create_test_db();

        let mut recipe = pancakes();
        recipe.ingredients.push(RecipeIngredient::new(
            Ingredient::new("Flour"),
            50.0,
            Unit::Gram,
        ));

        let result = write_revision(&mut conn, &recipe, None);
        assert!(matches!(
            result,
            Err(Error::DuplicateLink {
                kind: "ingredient",
                ..
            })
        ));

        // The whole revision rolled back: no scalar row, no details
        let recipes: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        let instructions: i64 = conn
            .query_row("SELECT COUNT(*) FROM instructions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(recipes, 0);
        assert_eq!(instructions, 0);
    }

    #[test]
    fn test_duplicate_tag_rolls_back_revision() {
        let (_path, mut conn) = create_test_db();

        let mut recipe = pancakes();
        recipe.tags.push(Tag::new("Breakfast"));

        let result = write_revision(&mut conn, &recipe, None);
        assert!(matches!(
            result,
            Err(Error::DuplicateLink { kind: "tag", .. })
        ));

        let recipes: i64 = conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(recipes, 0);
    }

    #[test]
    fn test_invalid_recipe_writes_nothing() {
        let (_path, mut conn) = create_test_db();

        let result = write_revision(&mut conn, &Recipe::new(""), None);
        assert!(matches!(result, Err(Error::InvalidRecipe(_))));
    }

    #[test]
    fn test_delete_revision_keeps_other_revisions() {
        let (_path, mut conn) = create_test_db();

        let first = write_revision(&mut conn, &pancakes(), None).unwrap();
        let second = write_revision(&mut conn, &pancakes(), Some(first.group_id)).unwrap();

        delete_revision(&conn, second.recipe_id).unwrap();

        assert!(Recipe::find_by_id(&conn, first.recipe_id).unwrap().is_some());
        assert!(Recipe::find_by_id(&conn, second.recipe_id)
            .unwrap()
            .is_none());
    }
}
