// src/db/models/tag.rs

//! Tag model - shared entities with an optional nesting relation
//!
//! A tag may carry one nested child tag, forming a chain ("Cuisine" ->
//! "Italian"). The chain is stored on the tag rows themselves as a
//! nullable parent_id, never in the recipe_tags link table.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use tracing::debug;

/// A Tag is a shared entity identified by its exact name.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: Option<i64>,
    pub name: String,
    /// Optional more-specific child tag, forming a chain
    pub child: Option<Box<Tag>>,
}

impl Tag {
    /// Create a new Tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            child: None,
        }
    }

    /// Create a new Tag with a nested child
    pub fn with_child(name: impl Into<String>, child: Tag) -> Self {
        Self {
            id: None,
            name: name.into(),
            child: Some(Box::new(child)),
        }
    }

    /// Return the id of the tag with this name, inserting a new row if
    /// none exists, then resolve the nested child chain.
    ///
    /// Each child is created pointing at its enclosing tag's row via
    /// parent_id. First-write-wins: an existing row keeps its stored
    /// parent_id. A row's parent always exists before the row itself, so
    /// chains cannot form cycles.
    pub fn resolve_or_create(&self, conn: &Connection) -> Result<i64> {
        let id = Self::resolve_name(conn, &self.name, None)?;

        let mut parent_id = id;
        let mut child = self.child.as_deref();
        while let Some(tag) = child {
            parent_id = Self::resolve_name(conn, &tag.name, Some(parent_id))?;
            child = tag.child.as_deref();
        }

        Ok(id)
    }

    /// Look up a single tag name, inserting it with the given parent if absent
    fn resolve_name(conn: &Connection, name: &str, parent_id: Option<i64>) -> Result<i64> {
        let existing: Option<i64> = conn
            .query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;

        if let Some(id) = existing {
            debug!("Reusing tag '{}' (id {})", name, id);
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO tags (name, parent_id) VALUES (?1, ?2)",
            params![name, parent_id],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Created tag '{}' (id {})", name, id);
        Ok(id)
    }

    /// Find a tag by ID, without its child chain
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare("SELECT id, name FROM tags WHERE id = ?1")?;

        let tag = stmt
            .query_row([id], |row| {
                Ok(Self {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    child: None,
                })
            })
            .optional()?;

        Ok(tag)
    }

    /// Find a tag by exact name, without its child chain
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare("SELECT id, name FROM tags WHERE name = ?1")?;

        let tag = stmt
            .query_row([name], |row| {
                Ok(Self {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    child: None,
                })
            })
            .optional()?;

        Ok(tag)
    }

    /// Load a tag with its child chain rebuilt from parent_id links.
    ///
    /// When several tags share the same parent the lowest id is taken,
    /// keeping reconstruction deterministic.
    pub fn load_chain(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let Some(mut tag) = Self::find_by_id(conn, id)? else {
            return Ok(None);
        };

        tag.child = Self::load_child(conn, id)?;
        Ok(Some(tag))
    }

    /// Load the child pointing at `parent_id`, and its descendants.
    ///
    /// Terminates because a row's parent always predates the row itself.
    fn load_child(conn: &Connection, parent_id: i64) -> Result<Option<Box<Tag>>> {
        let child: Option<(i64, String)> = conn
            .query_row(
                "SELECT id, name FROM tags WHERE parent_id = ?1 ORDER BY id LIMIT 1",
                [parent_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match child {
            Some((child_id, name)) => Ok(Some(Box::new(Tag {
                id: Some(child_id),
                name,
                child: Self::load_child(conn, child_id)?,
            }))),
            None => Ok(None),
        }
    }

    /// Link a tag to a recipe revision
    pub fn link(conn: &Connection, recipe_id: i64, tag_id: i64) -> Result<()> {
        conn.execute(
            "INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?1, ?2)",
            params![recipe_id, tag_id],
        )?;
        Ok(())
    }

    /// Find all tags linked to a recipe revision, in link insertion
    /// order, with child chains rebuilt
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT t.id FROM recipe_tags rt
             JOIN tags t ON t.id = rt.tag_id
             WHERE rt.recipe_id = ?1
             ORDER BY rt.rowid",
        )?;

        let ids = stmt
            .query_map([recipe_id], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut tags = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(tag) = Self::load_chain(conn, id)? {
                tags.push(tag);
            }
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp_file.path()).unwrap();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
        schema::migrate(&conn).unwrap();
        (temp_file, conn)
    }

    #[test]
    fn test_resolve_or_create_dedupes_by_name() {
        let (_temp, conn) = create_test_db();

        let tag = Tag::new("Breakfast");
        let first = tag.resolve_or_create(&conn).unwrap();
        let second = tag.resolve_or_create(&conn).unwrap();
        assert_eq!(first, second);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_nested_child_creates_parent_link() {
        let (_temp, conn) = create_test_db();

        let cuisine = Tag::with_child("Cuisine", Tag::new("Italian"));
        let cuisine_id = cuisine.resolve_or_create(&conn).unwrap();

        let italian = Tag::find_by_name(&conn, "Italian").unwrap().unwrap();
        let parent_id: Option<i64> = conn
            .query_row(
                "SELECT parent_id FROM tags WHERE id = ?1",
                [italian.id.unwrap()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(parent_id, Some(cuisine_id));
    }

    #[test]
    fn test_existing_parent_link_is_kept() {
        let (_temp, conn) = create_test_db();

        Tag::with_child("Cuisine", Tag::new("Italian"))
            .resolve_or_create(&conn)
            .unwrap();
        // "Italian" already exists; nesting it elsewhere must not rewrite
        // its parent
        Tag::with_child("Dinner", Tag::new("Italian"))
            .resolve_or_create(&conn)
            .unwrap();

        let cuisine = Tag::find_by_name(&conn, "Cuisine").unwrap().unwrap();
        let italian = Tag::find_by_name(&conn, "Italian").unwrap().unwrap();
        let parent_id: Option<i64> = conn
            .query_row(
                "SELECT parent_id FROM tags WHERE id = ?1",
                [italian.id.unwrap()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(parent_id, cuisine.id);
    }

    #[test]
    fn test_load_chain_round_trip() {
        let (_temp, conn) = create_test_db();

        let chain = Tag::with_child("Cuisine", Tag::with_child("Italian", Tag::new("Tuscan")));
        let id = chain.resolve_or_create(&conn).unwrap();

        let loaded = Tag::load_chain(&conn, id).unwrap().unwrap();
        assert_eq!(loaded.name, "Cuisine");
        let child = loaded.child.as_deref().unwrap();
        assert_eq!(child.name, "Italian");
        let grandchild = child.child.as_deref().unwrap();
        assert_eq!(grandchild.name, "Tuscan");
        assert!(grandchild.child.is_none());
    }
}
