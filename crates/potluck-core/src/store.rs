//! Redb-backed recipe document store.
//!
//! One table, keyed by the crawler-assigned recipe id, bincode values. The
//! only query shape the bot needs beyond point lookup is "greatest id <= k",
//! which is a reverse range scan with limit 1.

use crate::error::{PotluckError, Result};
use crate::types::Recipe;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::{Path, PathBuf};

const RECIPES: TableDefinition<u32, &[u8]> = TableDefinition::new("recipes");

pub struct RecipeStore {
    db: Database,
    path: PathBuf,
}

impl RecipeStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PotluckError::Validation(format!("Failed to create directory: {}", e))
            })?;
        }

        let db = Database::create(&path)?;

        // Ensure the table exists so reads never hit TableDoesNotExist.
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECIPES)?;
        }
        write_txn.commit()?;

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite a recipe at its id key.
    pub fn put_recipe(&self, recipe: &Recipe) -> Result<()> {
        let bytes = bincode::serialize(recipe)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECIPES)?;
            table.insert(recipe.id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get(&self, id: u32) -> Result<Option<Recipe>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECIPES)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(bincode::deserialize(guard.value())?)),
            None => Ok(None),
        }
    }

    /// The document with the greatest `id <= k`, or `None` when every stored
    /// id exceeds `k` (or the store is empty).
    pub fn latest_at_or_below(&self, k: u32) -> Result<Option<Recipe>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECIPES)?;
        match table.range(..=k)?.next_back() {
            Some(entry) => {
                let (_, value) = entry?;
                Ok(Some(bincode::deserialize(value.value())?))
            }
            None => Ok(None),
        }
    }

    pub fn count(&self) -> Result<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECIPES)?;
        Ok(table.len()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (RecipeStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::open(dir.path().join("recipes.redb")).unwrap();
        (store, dir)
    }

    fn recipe(id: u32, name: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            link: format!("https://example.com/{id}"),
            description: None,
            image_link: None,
            ingredients: vec![],
            directions: vec![],
        }
    }

    #[test]
    fn put_get_roundtrip() {
        let (store, _dir) = open_store();
        let r = recipe(12, "Toast");
        store.put_recipe(&r).unwrap();

        assert_eq!(store.get(12).unwrap(), Some(r));
        assert_eq!(store.get(13).unwrap(), None);
    }

    #[test]
    fn latest_at_or_below_picks_greatest_id() {
        let (store, _dir) = open_store();
        for id in [10, 200, 3000] {
            store.put_recipe(&recipe(id, "r")).unwrap();
        }

        assert_eq!(store.latest_at_or_below(250).unwrap().unwrap().id, 200);
        assert_eq!(store.latest_at_or_below(200).unwrap().unwrap().id, 200);
        assert_eq!(store.latest_at_or_below(9999).unwrap().unwrap().id, 3000);
        assert!(store.latest_at_or_below(9).unwrap().is_none());
    }

    #[test]
    fn count_tracks_inserts_and_overwrites() {
        let (store, _dir) = open_store();
        assert_eq!(store.count().unwrap(), 0);

        store.put_recipe(&recipe(1, "a")).unwrap();
        store.put_recipe(&recipe(2, "b")).unwrap();
        store.put_recipe(&recipe(2, "b2")).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.get(2).unwrap().unwrap().name, "b2");
    }

    #[test]
    fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.redb");

        {
            let store = RecipeStore::open(&path).unwrap();
            store.put_recipe(&recipe(5, "Soup")).unwrap();
        }

        let store = RecipeStore::open(&path).unwrap();
        assert_eq!(store.get(5).unwrap().unwrap().name, "Soup");
    }
}
