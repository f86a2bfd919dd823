//! Random recipe selection.
//!
//! The draw is a uniform integer in `[0, max_id)` resolved to the greatest
//! stored id at or below it: an index-range trick, not true sampling over
//! the live document set. Ids are assigned sequentially per crawl page, so
//! the distribution follows the page-to-id mapping rather than being exactly
//! uniform. Known skew, kept for behavioral fidelity with the deployed bot.

use crate::error::{PotluckError, Result};
use crate::store::RecipeStore;
use crate::types::Recipe;
use rand::Rng;

/// Fixed upper bound on crawler-assigned ids. A configured constant, never
/// derived from the live document count.
pub const DEFAULT_MAX_RECIPE_ID: u32 = 15893;

/// Draw a uniform `k` in `[0, max_id)` and resolve it against the store.
pub fn select_random(store: &RecipeStore, max_id: u32) -> Result<Recipe> {
    let k = rand::thread_rng().gen_range(0..max_id);
    select_at(store, k)
}

/// Resolve a concrete draw: greatest document with `id <= k`. Fails with
/// [`PotluckError::EmptyStore`] on an empty store and
/// [`PotluckError::NoRecipeAtOrBelow`] when the draw undershoots every stored
/// id, surfaced explicitly rather than crashing on an empty result.
pub fn select_at(store: &RecipeStore, k: u32) -> Result<Recipe> {
    if store.count()? == 0 {
        return Err(PotluckError::EmptyStore);
    }
    store
        .latest_at_or_below(k)?
        .ok_or(PotluckError::NoRecipeAtOrBelow(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_ids(ids: &[u32]) -> (RecipeStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::open(dir.path().join("recipes.redb")).unwrap();
        for &id in ids {
            store
                .put_recipe(&Recipe {
                    id,
                    name: format!("recipe {id}"),
                    link: format!("https://example.com/{id}"),
                    description: None,
                    image_link: None,
                    ingredients: vec![],
                    directions: vec![],
                })
                .unwrap();
        }
        (store, dir)
    }

    #[test]
    fn empty_store_is_an_error() {
        let (store, _dir) = store_with_ids(&[]);
        assert!(matches!(
            select_at(&store, 100),
            Err(PotluckError::EmptyStore)
        ));
    }

    #[test]
    fn draw_below_smallest_id_is_not_found() {
        let (store, _dir) = store_with_ids(&[5000]);
        assert!(matches!(
            select_at(&store, 1000),
            Err(PotluckError::NoRecipeAtOrBelow(1000))
        ));
    }

    #[test]
    fn draw_above_resolves_to_greatest_at_or_below() {
        let (store, _dir) = store_with_ids(&[5000]);
        assert_eq!(select_at(&store, 9000).unwrap().id, 5000);
    }

    #[test]
    fn random_selection_stays_within_stored_ids() {
        let (store, _dir) = store_with_ids(&[0, 40, 900]);
        for _ in 0..50 {
            let r = select_random(&store, 1000).unwrap();
            assert!([0, 40, 900].contains(&r.id));
        }
    }
}
