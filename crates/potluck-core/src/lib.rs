//! Core library for the potluck Slack bot.
//!
//! A suggestion message is rendered once from a [`Recipe`] and from then on
//! the message itself is the only state carrier: the vote machine in [`vote`]
//! reconstructs voting state by inspecting the block sequence Slack echoes
//! back on each interaction. There is no session store and no vote table.

pub mod blocks;
pub mod error;
pub mod render;
pub mod select;
pub mod store;
pub mod types;
pub mod vote;

pub use blocks::{Block, Element, MessageDocument, Text};
pub use error::{PotluckError, Result};
pub use render::{render, INGREDIENTS_PER_SECTION};
pub use select::{select_at, select_random, DEFAULT_MAX_RECIPE_ID};
pub use store::RecipeStore;
pub use types::Recipe;
pub use vote::{apply_vote, VoteAction, VoteOutcome, Voter};
