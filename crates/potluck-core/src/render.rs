//! Renders a recipe into its suggestion message document.

use crate::blocks::{Block, Element, MessageDocument, Text};
use crate::types::Recipe;

/// Slack caps section fields at 10, so ingredient chips are chunked at 10 per
/// section. Hard contract, not a tuning knob.
pub const INGREDIENTS_PER_SECTION: usize = 10;

pub const ACTION_YES: &str = "yes";
pub const ACTION_NO: &str = "no";

/// Build the full suggestion document for a recipe. Total function: every
/// recipe field was validated at write time, so there is no failure mode here.
///
/// Block order is fixed: header, divider, description (image accessory when
/// present), view-link section, divider, ingredient sections, vote buttons.
pub fn render(recipe: &Recipe) -> MessageDocument {
    let mut blocks = Vec::new();

    blocks.push(Block::header(&recipe.name));
    blocks.push(Block::Divider);

    let description = recipe
        .description
        .clone()
        .unwrap_or_else(|| recipe.name.clone());
    blocks.push(match &recipe.image_link {
        Some(url) => {
            Block::section_with_accessory(Text::mrkdwn(description), Element::image(url, "food"))
        }
        None => Block::section(Text::mrkdwn(description)),
    });

    blocks.push(Block::section_with_accessory(
        Text::mrkdwn("View this recipe"),
        Element::link_button("View", "button-action", &recipe.link),
    ));
    blocks.push(Block::Divider);

    // Empty ingredients yield zero sections, never an empty one.
    for chunk in recipe.ingredients.chunks(INGREDIENTS_PER_SECTION) {
        blocks.push(Block::field_section(
            chunk.iter().map(Text::plain).collect(),
        ));
    }

    blocks.push(vote_actions());
    blocks
}

/// The Yes/No button row. Stable action identifiers; the interact endpoint
/// dispatches on them.
pub fn vote_actions() -> Block {
    Block::Actions {
        elements: vec![
            Element::vote_button("Yes", ACTION_YES, "primary", "true"),
            Element::vote_button("No", ACTION_NO, "danger", "false"),
        ],
    }
}
