//! The document-derived vote state machine.
//!
//! There is no vote table anywhere. The previous outbound message, echoed
//! back by Slack on every interaction, is the entire prior state, and the
//! machine keys on the shape of its trailing blocks:
//!
//! * no trailing context block → open, no votes yet
//! * trailing context block → open, one voter recorded
//! * no actions block → closed, nothing left to click
//!
//! A "no" from any state discards the document entirely; the caller selects a
//! fresh recipe and renders a replacement into the same message slot.

use crate::blocks::{Block, MessageDocument};

/// Which button was pressed, by stable action identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Yes,
    No,
}

impl VoteAction {
    pub fn from_action_id(action_id: &str) -> Option<Self> {
        match action_id {
            "yes" => Some(VoteAction::Yes),
            "no" => Some(VoteAction::No),
            _ => None,
        }
    }
}

/// The user behind an interaction callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub id: String,
    pub name: String,
}

/// Result of applying one vote event to the prior document.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    /// Re-vote or closed document: the message is left exactly as it was.
    Unchanged,
    /// The message is updated in place with these blocks.
    Updated(MessageDocument),
    /// "No" dissent: discard the document, select and render a fresh recipe
    /// into the same message slot.
    Replace,
}

/// Pure transition function `(prior document, event) -> next document`.
pub fn apply_vote(blocks: MessageDocument, action: VoteAction, voter: &Voter) -> VoteOutcome {
    if action == VoteAction::No {
        return VoteOutcome::Replace;
    }

    // No actions block means voting already closed; there is nothing a "yes"
    // can do.
    if !blocks.iter().any(Block::is_actions) {
        return VoteOutcome::Unchanged;
    }

    let recorded = blocks
        .last()
        .and_then(Block::context_text)
        .map(String::from);

    match recorded {
        None => {
            // First "yes": record the voter, keep the buttons.
            let mut next = blocks;
            next.push(Block::context(first_vote_line(voter)));
            VoteOutcome::Updated(next)
        }
        Some(text) => {
            // Known limitation, kept for fidelity: the re-vote check is a raw
            // substring match on the rendered text, so two users whose names
            // collide (or nest) are indistinguishable here.
            if text.contains(&voter.name) {
                return VoteOutcome::Unchanged;
            }

            // Second distinct "yes": voting closes. Only the first recorded
            // name survives into the summary; any voters beyond the first two
            // are dropped from the rendered text. Observed contract.
            let summary = format!("{} and {} voted yes", first_recorded_name(&text), voter.name);
            let next: MessageDocument = blocks
                .into_iter()
                .filter(|b| !b.is_actions())
                .map(|b| {
                    if b.is_context() {
                        Block::context(summary.clone())
                    } else {
                        b
                    }
                })
                .collect();
            VoteOutcome::Updated(next)
        }
    }
}

fn first_vote_line(voter: &Voter) -> String {
    format!("{} voted yes ({})", voter.name, voter.id)
}

/// Recover the first voter's name from a context line written by
/// [`first_vote_line`].
fn first_recorded_name(text: &str) -> &str {
    text.split(" voted yes").next().unwrap_or(text)
}
