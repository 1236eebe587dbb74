//! Served flashcards and selection outcomes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::VocabItem;

/// Which side of the pairing is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show English, ask for the target-language form.
    SourceToTarget,
    /// Show the target-language form, ask for English.
    TargetToSource,
}

/// A single unit presented to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The item to test.
    pub item: VocabItem,
    /// Presentation direction.
    pub direction: Direction,
}

/// Result of asking for the next card.
///
/// `Finished` is a terminal outcome, not an error: the learner has no New or
/// Review items left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A card to present.
    Card(Card),
    /// Nothing left to study.
    Finished,
}

impl Selection {
    /// Borrow the card, if one was selected.
    pub fn card(&self) -> Option<&Card> {
        match self {
            Self::Card(card) => Some(card),
            Self::Finished => None,
        }
    }

    /// Whether the learner has exhausted all outstanding material.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}
