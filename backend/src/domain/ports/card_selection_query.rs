//! Driving port for choosing the next card.
//!
//! Inbound adapters call this with the learner bound to the request. The
//! implementation is read-only with respect to every store.

use async_trait::async_trait;

use crate::domain::{Error, Selection, Username};

/// Use-case port for card selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardSelectionQuery: Send + Sync {
    /// Pick the next card for `username`, or report that nothing is left.
    async fn select_card(&self, username: &Username) -> Result<Selection, Error>;
}
