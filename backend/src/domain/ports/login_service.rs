//! Driving port for username-only login.
//!
//! There are no credentials: logging in with a name creates the learner on
//! first use and returns the stored account afterwards.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Use-case port for establishing a learner identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Ensure the learner exists and return the stored account.
    async fn login(&self, username: &Username) -> Result<User, Error>;

    /// Fetch the account for a learner already bound to a session.
    ///
    /// Fails with `unauthorized` when the account no longer exists.
    async fn current_user(&self, username: &Username) -> Result<User, Error>;
}
