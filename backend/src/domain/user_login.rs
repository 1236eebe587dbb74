//! Username-only login service.
//!
//! The first login with a name creates the learner; later logins return the
//! stored account with its original creation time.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::error_mapping::map_user_error;
use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{Error, User, Username};

/// Service implementing [`LoginService`] on top of a [`UserRepository`].
#[derive(Clone)]
pub struct UserLoginService<U> {
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserLoginService<U> {
    /// Create a new service with the given repository and clock.
    pub fn new(user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<U> LoginService for UserLoginService<U>
where
    U: UserRepository,
{
    async fn login(&self, username: &Username) -> Result<User, Error> {
        let candidate = User::new(username.clone(), self.clock.utc());
        let user = self
            .user_repo
            .insert_if_absent(&candidate)
            .await
            .map_err(map_user_error)?;
        info!(%username, "learner logged in");
        Ok(user)
    }

    async fn current_user(&self, username: &Username) -> Result<User, Error> {
        self.user_repo
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
