//! UseCase: display name registration.

use std::sync::Arc;

use crate::domain::{DisplayName, Registered, SessionError, SessionRepository, UserId};

/// Binds a display name to a connection, exactly once.
pub struct RegisterUserUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl RegisterUserUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        raw_name: &str,
    ) -> Result<Registered, SessionError> {
        let name = DisplayName::new(raw_name)?;
        self.repository.register(user_id, name).await
    }
}
