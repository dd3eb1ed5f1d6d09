//! Authenticated-session collaborator.
//!
//! Session bootstrap and token refresh live in the host application; the
//! flow crates only ever ask two questions: who is signed in, and what
//! bearer token should a request carry.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHandle {
    pub id: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait AuthSession: Send + Sync {
    /// The signed-in user, or `None` when browsing anonymously.
    fn current_user(&self) -> Option<UserHandle>;

    /// A bearer token for the current user. `None` when signed out or the
    /// host failed to refresh; callers translate that to `Unauthenticated`.
    async fn access_token(&self) -> Option<String>;
}

/// Fixed-credential session for hosts that manage tokens out of band, and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<UserHandle>,
    token: Option<String>,
}

impl StaticSession {
    pub fn signed_in(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: Some(UserHandle {
                id: user_id.into(),
                display_name: None,
            }),
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthSession for StaticSession {
    fn current_user(&self) -> Option<UserHandle> {
        self.user.clone()
    }

    async fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}
