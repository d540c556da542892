//! Session guard run before client-side navigation.

use tracing::warn;

use crate::constants::LOGIN_ROUTE;
use crate::remote::SessionProvider;
use crate::store::Shared;

/// Auth state recorded by the guard. Dependency-injected, not ambient.
#[derive(Debug, Default)]
pub struct AuthStore {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

pub type SharedAuthStore = Shared<AuthStore>;

/// Outcome of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Proceed,
    RedirectToLogin,
}

/// Check the session before navigating to `destination`. The login route
/// passes through unchecked; everything else requires a live session, whose
/// subject id is recorded into the auth store.
pub async fn guard_route<P: SessionProvider>(
    provider: &P,
    auth: &SharedAuthStore,
    destination: &str,
) -> Guard {
    if destination == LOGIN_ROUTE {
        return Guard::Proceed;
    }

    match provider.current_session().await {
        Ok(session) => {
            auth.update(|store| {
                store.session_id = Some(session.id.clone());
                store.user_id = Some(session.user_id.clone());
            });
            Guard::Proceed
        }
        Err(err) => {
            warn!("session check failed: {err}");
            Guard::RedirectToLogin
        }
    }
}
