use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Userpass,
    X509,
    Oidc,
}

/// A user signed into the browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub rucio_identity: String,
    pub rucio_account: String,
    pub rucio_auth_type: AuthType,
    pub rucio_auth_token: String,
    pub rucio_auth_token_expires: DateTime<Utc>,
    pub rucio_vo: String,
    pub is_logged_in: bool,
}

impl SessionUser {
    /// Two entries describe the same login when identity, account and VO agree.
    pub fn same_login(&self, other: &SessionUser) -> bool {
        self.rucio_identity == other.rucio_identity
            && self.rucio_account == other.rucio_account
            && self.rucio_vo == other.rucio_vo
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_logged_in && self.rucio_auth_token_expires > now
    }
}

/// Everything kept server-side for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub all_users: Vec<SessionUser>,
}

impl SessionData {
    /// Make `user` the active user, replacing any earlier entry for the same login.
    pub fn activate(&mut self, user: SessionUser) {
        match self.all_users.iter_mut().find(|u| u.same_login(&user)) {
            Some(existing) => *existing = user.clone(),
            None => self.all_users.push(user.clone()),
        }
        self.user = Some(user);
    }
}
