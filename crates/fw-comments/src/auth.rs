//! Admin capability check consumed by comment deletion.

use std::collections::HashSet;

/// Decides whether a user may moderate comments.
pub trait Authorizer: Send + Sync {
    /// Whether `user` holds the admin role.
    fn is_admin(&self, user: &str) -> bool;
}

/// Fixed set of admin user names, usually loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    admins: HashSet<String>,
}

impl AdminList {
    /// Create a list from user names. Matching is exact and case-sensitive.
    #[must_use]
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl Authorizer for AdminList {
    fn is_admin(&self, user: &str) -> bool {
        self.admins.contains(user)
    }
}
