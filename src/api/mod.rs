//! HTTP access to the monitoring service.
//!
//! - [`client`]: [`ApiClient`] for the status, login, registration and logout endpoints
//! - [`session`]: persistence of the `session_token` cookie between runs

pub mod client;
pub mod session;

pub use client::{ApiClient, ApiClientBuilder, Registration, StatusReader};
pub use session::{session_token_from_headers, SessionStore, SESSION_COOKIE};

use crate::account::ChildCode;

/// Which side of the service an account or view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Child,
    Parent,
}

impl Role {
    /// Path of the logout endpoint.
    pub fn logout_path(&self) -> &'static str {
        match self {
            Role::Child => "/logout",
            Role::Parent => "/parent/logout",
        }
    }

    /// Entry view the user is sent to after logout or session expiry.
    pub fn entry_path(&self) -> &'static str {
        match self {
            Role::Child => "/",
            Role::Parent => "/parent/login",
        }
    }

    /// CLI command that gets the user back in.
    pub fn login_hint(&self) -> &'static str {
        match self {
            Role::Child => "focuswatch login <USERNAME>",
            Role::Parent => "focuswatch parent login --username <USERNAME>",
        }
    }
}

/// A status endpoint the poller can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEndpoint {
    /// `GET /child/status` for the logged-in child.
    Child,
    /// `GET /parent/child_status/{code}` for one child of the logged-in parent.
    Parent(ChildCode),
}

impl StatusEndpoint {
    pub fn path(&self) -> String {
        match self {
            StatusEndpoint::Child => "/child/status".to_string(),
            StatusEndpoint::Parent(code) => format!("/parent/child_status/{}", code),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            StatusEndpoint::Child => Role::Child,
            StatusEndpoint::Parent(_) => Role::Parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(StatusEndpoint::Child.path(), "/child/status");
        let code = ChildCode::parse("STU-40fb-c5ff").unwrap();
        assert_eq!(
            StatusEndpoint::Parent(code).path(),
            "/parent/child_status/STU-40fb-c5ff"
        );
    }

    #[test]
    fn test_role_paths() {
        assert_eq!(Role::Child.logout_path(), "/logout");
        assert_eq!(Role::Parent.logout_path(), "/parent/logout");
        assert_eq!(Role::Child.entry_path(), "/");
        assert_eq!(Role::Parent.entry_path(), "/parent/login");
    }
}
