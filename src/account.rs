//! Account forms and their client-side checks.
//!
//! Every form is validated before any request leaves the client. The checks
//! are shallow: required fields must be non-blank, parent
//! passwords must match, and child codes must have the `STU-xxxx-xxxx` shape.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

/// Shape of a child code: `STU-` then two groups of 4 lowercase alphanumerics.
const CHILD_CODE_PATTERN: &str = r"^STU-[a-z0-9]{4}-[a-z0-9]{4}$";

fn child_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CHILD_CODE_PATTERN).expect("child code pattern is valid"))
}

/// Validated identifier linking a parent account to a child account.
///
/// # Example
///
/// ```
/// use focuswatch::account::ChildCode;
///
/// assert!(ChildCode::parse("STU-40fb-c5ff").is_ok());
/// assert!(ChildCode::parse("STU-40FB-c5ff").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChildCode(String);

impl ChildCode {
    /// Parse and validate a child code. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("child_code"));
        }
        if !child_code_regex().is_match(trimmed) {
            return Err(ValidationError::InvalidChildCode(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChildCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Body of `POST /child/login`. The server matches the face on camera
/// against the one registered under `username`.
#[derive(Debug, Clone, Serialize)]
pub struct ChildLogin {
    pub username: String,
}

impl ChildLogin {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)
    }
}

/// Body of `POST /child/register`.
#[derive(Debug, Clone, Serialize)]
pub struct ChildRegistration {
    pub username: String,
    pub email: String,
    pub region: String,
    pub school_name: String,
}

impl ChildRegistration {
    /// All four fields are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("region", &self.region)?;
        require("school_name", &self.school_name)
    }
}

/// Form body of `POST /parent/login`.
#[derive(Debug, Clone, Serialize)]
pub struct ParentLogin {
    pub username: String,
    pub password: String,
}

impl ParentLogin {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

/// Form body of `POST /parent/register`.
#[derive(Debug, Clone, Serialize)]
pub struct ParentRegistration {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
    pub child_code: String,
}

impl ParentRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("email", &self.email)?;
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        ChildCode::parse(&self.child_code).map(|_| ())
    }
}

/// Body of `POST /parent/add-child`.
#[derive(Debug, Clone, Serialize)]
pub struct AddChild {
    pub child_code: ChildCode,
}
