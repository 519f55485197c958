use thiserror::Error;
use tracing::{Span, info, warn};
use validator::ValidateEmail;

use crate::models::{UserQuery, UserRequest};

/// First rule a request broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is empty")]
    UsernameEmpty,

    #[error("Email is empty")]
    EmailEmpty,

    #[error("Phone is empty")]
    PhoneEmpty,

    #[error("Email is invalid")]
    EmailInvalid,
}

/// Field-level checks run by the handlers before the service is called.
#[cfg_attr(test, mockall::automock)]
pub trait UserValidator: Send + Sync {
    /// Username, email and phone must be present and the email well formed.
    fn validate_user(&self, request: &UserRequest) -> Result<(), ValidationError>;

    /// Only a non-empty email filter is checked; the username filter is free text.
    fn validate_query(&self, query: &UserQuery) -> Result<(), ValidationError>;
}

#[derive(Clone)]
pub struct DefaultUserValidator {
    span: Span,
}

impl DefaultUserValidator {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    fn reject(&self, error: ValidationError) -> Result<(), ValidationError> {
        warn!(parent: &self.span, "{}", error);
        Err(error)
    }
}

/// A bare address or `Display Name <address>`, whose local part may be a quoted string.
fn is_mail_address(input: &str) -> bool {
    let input = input.trim();
    let address = match (input.rfind('<'), input.strip_suffix('>')) {
        (Some(open), Some(rest)) => &rest[open + 1..],
        (None, None) => input,
        _ => return false,
    };

    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };

    if is_quoted_string(local) {
        // The domain is checked on its own; `validate_email` rejects quoted local parts.
        return format!("user@{}", domain).validate_email();
    }
    address.validate_email()
}

fn is_quoted_string(local: &str) -> bool {
    let Some(inner) = local.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return false;
    };

    let mut escaped = false;
    for c in inner.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' | '\r' | '\n' => return false,
            _ => {}
        }
    }
    !escaped
}

impl UserValidator for DefaultUserValidator {
    fn validate_user(&self, request: &UserRequest) -> Result<(), ValidationError> {
        info!(parent: &self.span, "Validate user");

        if request.username.is_empty() {
            return self.reject(ValidationError::UsernameEmpty);
        }
        if request.email.is_empty() {
            return self.reject(ValidationError::EmailEmpty);
        }
        if request.phone.is_empty() {
            return self.reject(ValidationError::PhoneEmpty);
        }
        if !is_mail_address(&request.email) {
            return self.reject(ValidationError::EmailInvalid);
        }

        Ok(())
    }

    fn validate_query(&self, query: &UserQuery) -> Result<(), ValidationError> {
        info!(parent: &self.span, "Validate user query");

        match query.email_filter() {
            Some(email) if !is_mail_address(email) => self.reject(ValidationError::EmailInvalid),
            _ => Ok(()),
        }
    }
}
