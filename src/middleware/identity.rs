//! Authenticated actor context for a single request.
//!
//! Authentication itself lives upstream: the identity provider terminates
//! the session and the proxy forwards the verified actor as headers
//! (`X-User-Id`, `X-User-Email`, `X-User-Role`). This extractor only reads
//! them; a request without a user id is unauthenticated.

use actix_web::dev::Payload;
use actix_web::{error, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};

#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: String,
    /// May be empty; not every account has an email on file.
    pub user_email: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn is_operator(&self) -> bool {
        self.roles.iter().any(|role| role == "operator")
    }

    pub fn require_operator(&self) -> Result<(), Error> {
        if self.is_operator() {
            Ok(())
        } else {
            Err(error::ErrorForbidden("Operator permissions required"))
        }
    }
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user_id = header_value(req, "x-user-id");
        let user_email = header_value(req, "x-user-email").unwrap_or_default();
        let roles = header_value(req, "x-user-role")
            .map(|value| value.split(',').map(|r| r.trim().to_string()).collect())
            .unwrap_or_default();

        ready(match user_id {
            Some(user_id) if !user_id.is_empty() => Ok(Identity {
                user_id,
                user_email,
                roles,
            }),
            _ => Err(error::ErrorUnauthorized("Must be logged in")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_with_roles(roles: &[&str]) -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            user_email: "user@example.com".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn operator_role_grants_operator() {
        assert!(identity_with_roles(&["operator"]).is_operator());
        assert!(identity_with_roles(&["student", "operator"]).is_operator());
    }

    #[test]
    fn other_roles_do_not_grant_operator() {
        assert!(!identity_with_roles(&["student"]).is_operator());
        assert!(identity_with_roles(&["student"]).require_operator().is_err());
    }
}
