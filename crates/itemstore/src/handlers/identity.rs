//! Caller identity from the API Gateway authorizer.
//!
//! Token verification happens in the authorizer; handlers only read the claims
//! it passes along.

use serde_json::Value;

use itemstore_core::keys::is_valid_key_part;

use super::event::{ApiGatewayRequest, EventError};

pub const TENANT_CLAIM: &str = "custom:tenant_id";
pub const USER_CLAIM: &str = "sub";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub tenant_id: String,
    pub user_id: String,
}

impl Identity {
    pub fn new(tenant_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Reads the tenant and user from the first claims object found under
    /// `jwt.claims`, `jwt_claims` or `claims`.
    ///
    /// A tenant that cannot be embedded in a storage key yields no identity.
    pub fn from_authorizer(authorizer: &Value) -> Option<Self> {
        let claims = authorizer
            .pointer("/jwt/claims")
            .or_else(|| authorizer.get("jwt_claims"))
            .or_else(|| authorizer.get("claims"))?;

        let tenant_id = claim(claims, TENANT_CLAIM)
            .filter(|tenant| is_valid_key_part(tenant))?;
        let user_id = claim(claims, USER_CLAIM)?;
        Some(Self::new(tenant_id, user_id))
    }

    pub fn from_request(request: &ApiGatewayRequest) -> Result<Self, EventError> {
        request
            .request_context
            .authorizer
            .as_ref()
            .and_then(Self::from_authorizer)
            .ok_or(EventError::MissingIdentity)
    }
}

fn claim<'a>(claims: &'a Value, name: &str) -> Option<&'a str> {
    claims
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
