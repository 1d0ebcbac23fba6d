//! JWT token generation and validation for both principal namespaces.
//!
//! Customer and admin tokens are HS256-signed JWTs verified against two
//! separately configured secrets, so a customer token can never be replayed
//! on an admin route. Validation failures keep expiry distinct from
//! signature problems so clients know when to re-authenticate.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cardvault_core::error::{auth_codes, CoreError};
use cardvault_core::roles::AdminRole;
use cardvault_core::types::DbId;

/// Marker value carried in admin token claims.
const ADMIN_TOKEN_TYPE: &str = "admin";

/// Default token lifetime in minutes.
const DEFAULT_EXPIRES_IN_MINS: i64 = 60;

/// JWT claims embedded in every customer access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomerClaims {
    /// Subject -- the customer's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// JWT claims embedded in every admin access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    /// Subject -- the admin's internal database id.
    pub sub: DbId,
    /// The admin's role name (e.g. `"CSR"`, `"ADMIN"`).
    pub role: String,
    /// Always `"admin"`; rejected otherwise.
    pub token_type: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for customer tokens.
    pub customer_secret: String,
    /// HMAC-SHA256 secret for admin tokens.
    pub admin_secret: String,
    /// Token lifetime in minutes (default: 60).
    pub expires_in_mins: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `ADMIN_JWT_SECRET` | **yes**  | --      |
    /// | `JWT_EXPIRES_IN`   | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if either secret is not set or is empty.
    pub fn from_env() -> Self {
        let customer_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!customer_secret.is_empty(), "JWT_SECRET must not be empty");

        let admin_secret = std::env::var("ADMIN_JWT_SECRET")
            .expect("ADMIN_JWT_SECRET must be set in the environment");
        assert!(!admin_secret.is_empty(), "ADMIN_JWT_SECRET must not be empty");

        let expires_in_mins: i64 = std::env::var("JWT_EXPIRES_IN")
            .unwrap_or_else(|_| DEFAULT_EXPIRES_IN_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRES_IN must be a valid i64 (minutes)");

        Self {
            customer_secret,
            admin_secret,
            expires_in_mins,
        }
    }
}

/// Generate an HS256 access token for a customer.
pub fn generate_customer_token(
    customer_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = CustomerClaims {
        sub: customer_id,
        exp: now + config.expires_in_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.customer_secret.as_bytes()),
    )
}

/// Generate an HS256 access token for an admin user.
pub fn generate_admin_token(
    admin_id: DbId,
    role: AdminRole,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = AdminClaims {
        sub: admin_id,
        role: role.as_str().to_string(),
        token_type: ADMIN_TOKEN_TYPE.to_string(),
        exp: now + config.expires_in_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.admin_secret.as_bytes()),
    )
}

/// Validate a customer token, returning the embedded [`CustomerClaims`].
///
/// Expired tokens surface `TOKEN_EXPIRED`; any other failure surfaces
/// `TOKEN_INVALID`.
pub fn validate_customer_token(token: &str, config: &JwtConfig) -> Result<CustomerClaims, CoreError> {
    decode::<CustomerClaims>(
        token,
        &DecodingKey::from_secret(config.customer_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map(|data| data.claims)
    .map_err(map_token_error)
}

/// Validate an admin token, returning the embedded [`AdminClaims`].
///
/// Rejects tokens whose `token_type` is not `"admin"` even when the
/// signature verifies.
pub fn validate_admin_token(token: &str, config: &JwtConfig) -> Result<AdminClaims, CoreError> {
    let claims = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(config.admin_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(map_token_error)?;

    if claims.token_type != ADMIN_TOKEN_TYPE {
        return Err(CoreError::unauthorized(
            auth_codes::TOKEN_INVALID,
            "Invalid token",
        ));
    }
    Ok(claims)
}

/// Map a jsonwebtoken error onto the 401 taxonomy, keeping expiry distinct.
fn map_token_error(err: jsonwebtoken::errors::Error) -> CoreError {
    match err.kind() {
        ErrorKind::ExpiredSignature => {
            CoreError::unauthorized(auth_codes::TOKEN_EXPIRED, "Token expired")
        }
        _ => CoreError::unauthorized(auth_codes::TOKEN_INVALID, "Invalid token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with known secrets.
    fn test_config() -> JwtConfig {
        JwtConfig {
            customer_secret: "customer-secret-long-enough-for-hmac".to_string(),
            admin_secret: "admin-secret-long-enough-for-hmac".to_string(),
            expires_in_mins: 60,
        }
    }

    #[test]
    fn customer_token_round_trip() {
        let config = test_config();
        let token = generate_customer_token(42, &config).expect("generation should succeed");
        let claims = validate_customer_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn admin_token_round_trip() {
        let config = test_config();
        let token = generate_admin_token(7, AdminRole::FraudAnalyst, &config)
            .expect("generation should succeed");
        let claims = validate_admin_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "FRAUD_ANALYST");
        assert_eq!(claims.token_type, "admin");
    }

    #[test]
    fn namespaces_are_separate() {
        let config = test_config();

        // A customer token must not validate as an admin token.
        let customer_token = generate_customer_token(1, &config).unwrap();
        let err = validate_admin_token(&customer_token, &config).unwrap_err();
        assert_eq!(err.code(), auth_codes::TOKEN_INVALID);

        // An admin token must not validate as a customer token.
        let admin_token = generate_admin_token(1, AdminRole::Admin, &config).unwrap();
        let err = validate_customer_token(&admin_token, &config).unwrap_err();
        assert_eq!(err.code(), auth_codes::TOKEN_INVALID);
    }

    #[test]
    fn expired_token_reports_expired() {
        let config = test_config();

        // Manually create an already-expired token, well past the default
        // 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = CustomerClaims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.customer_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let err = validate_customer_token(&token, &config).unwrap_err();
        assert_eq!(err.code(), auth_codes::TOKEN_EXPIRED);
    }

    #[test]
    fn garbage_token_reports_invalid() {
        let config = test_config();
        let err = validate_customer_token("not-a-jwt", &config).unwrap_err();
        assert_eq!(err.code(), auth_codes::TOKEN_INVALID);
    }

    #[test]
    fn wrong_secret_fails() {
        let config = test_config();
        let mut other = test_config();
        other.customer_secret = "a-completely-different-secret".to_string();

        let token = generate_customer_token(1, &config).unwrap();
        let err = validate_customer_token(&token, &other).unwrap_err();
        assert_eq!(err.code(), auth_codes::TOKEN_INVALID);
    }
}
