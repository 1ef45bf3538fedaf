use crate::{
    config::AppConfig, errors::ApiError, models::admin::Admin, utils::security::verify_token,
};
use actix_web::{http::header, HttpRequest};

/// Role required by a privileged endpoint. `Admin` covers any existing
/// account; `SuperAdmin` additionally requires the super-admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Admin,
    SuperAdmin,
}

/// Terminal outcome of the per-request authorization check.
#[derive(Debug)]
pub enum AuthResult {
    Unauthorized(&'static str),
    Forbidden,
    Authorized(Admin),
}

impl AuthResult {
    /// Collapses the outcome at a handler boundary: 401 for any
    /// unauthenticated state, 403 for an insufficient role.
    pub fn into_admin(self) -> Result<Admin, ApiError> {
        match self {
            AuthResult::Authorized(admin) => Ok(admin),
            AuthResult::Unauthorized(msg) => Err(ApiError::Unauthorized(msg.to_string())),
            AuthResult::Forbidden => {
                Err(ApiError::Forbidden("Super admin access required".to_string()))
            }
        }
    }
}

/// Runs the guard sequence for one request: token present, token valid,
/// admin row still exists, role sufficient. The admin row is re-loaded on
/// every call — existence and the super-admin flag may have changed since
/// the token was minted, and a revoked super-admin must lose elevated
/// access on their next request.
pub fn authorize<F>(
    token: Option<&str>,
    access: Access,
    config: &AppConfig,
    find_admin: F,
) -> Result<AuthResult, ApiError>
where
    F: FnOnce(i64) -> Result<Option<Admin>, ApiError>,
{
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(AuthResult::Unauthorized("Missing authentication token")),
    };

    let admin_id = match verify_token(token, config) {
        Some(id) => id,
        None => return Ok(AuthResult::Unauthorized("Invalid or expired token")),
    };

    let admin = match find_admin(admin_id)? {
        Some(admin) => admin,
        // Deleted accounts can still hold cryptographically valid tokens.
        None => return Ok(AuthResult::Unauthorized("Unknown admin")),
    };

    if access == Access::SuperAdmin && !admin.is_super_admin {
        return Ok(AuthResult::Forbidden);
    }

    Ok(AuthResult::Authorized(admin))
}

/// Extracts the token from an `Authorization: Bearer …` header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::security::issue_token;

    fn config() -> AppConfig {
        AppConfig {
            database_path: ":memory:".into(),
            token_secret: "guard-test-secret".to_string(),
            token_ttl_hours: 24,
        }
    }

    fn admin(id: i64, is_super: bool) -> Admin {
        Admin {
            id,
            email: format!("admin{}@ligue.fr", id),
            password_hash: "hash".to_string(),
            name: None,
            is_super_admin: is_super,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn missing_token_is_unauthorized() {
        let result = authorize(None, Access::Admin, &config(), |_| {
            panic!("lookup must not run without a token")
        })
        .unwrap();
        assert!(matches!(result, AuthResult::Unauthorized(_)));

        let result = authorize(Some(""), Access::Admin, &config(), |_| {
            panic!("lookup must not run without a token")
        })
        .unwrap();
        assert!(matches!(result, AuthResult::Unauthorized(_)));
    }

    #[test]
    fn invalid_token_is_unauthorized() {
        let result = authorize(Some("garbage"), Access::Admin, &config(), |_| {
            panic!("lookup must not run for an invalid token")
        })
        .unwrap();
        assert!(matches!(result, AuthResult::Unauthorized(_)));
    }

    #[test]
    fn deleted_admin_with_valid_token_is_unauthorized() {
        let config = config();
        let token = issue_token(7, &config).unwrap();
        let result = authorize(Some(&token), Access::Admin, &config, |_| Ok(None)).unwrap();
        assert!(matches!(result, AuthResult::Unauthorized(_)));
    }

    #[test]
    fn regular_admin_is_forbidden_from_superadmin_access() {
        let config = config();
        let token = issue_token(7, &config).unwrap();
        let result = authorize(Some(&token), Access::SuperAdmin, &config, |id| {
            Ok(Some(admin(id, false)))
        })
        .unwrap();
        assert!(matches!(result, AuthResult::Forbidden));
    }

    #[test]
    fn regular_admin_passes_admin_access() {
        let config = config();
        let token = issue_token(7, &config).unwrap();
        let result = authorize(Some(&token), Access::Admin, &config, |id| {
            Ok(Some(admin(id, false)))
        })
        .unwrap();

        match result {
            AuthResult::Authorized(a) => assert_eq!(a.id, 7),
            other => panic!("expected Authorized, got {:?}", other),
        }
    }

    #[test]
    fn superadmin_passes_superadmin_access() {
        let config = config();
        let token = issue_token(3, &config).unwrap();
        let result = authorize(Some(&token), Access::SuperAdmin, &config, |id| {
            Ok(Some(admin(id, true)))
        })
        .unwrap();
        assert!(matches!(result, AuthResult::Authorized(_)));
    }

    #[test]
    fn into_admin_maps_outcomes_to_errors() {
        assert!(matches!(
            AuthResult::Unauthorized("nope").into_admin(),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            AuthResult::Forbidden.into_admin(),
            Err(ApiError::Forbidden(_))
        ));
        assert_eq!(AuthResult::Authorized(admin(1, false)).into_admin().unwrap().id, 1);
    }
}
