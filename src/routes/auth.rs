use crate::{
    config::AppConfig,
    db::{admin_repository::AdminRepository, schema::open_db},
    errors::ApiError,
    models::api::LoginResponse,
    utils::security::{issue_token, verify_password},
};
use actix_web::{post, web, HttpResponse};
use log::{info, warn};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[post("/api/auth/login")]
pub async fn login(
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let LoginRequest { email, password } = body.into_inner();

    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::ValidationError(
            "Email and password are required".to_string(),
        ));
    }

    let db_path = config.database_path.clone();
    let email_clone = email.clone();
    let admin = web::block(move || {
        let conn = open_db(&db_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        AdminRepository::new(conn).find_admin_by_email(&email_clone)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    let admin = match admin {
        Some(admin) => admin,
        None => {
            warn!("Login failed (email not found): {}", email);
            return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
        }
    };

    let stored_hash = admin.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))?
        .map_err(ApiError::from)?;

    if !matches {
        warn!("Login failed (wrong password) for email: {}", email);
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = issue_token(admin.id, &config)?;
    info!("Admin login successful for email: {}", admin.email);

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token,
        admin: admin.into(),
    }))
}
