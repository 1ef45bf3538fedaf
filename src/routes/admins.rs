use crate::{
    config::AppConfig,
    db::{admin_repository::AdminRepository, schema::open_db},
    errors::ApiError,
    models::{
        admin::{is_valid_email, AdminPublic},
        api::{DataResponse, MessageResponse},
    },
    routes::guard::{authorize, bearer_token, Access},
    utils::security::hash_password,
};
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use log::info;
use serde::Deserialize;

// List all admins (super admin only). Password hashes never leave the
// server; rows are projected through AdminPublic.
#[get("/api/admins")]
pub async fn list_admins(
    req: HttpRequest,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req);
    let config = config.get_ref().clone();

    let admins = web::block(move || {
        let conn =
            open_db(&config.database_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let repo = AdminRepository::new(conn);

        authorize(token.as_deref(), Access::SuperAdmin, &config, |id| {
            repo.find_admin_by_id(id)
        })?
        .into_admin()?;

        repo.list_admins()
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    let admins: Vec<AdminPublic> = admins.into_iter().map(AdminPublic::from).collect();
    Ok(HttpResponse::Ok().json(DataResponse::new(admins)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    email: String,
    password: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    is_super_admin: bool,
}

// Create a new admin account (super admin only).
#[post("/api/admins")]
pub async fn create_admin(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    body: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();
    let token = bearer_token(&req);
    let config = config.get_ref().clone();

    let created = web::block(move || {
        let conn =
            open_db(&config.database_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let repo = AdminRepository::new(conn);

        // Guard first: a missing token is 401 even when the body is bad.
        let caller = authorize(token.as_deref(), Access::SuperAdmin, &config, |id| {
            repo.find_admin_by_id(id)
        })?
        .into_admin()?;

        if payload.email.trim().is_empty() || payload.password.is_empty() {
            return Err(ApiError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }
        if !is_valid_email(&payload.email) {
            return Err(ApiError::ValidationError("Invalid email address".to_string()));
        }

        // Check-then-insert is not atomic; the UNIQUE column in the
        // repository backstops the race with the same 409.
        if repo.find_admin_by_email(&payload.email)?.is_some() {
            return Err(ApiError::Conflict(
                "An admin with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)?;
        let created = repo.create_admin(
            &payload.email,
            &password_hash,
            payload.name.as_deref(),
            payload.is_super_admin,
        )?;

        info!(
            "Admin {} created account {} (super: {})",
            caller.email, created.email, created.is_super_admin
        );
        Ok(created)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Created().json(DataResponse::new(AdminPublic::from(created))))
}

#[derive(Deserialize)]
pub struct DeleteAdminQuery {
    id: Option<i64>,
}

// Delete an admin account (super admin only). An admin can never remove
// their own access through this endpoint.
#[delete("/api/admins")]
pub async fn delete_admin(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    query: web::Query<DeleteAdminQuery>,
) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req);
    let config = config.get_ref().clone();
    let target_id = query.into_inner().id;

    web::block(move || {
        let conn =
            open_db(&config.database_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let repo = AdminRepository::new(conn);

        let caller = authorize(token.as_deref(), Access::SuperAdmin, &config, |id| {
            repo.find_admin_by_id(id)
        })?
        .into_admin()?;

        let target_id = target_id
            .ok_or_else(|| ApiError::ValidationError("Admin ID is required".to_string()))?;

        if target_id == caller.id {
            return Err(ApiError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }

        let deleted = repo.delete_admin(target_id)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Admin not found".to_string()));
        }

        info!("Admin {} deleted account id {}", caller.email, target_id);
        Ok(())
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Admin deleted successfully")))
}
