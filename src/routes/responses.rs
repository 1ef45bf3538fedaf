use crate::{
    config::AppConfig,
    db::{response_repository::ResponseRepository, schema::open_db},
    errors::ApiError,
    models::{api::DataResponse, survey::NewSurveyResponse},
    routes::guard::bearer_token,
    utils::security::verify_token,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::info;
use serde::Deserialize;

// Public, unauthenticated submission endpoint. Optional fields were
// already defaulted during deserialization; the client form handles
// format validation.
#[post("/api/responses")]
pub async fn create_response(
    config: web::Data<AppConfig>,
    body: web::Json<NewSurveyResponse>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();

    let db_path = config.database_path.clone();
    let created = web::block(move || {
        let conn = open_db(&db_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        ResponseRepository::new(conn).create_response(&payload)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    info!(
        "Stored questionnaire response #{} from club {}",
        created.id, created.club_name
    );

    Ok(HttpResponse::Created().json(DataResponse::new(created)))
}

#[derive(Deserialize)]
pub struct ListResponsesQuery {
    token: Option<String>,
}

// Listing requires a valid token but no role and no admin lookup: any
// admin may view submissions. The `?token=` query parameter is kept for
// the legacy dashboard client alongside the bearer header.
#[get("/api/responses")]
pub async fn list_responses(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    query: web::Query<ListResponsesQuery>,
) -> Result<HttpResponse, ApiError> {
    let token = query
        .into_inner()
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(&req));

    let token = token.ok_or_else(|| {
        ApiError::Unauthorized("Missing authentication token".to_string())
    })?;

    if verify_token(&token, &config).is_none() {
        return Err(ApiError::Unauthorized("Invalid or expired token".to_string()));
    }

    let db_path = config.database_path.clone();
    let responses = web::block(move || {
        let conn = open_db(&db_path).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        ResponseRepository::new(conn).list_responses()
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking error: {}", e)))??;

    Ok(HttpResponse::Ok().json(DataResponse::new(responses)))
}
