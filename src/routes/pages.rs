use crate::errors::ApiError;
use actix_web::{get, HttpResponse};
use askama::Template;

// All page state lives client-side (the form steps, the dashboard data),
// so the templates themselves carry no fields.

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {}

#[derive(Template)]
#[template(path = "questionnaire.html")]
struct QuestionnaireTemplate {}

#[derive(Template)]
#[template(path = "merci.html")]
struct MerciTemplate {}

#[derive(Template)]
#[template(path = "admin/login.html")]
struct AdminLoginTemplate {}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct AdminDashboardTemplate {}

#[derive(Template)]
#[template(path = "admin/super.html")]
struct AdminSuperTemplate {}

fn render<T: Template>(template: T) -> Result<HttpResponse, ApiError> {
    let body = template
        .render()
        .map_err(|e| ApiError::InternalError(format!("Template error: {}", e)))?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[get("/")]
pub async fn landing_handler() -> Result<HttpResponse, ApiError> {
    render(LandingTemplate {})
}

#[get("/questionnaire")]
pub async fn questionnaire_handler() -> Result<HttpResponse, ApiError> {
    render(QuestionnaireTemplate {})
}

#[get("/questionnaire/merci")]
pub async fn merci_handler() -> Result<HttpResponse, ApiError> {
    render(MerciTemplate {})
}

#[get("/admin/login")]
pub async fn admin_login_handler() -> Result<HttpResponse, ApiError> {
    render(AdminLoginTemplate {})
}

#[get("/admin/dashboard")]
pub async fn admin_dashboard_handler() -> Result<HttpResponse, ApiError> {
    render(AdminDashboardTemplate {})
}

#[get("/admin/super")]
pub async fn admin_super_handler() -> Result<HttpResponse, ApiError> {
    render(AdminSuperTemplate {})
}
