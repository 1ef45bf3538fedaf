use crate::{
    config::AppConfig,
    db::{admin_repository::AdminRepository, schema::open_db},
    utils::{ensure_data_dir, security::hash_password},
};
use actix_files as fs;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

mod config;
mod db;
mod errors;
mod models;
mod routes;
mod utils;

/// Creates the bootstrap admin account from ADMIN_EMAIL / ADMIN_PASSWORD
/// if that email is not present yet. Skipped silently when the variables
/// are unset, so the server can run against an already-seeded database.
async fn seed_admin_user(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (admin_email, admin_password) = match (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => {
            info!("ADMIN_EMAIL / ADMIN_PASSWORD not set, skipping admin seeding.");
            return Ok(());
        }
    };
    let admin_name = std::env::var("ADMIN_NAME").ok();
    let is_super_admin = std::env::var("IS_SUPER_ADMIN")
        .map(|v| v == "true")
        .unwrap_or(false);

    let conn = open_db(&config.database_path)?;
    let admin_repo = AdminRepository::new(conn);

    if admin_repo.find_admin_by_email(&admin_email)?.is_none() {
        info!("Admin user not found, creating...");
        let password_clone = admin_password.clone();
        let hashed_password = web::block(move || hash_password(&password_clone)).await??;

        admin_repo.create_admin(
            &admin_email,
            &hashed_password,
            admin_name.as_deref(),
            is_super_admin,
        )?;
        info!(
            "Admin user created for email: {} (super: {})",
            admin_email, is_super_admin
        );
    } else {
        info!("Admin user already exists for email: {}", admin_email);
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    if let Err(e) = ensure_data_dir(&config.database_path) {
        warn!("Failed to create data directory: {}", e);
    }

    if let Err(e) = seed_admin_user(&config).await {
        error!("Failed to seed admin user: {}", e);
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid number");

    info!("Starting server on http://{}:{}...", host, port);

    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .wrap(actix_web::middleware::Logger::default())
            // Static assets
            .service(fs::Files::new("/static", "./src/static"))
            // Public pages
            .service(routes::pages::landing_handler)
            .service(routes::pages::questionnaire_handler)
            .service(routes::pages::merci_handler)
            // Admin pages
            .service(routes::pages::admin_login_handler)
            .service(routes::pages::admin_dashboard_handler)
            .service(routes::pages::admin_super_handler)
            // JSON API
            .service(routes::auth::login)
            .service(routes::responses::create_response)
            .service(routes::responses::list_responses)
            .service(routes::admins::list_admins)
            .service(routes::admins::create_admin)
            .service(routes::admins::delete_admin)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
