use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::domain::articles::{seed, service::ArticleService};
use backend::handlers::{account, admin, news};
use backend::shared::uploads::ImageStore;
use backend::shared::{config, data::db};
use backend::state::AppState;
use backend::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Отключаем логи SQL запросов, но оставляем логи приложения
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        tracing::info!(
            "{} {} -> {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        response
    }

    let config = config::load_config()?;
    let db_path = config::get_database_path(&config);
    let public_dir = config::get_public_dir(&config);

    let conn = db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Ensure default accounts exist
    system::initialization::ensure_default_users(&conn).await?;

    // Seed demo content into an empty database
    seed::seed_demo_articles(&conn).await?;

    let images = ImageStore::new(public_dir.clone());
    let uploads_dir = images.uploads_dir();
    let articles = ArticleService::new(conn.clone(), images);
    let state = AppState::new(conn, articles);

    // ========================================
    // ADMIN ROUTES (session cookie + admin role)
    // ========================================
    let admin_routes = Router::new()
        .route("/admin/articles", get(admin::index))
        .route(
            "/admin/articles/create",
            get(admin::create_form).post(admin::create),
        )
        .route(
            "/admin/articles/edit/:id",
            get(admin::edit_form).post(admin::edit),
        )
        .route(
            "/admin/articles/delete/:id",
            get(admin::delete_form).post(admin::delete),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_admin,
        ));

    let app = Router::new()
        .route("/health", get(news::health))
        // ========================================
        // PUBLIC NEWS ROUTES
        // ========================================
        .route("/", get(news::index))
        .route("/news/all", get(news::all))
        .route("/news/articles", get(news::get_articles))
        .route("/news/details/:id", get(news::details))
        .route("/news/set-language", get(news::set_language))
        // ========================================
        // ACCOUNT ROUTES (PUBLIC)
        // ========================================
        .route(
            "/admin/account/login",
            get(account::login_form).post(account::login),
        )
        .route("/admin/account/logout", post(account::logout))
        .route(
            "/admin/account/register",
            get(account::register_form).post(account::register),
        )
        .merge(admin_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service("/assets", ServeDir::new(public_dir.join("assets")))
        .layer(middleware::from_fn(request_logger))
        .with_state(state);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            // Propagate the error to stop the application
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
