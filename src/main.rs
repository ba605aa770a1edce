use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

use congreso::config::Config;
use congreso::services::mailer::SmtpMailer;
use congreso::services::session::SessionKeys;
use congreso::web::middleware::auth as auth_middleware;
use congreso::web::routes::{activities, auth, diplomas, enrollments, guests};
use congreso::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("configuración incompleta");

    info!("Conectando a la base de datos: {}", config.database_url);
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("No se pudo conectar a la base de datos");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("No se pudieron aplicar las migraciones");

    let mailer = SmtpMailer::from_config(&config.smtp).expect("Configuración SMTP inválida");
    let state = AppState {
        pool,
        mailer: Arc::new(mailer),
        sessions: SessionKeys::from_secret(&config.session_secret),
    };

    // Everything behind the session middleware; identity comes from the
    // verified token, never from the request body.
    let protected_routes = Router::new()
        .route("/api/activities/overview", get(activities::overview_handler))
        .route("/api/enrollments", post(enrollments::enroll_handler))
        .route("/api/verify/:code", get(enrollments::verify_handler))
        .route("/api/diplomas", post(diplomas::request_handler))
        .route(
            "/api/diplomas/activities",
            post(diplomas::eligible_activities_handler),
        )
        .route("/api/auth/logout", post(auth::logout_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    let app = Router::new()
        // Public routes
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/activities", get(activities::list_handler))
        .route("/api/guests", get(guests::list_handler))
        // Protected routes
        .merge(protected_routes)
        // Layers
        .layer(CatchPanicLayer::new())
        // State
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("No se pudo interpretar host/puerto");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "No se pudo escuchar en {}: {}. Probando {}:{}",
                addr,
                e,
                config.host,
                config.port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", config.host, config.port + 1)
                .parse()
                .expect("No se pudo interpretar el puerto alternativo");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("No se pudo escuchar en el puerto alternativo")
        }
    };

    let bound_addr = listener.local_addr().expect("dirección local");
    info!("🚀 Servidor escuchando en http://{}", bound_addr);

    axum::serve(listener, app)
        .await
        .expect("El servidor terminó con error");
}
