use axum::{
    routing::{get, get_service},
    Router,
};

use std::net::SocketAddr;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod sessions;
mod state;

mod models {
    pub mod cart;
    pub mod session;
    pub mod user;
}

mod repositories {
    pub mod user;
}

mod services {
    pub mod auth;
}

mod handlers {
    pub mod auth;
    pub mod cart;
    pub mod pages;
}

mod validation {
    pub mod forms;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    match db::ensure_schema(&state.db).await {
        Ok(()) => {
            tracing::info!("✅ Users table ready");
        }
        Err(e) => {
            tracing::error!("❌ Failed to ensure users table: {}", e);
            return Err(e.into());
        }
    }

    let app = Router::new()
        .route("/", get(handlers::pages::home))
        .route(
            "/signup",
            get_service(ServeFile::new("public/signup.html")).post(handlers::auth::signup),
        )
        .route(
            "/login",
            get_service(ServeFile::new("public/login.html")).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/search", get(handlers::pages::search))
        .route(
            "/product",
            get(handlers::pages::product).post(handlers::cart::add_item),
        )
        .route(
            "/cart",
            get(handlers::cart::view).post(handlers::cart::remove_item),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .fallback_service(ServeDir::new("public"));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
