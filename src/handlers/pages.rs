use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_cookies::Cookies;

use crate::{error::Result, state::AppState};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub is_logged_in: bool,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub is_logged_in: bool,
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub is_logged_in: bool,
}

/// Renders the home view.
///
/// Render-only: the session is read but never written, so anonymous
/// browsing does not create session records.
#[axum::debug_handler]
pub async fn home(State(mut state): State<AppState>, cookies: Cookies) -> Result<impl IntoResponse> {
    let loaded = state.sessions.load(&cookies).await?;
    Ok(IndexTemplate {
        is_logged_in: loaded.session.is_logged_in,
    })
}

/// Renders the search view.
#[axum::debug_handler]
pub async fn search(
    State(mut state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse> {
    let loaded = state.sessions.load(&cookies).await?;
    Ok(SearchTemplate {
        is_logged_in: loaded.session.is_logged_in,
    })
}

/// Renders the product view.
#[axum::debug_handler]
pub async fn product(
    State(mut state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse> {
    let loaded = state.sessions.load(&cookies).await?;
    Ok(ProductTemplate {
        is_logged_in: loaded.session.is_logged_in,
    })
}
