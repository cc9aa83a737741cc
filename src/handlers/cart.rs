use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{error::Result, models::cart::CartItem, state::AppState};

/// The add-to-cart form body. Fields are unvalidated and default to
/// empty when absent; the item is stored exactly as submitted.
#[derive(Deserialize, Debug)]
pub struct AddItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub size: String,
}

/// The cart removal form body. The index arrives as text from form
/// encoding and is parsed explicitly; when absent it defaults to empty,
/// which fails the parse and lands in the bare-400 path.
#[derive(Deserialize, Debug)]
pub struct RemoveItemForm {
    #[serde(default)]
    pub index: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub is_logged_in: bool,
    pub cart_items: Vec<CartItem>,
}

/// Adds one item to the session's cart.
///
/// The gate is a strict check of the session flag: an anonymous or
/// logged-out browser is redirected to the login page and the item is
/// discarded, not queued.
#[axum::debug_handler]
pub async fn add_item(
    State(mut state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<AddItemForm>,
) -> Result<Response> {
    let mut loaded = state.sessions.load(&cookies).await?;

    if !loaded.session.is_logged_in {
        return Ok(Redirect::to("/login").into_response());
    }

    loaded.session.add_item(CartItem {
        name: form.name,
        price: form.price,
        size: form.size,
    });
    state.sessions.save(&cookies, &loaded).await?;

    tracing::debug!(
        "🛒 Cart item added, session {} now has {} item(s)",
        loaded.id,
        loaded.session.cart.len()
    );
    Ok(Redirect::to("/cart").into_response())
}

/// Renders the cart view, or redirects to login when not
/// authenticated. The cart page is never reachable anonymously.
#[axum::debug_handler]
pub async fn view(State(mut state): State<AppState>, cookies: Cookies) -> Result<Response> {
    let loaded = state.sessions.load(&cookies).await?;

    if !loaded.session.is_logged_in {
        return Ok(Redirect::to("/login").into_response());
    }

    Ok(CartTemplate {
        is_logged_in: true,
        cart_items: loaded.session.cart,
    }
    .into_response())
}

/// Removes one item from the cart by position.
///
/// Policy for the submitted index: it must parse as a non-negative
/// integer and fall inside the current cart. Anything else is a bare
/// 400 with no body, and the cart is left untouched.
#[axum::debug_handler]
pub async fn remove_item(
    State(mut state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RemoveItemForm>,
) -> Result<Response> {
    let mut loaded = state.sessions.load(&cookies).await?;

    let removed = form
        .index
        .trim()
        .parse::<usize>()
        .is_ok_and(|index| loaded.session.remove_item(index));

    if !removed {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    }

    state.sessions.save(&cookies, &loaded).await?;
    Ok(Redirect::to("/cart").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_index_field_defaults_to_empty_and_fails_the_parse() {
        let form: RemoveItemForm = serde_urlencoded::from_str("").unwrap();
        assert!(form.index.trim().parse::<usize>().is_err());
    }

    #[test]
    fn partial_add_item_form_defaults_absent_fields_to_empty() {
        let form: AddItemForm = serde_urlencoded::from_str("name=Shirt").unwrap();
        assert_eq!(form.name, "Shirt");
        assert_eq!(form.price, "");
        assert_eq!(form.size, "");
    }
}
