use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    services::auth::{self as auth_service, LoginOutcome, RegisterOutcome},
    state::AppState,
    validation::forms::{coerce_terms, validate_login, validate_signup},
};

/// The signup form body.
///
/// Every field defaults to empty when absent so that a missing field
/// reaches the validators as an empty value and comes back through the
/// structured 400 channel, the way the original treated absent fields.
#[derive(Deserialize, Debug)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub number: String,
    /// Raw checkbox value; coerced to a boolean, never validated.
    #[serde(rename = "termsAndConditions")]
    pub terms_and_conditions: Option<String>,
}

/// The login form body. Missing fields validate as empty, as above.
#[derive(Deserialize, Debug)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Handles user registration.
///
/// Three distinct failure channels: field validation produces the
/// structured 400 JSON list, a duplicate email redirects back to the
/// signup page with a query-string message, and a hashing or store
/// failure becomes a logged plain-text 500.
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    tracing::info!("📝 Signup attempt for: {}", form.email);

    let errors = validate_signup(&form.name, &form.email, &form.password, &form.number);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let terms_accepted = coerce_terms(form.terms_and_conditions.as_deref());

    match auth_service::register(
        &state.db,
        form.name,
        form.email,
        form.password,
        form.number,
        terms_accepted,
    )
    .await
    {
        Ok(RegisterOutcome::Created(user)) => {
            tracing::info!("✅ User registered: {}", user.id);
            Ok(Redirect::to("/").into_response())
        }
        Ok(RegisterOutcome::DuplicateEmail) => {
            Ok(Redirect::to("/signup?message=User%20already%20exists").into_response())
        }
        Err(e) => {
            tracing::error!("❌ Registration failed: {}", e);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, "Error registering user").into_response())
        }
    }
}

/// Handles user login.
///
/// Unknown email and wrong password are business-rule outcomes, not
/// errors: both redirect back to the login page with a query-string
/// indicator rather than returning 401.
#[axum::debug_handler]
pub async fn login(
    State(mut state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", form.email);

    let errors = validate_login(&form.email, &form.password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    match auth_service::authenticate(&state.db, &form.email, &form.password).await? {
        LoginOutcome::UserNotFound => {
            Ok(Redirect::to("/login?error=User%20not%20found").into_response())
        }
        LoginOutcome::WrongPassword => {
            Ok(Redirect::to("/login?error=Incorrect%20password").into_response())
        }
        LoginOutcome::Success(user) => {
            let mut loaded = state.sessions.load(&cookies).await?;
            loaded.session.is_logged_in = true;
            state.sessions.save(&cookies, &loaded).await?;
            tracing::info!("✅ User logged in: {}", user.id);
            Ok(Redirect::to("/").into_response())
        }
    }
}

/// Handles logout.
///
/// The session record is reset in place (flag cleared, cart kept), not
/// destroyed. Logging out while already logged out looks identical.
#[axum::debug_handler]
pub async fn logout(State(mut state): State<AppState>, cookies: Cookies) -> Result<Response> {
    let mut loaded = state.sessions.load(&cookies).await?;
    loaded.session.is_logged_in = false;
    state.sessions.save(&cookies, &loaded).await?;

    tracing::info!("👋 Session logged out: {}", loaded.id);
    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    // axum's Form extractor goes through serde_urlencoded, so these
    // exercise exactly what a browser submission deserializes to.
    #[test]
    fn missing_signup_field_deserializes_as_empty_and_fails_validation() {
        let form: SignupForm =
            serde_urlencoded::from_str("name=Jo&email=jo%40x.com&number=%2B14155552671").unwrap();
        assert_eq!(form.password, "");

        let errors = validate_signup(&form.name, &form.email, &form.password, &form.number);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "password");
    }

    #[test]
    fn empty_signup_body_collects_every_field_error() {
        let form: SignupForm = serde_urlencoded::from_str("").unwrap();
        let errors = validate_signup(&form.name, &form.email, &form.password, &form.number);
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["name", "email", "password", "number"]);
        assert!(form.terms_and_conditions.is_none());
    }

    #[test]
    fn empty_login_body_collects_both_field_errors() {
        let form: LoginForm = serde_urlencoded::from_str("").unwrap();
        assert_eq!(validate_login(&form.email, &form.password).len(), 2);
    }
}
