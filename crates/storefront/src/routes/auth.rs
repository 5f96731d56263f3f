//! Authentication route handlers.
//!
//! Login is simulated: any non-empty email and password are accepted.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::report;
use super::layout::PageContext;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{Flash, push_flash};
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Display login page.
#[instrument(skip(state, session))]
pub async fn login_page(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionStorage::new(session);

    LoginTemplate {
        page: PageContext::load(&state, &store).await,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let store = SessionStorage::new(session);

    match state
        .session_service(&store)
        .login(&form.email, &form.password)
        .await
    {
        Ok(outcome) => {
            add_breadcrumb("auth", "Logged in", None);
            let message = format!("Welcome, {}!", outcome.user.email);
            push_flash(&store, &Flash::info(message)).await?;
            Ok(Redirect::to("/"))
        }
        Err(e) => {
            report(&store, e).await?;
            Ok(Redirect::to("/auth/login"))
        }
    }
}

/// Handle logout.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let store = SessionStorage::new(session);

    state.session_service(&store).logout().await?;
    push_flash(&store, &Flash::info("You have been logged out")).await?;

    Ok(Redirect::to("/"))
}
