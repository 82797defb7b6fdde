//! HTTP handlers for list and item operations.
//!
//! Every handler works on the caller's session under a single store
//! update. Recoverable failures become a flash message plus either a
//! re-rendered form (422) or a redirect; internal faults become a 500.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use tracing::{debug, error, info};

use super::session_layer::DEFAULT_COOKIE_NAME;
use super::types::{ListNameForm, TodoForm};
use super::views;
use crate::error::{NameKind, TodoError};
use crate::session::{Flash, Session, SessionStore, SessionToken, DEFAULT_IDLE_TIMEOUT};
use crate::todo::{ItemId, ListId};
use crate::Result;

/// Message shown when a form body cannot be decoded.
const UNREADABLE_FORM: &str = "The submitted form could not be read.";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_COOKIE_NAME, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_cookie_name(cookie_name: impl AsRef<str>) -> Self {
        Self::with_settings(cookie_name, DEFAULT_IDLE_TIMEOUT)
    }

    /// State with a custom cookie name and session idle timeout.
    pub fn with_settings(cookie_name: impl AsRef<str>, idle_timeout: Duration) -> Self {
        Self {
            store: Arc::new(SessionStore::with_idle_timeout(idle_timeout)),
            cookie_name: Arc::from(cookie_name.as_ref()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// 302 redirect to `location`.
pub fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn list_path(id: ListId) -> String {
    format!("/lists/{id}")
}

/// Run `f` against the caller's session.
fn with_session<F>(state: &AppState, token: &SessionToken, f: F) -> Result<Response>
where
    F: FnOnce(&mut Session) -> Result<Response>,
{
    state.store.update(token, f)?
}

/// Flash a recoverable error and send the user somewhere safe.
///
/// Missing items lead back to their list, everything else to the index.
/// Unrecoverable errors are passed on and end up as a 500.
fn recover(flash: &mut Flash, err: TodoError, list: Option<ListId>) -> Result<Response> {
    if !err.is_recoverable() {
        return Err(err);
    }
    debug!(error = %err, "recovered from request error");
    let target = match (&err, list) {
        (TodoError::NotFound(NameKind::Item), Some(id)) => list_path(id),
        _ => "/lists".to_string(),
    };
    flash.set_error(err.to_string());
    Ok(redirect(&target))
}

/// Re-render the originating form with the error shown (422).
///
/// Lookups that fail are recovered with a redirect instead.
fn reject<P>(flash: &mut Flash, err: TodoError, page: P) -> Result<Response>
where
    P: FnOnce(&Flash) -> Result<String>,
{
    if matches!(err, TodoError::NotFound(_)) || !err.is_recoverable() {
        return recover(flash, err, None);
    }
    debug!(error = %err, "input rejected");
    flash.set_error(err.to_string());
    let shown = flash.take();
    match page(&shown) {
        Ok(page) => Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()),
        Err(err) => recover(flash, err, None),
    }
}

/// Flash an unreadable form body and send the user back to `back`.
fn unreadable_form(flash: &mut Flash, rejection: &FormRejection, back: &str) -> Response {
    debug!(error = %rejection, "form rejected");
    flash.set_error(UNREADABLE_FORM);
    redirect(back)
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /`
pub async fn index() -> Response {
    redirect("/lists")
}

/// `GET /lists`
pub async fn list_lists(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Html<String>> {
    state.store.update(&token, |session| {
        let flash = session.flash.take();
        Html(views::lists_page(&flash, &session.lists.sorted_for_display()))
    })
}

/// `GET /lists/new`
pub async fn new_list_form(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Html<String>> {
    state.store.update(&token, |session| {
        Html(views::new_list_page(&session.flash.take(), ""))
    })
}

/// `POST /lists`
pub async fn create_list(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    form: std::result::Result<Form<ListNameForm>, FormRejection>,
) -> Result<Response> {
    with_session(&state, &token, |session| {
        let raw = match form {
            Ok(Form(form)) => form.list_name.unwrap_or_default(),
            Err(rejection) => {
                return Ok(unreadable_form(&mut session.flash, &rejection, "/lists/new"))
            }
        };
        match session.lists.create_list(&raw) {
            Ok(id) => {
                info!(session = %token, list_id = %id, "list created");
                session.flash.set_success("The list has been created!");
                Ok(redirect("/lists"))
            }
            Err(err) => reject(&mut session.flash, err, |flash| {
                Ok(views::new_list_page(flash, &raw))
            }),
        }
    })
}

/// `GET /lists/{id}`
pub async fn show_list(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        match id.and_then(|id| session.lists.get_list(id)) {
            Ok(list) => Ok(Html(views::list_page(&session.flash.take(), list, "")).into_response()),
            Err(err) => recover(&mut session.flash, err, None),
        }
    })
}

/// `GET /lists/{id}/edit`
pub async fn edit_list_form(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        match id.and_then(|id| session.lists.get_list(id)) {
            Ok(list) => {
                let page = views::edit_list_page(&session.flash.take(), list, list.name());
                Ok(Html(page).into_response())
            }
            Err(err) => recover(&mut session.flash, err, None),
        }
    })
}

/// `POST /lists/{id}/edit`
pub async fn rename_list(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
    form: std::result::Result<Form<ListNameForm>, FormRejection>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        let id = match id {
            Ok(id) => id,
            Err(err) => return recover(&mut session.flash, err, None),
        };
        let draft = match form {
            Ok(Form(form)) => form.list_name,
            Err(rejection) => {
                let back = format!("{}/edit", list_path(id));
                return Ok(unreadable_form(&mut session.flash, &rejection, &back));
            }
        };
        match session.lists.rename_list(id, draft.as_deref()) {
            Ok(()) => {
                info!(session = %token, list_id = %id, "list renamed");
                session.flash.set_success("The list has been updated!");
                Ok(redirect(&list_path(id)))
            }
            Err(err) => {
                let lists = &session.lists;
                let draft = draft.as_deref().unwrap_or_default();
                reject(&mut session.flash, err, |flash| {
                    let list = lists.get_list(id)?;
                    Ok(views::edit_list_page(flash, list, draft))
                })
            }
        }
    })
}

/// `POST /lists/{id}/delete`
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        match id.and_then(|id| session.lists.delete_list(id)) {
            Ok(list) => {
                info!(session = %token, list_id = %list.id(), "list deleted");
                session.flash.set_success("The list has been deleted!");
                Ok(redirect("/lists"))
            }
            Err(err) => recover(&mut session.flash, err, None),
        }
    })
}

/// `POST /lists/{id}/todos`
pub async fn add_item(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
    form: std::result::Result<Form<TodoForm>, FormRejection>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        let id = match id {
            Ok(id) => id,
            Err(err) => return recover(&mut session.flash, err, None),
        };
        let text = match form {
            Ok(Form(form)) => form.todo,
            Err(rejection) => {
                return Ok(unreadable_form(&mut session.flash, &rejection, &list_path(id)))
            }
        };
        match session.lists.add_item(id, &text) {
            Ok(item) => {
                info!(session = %token, list_id = %id, item_id = %item, "item added");
                session.flash.set_success("Item has been added to list!");
                Ok(redirect(&list_path(id)))
            }
            Err(err) => {
                let lists = &session.lists;
                reject(&mut session.flash, err, |flash| {
                    let list = lists.get_list(id)?;
                    Ok(views::list_page(flash, list, &text))
                })
            }
        }
    })
}

/// Parse both path segments of an item route.
fn item_target(list: &str, item: &str) -> Result<(ListId, ItemId)> {
    Ok((list.parse()?, item.parse()?))
}

/// `POST /lists/{id}/remove/{index}`
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path((id, index)): Path<(String, String)>,
) -> Result<Response> {
    let target = item_target(&id, &index);
    with_session(&state, &token, |session| {
        let (id, item) = match target {
            Ok(target) => target,
            Err(err) => return recover(&mut session.flash, err, id.parse().ok()),
        };
        match session.lists.remove_item(id, item) {
            Ok(removed) => {
                info!(session = %token, list_id = %id, item_id = %removed.id, "item removed");
                session.flash.set_success("Item was deleted!");
                Ok(redirect(&list_path(id)))
            }
            Err(err) => recover(&mut session.flash, err, Some(id)),
        }
    })
}

/// `POST /lists/{id}/todos/{index}`
pub async fn toggle_item(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path((id, index)): Path<(String, String)>,
) -> Result<Response> {
    let target = item_target(&id, &index);
    with_session(&state, &token, |session| {
        let (id, item) = match target {
            Ok(target) => target,
            Err(err) => return recover(&mut session.flash, err, id.parse().ok()),
        };
        match session.lists.toggle_item(id, item) {
            Ok(completed) => {
                info!(session = %token, list_id = %id, item_id = %item, completed, "item toggled");
                session.flash.set_success("List has been updated!");
                Ok(redirect(&list_path(id)))
            }
            Err(err) => recover(&mut session.flash, err, Some(id)),
        }
    })
}

/// `POST /lists/{id}/finish`
pub async fn complete_all(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = id.parse::<ListId>();
    with_session(&state, &token, |session| {
        match id.and_then(|id| session.lists.complete_all(id).map(|()| id)) {
            Ok(id) => {
                info!(session = %token, list_id = %id, "all items completed");
                session.flash.set_success("All items have been marked as complete!");
                Ok(redirect(&list_path(id)))
            }
            Err(err) => recover(&mut session.flash, err, None),
        }
    })
}
