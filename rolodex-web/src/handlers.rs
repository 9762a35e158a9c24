use crate::error::{WebError, WebResult};
use crate::state::AppState;
use crate::views::{ContactPage, ContactView, DestroyPage, EditPage, IndexPage, Sidebar};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use rolodex::contact::{ContactId, ContactPatch};
use serde::Deserialize;

const STYLESHEET: &str = include_str!("../static/app.css");
const SCRIPT: &str = include_str!("../static/app.js");

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub favorite: String,
}

/// The edit form always submits every field, so it becomes a full-field patch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    pub first: String,
    pub last: String,
    pub twitter: String,
    pub avatar: String,
    pub notes: String,
}

impl From<EditForm> for ContactPatch {
    fn from(form: EditForm) -> Self {
        ContactPatch {
            first: Some(form.first),
            last: Some(form.last),
            twitter: Some(form.twitter),
            avatar: Some(form.avatar),
            notes: Some(form.notes),
            favorite: None,
        }
    }
}

fn render<T: Template>(page: T) -> WebResult<Html<String>> {
    Ok(Html(page.render()?))
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

fn contact_path(id: &ContactId) -> String {
    format!("/contacts/{}", id)
}

/// Looks the contact up first so an unknown id is a 404 before anything else.
async fn load_contact(
    state: &AppState,
    id: String,
    params: &SearchParams,
) -> WebResult<(Sidebar, ContactView)> {
    let id = ContactId::from(id);
    let query = params.q.clone();
    let (contacts, contact) = state
        .run(move |driver| {
            let contact = driver.find_contact(&id)?;
            Ok((driver.list_contacts(query.as_deref())?, contact))
        })
        .await?;

    let sidebar = Sidebar::new(params.q.as_deref(), &contacts, Some(&contact.id));
    Ok((sidebar, ContactView::from(&contact)))
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> WebResult<Html<String>> {
    let query = params.q.clone();
    let contacts = state
        .run(move |driver| driver.list_contacts(query.as_deref()))
        .await?;

    render(IndexPage {
        sidebar: Sidebar::new(params.q.as_deref(), &contacts, None),
    })
}

pub async fn create(State(state): State<AppState>) -> WebResult<Redirect> {
    let contact = state.run(|driver| driver.create_contact()).await?;
    tracing::info!(id = %contact.id, "created contact");
    Ok(Redirect::to(&format!("{}/edit", contact_path(&contact.id))))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
) -> WebResult<Html<String>> {
    let (sidebar, contact) = load_contact(&state, id, &params).await?;
    render(ContactPage { sidebar, contact })
}

/// Browsers without scripts get redirected back to the contact; the favorite
/// script asks for JSON and gets the stored record.
pub async fn favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<FavoriteForm>,
) -> WebResult<Response> {
    let id = ContactId::from(id);
    let target = contact_path(&id);
    let contact = state
        .run(move |driver| driver.submit_favorite(&id, &form.favorite))
        .await?;

    if wants_json(&headers) {
        Ok(Json(contact).into_response())
    } else {
        Ok(Redirect::to(&target).into_response())
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
) -> WebResult<Html<String>> {
    let (sidebar, contact) = load_contact(&state, id, &params).await?;
    render(EditPage { sidebar, contact })
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> WebResult<Redirect> {
    let id = ContactId::from(id);
    let patch = ContactPatch::from(form);
    let contact = state
        .run(move |driver| driver.edit_contact(&id, &patch))
        .await?;
    Ok(Redirect::to(&contact_path(&contact.id)))
}

pub async fn confirm_destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
) -> WebResult<Html<String>> {
    let (sidebar, contact) = load_contact(&state, id, &params).await?;
    render(DestroyPage { sidebar, contact })
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> WebResult<Redirect> {
    let id = ContactId::from(id);
    state
        .run(move |driver| driver.delete_contact(&id))
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found() -> WebError {
    WebError::NotFound
}
