use crate::views::ErrorPage;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rolodex_driver::DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Contact store failed: {0}")]
    Store(DriverError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<DriverError> for WebError {
    fn from(error: DriverError) -> Self {
        match error {
            DriverError::NotFound(_) => WebError::NotFound,
            DriverError::ParseFail(message) => WebError::BadRequest(message),
            error => WebError::Store(error),
        }
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Store(_) | WebError::Render(_) | WebError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let page = ErrorPage {
            status: status.as_u16(),
            message: self.to_string(),
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, self.to_string()).into_response(),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
