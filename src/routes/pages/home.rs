use askama::Template;
use axum::{http::StatusCode, response::Response};

use super::{render, PageError};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[tracing::instrument(name = "Home page", skip_all)]
pub async fn home() -> Result<Response, PageError> {
    render(StatusCode::OK, &HomeTemplate)
}
