mod gym_classes;
mod home;
mod members;
mod trainers;

pub use gym_classes::*;
pub use home::*;
pub use members::*;
pub use trainers::*;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::{GymAPIError, GymStoreError, Member};

/// Errors that end a page request. Rendered through `error.html`.
#[derive(Debug)]
pub struct PageError(GymAPIError);

impl From<GymAPIError> for PageError {
    fn from(e: GymAPIError) -> Self {
        Self(e)
    }
}

impl From<GymStoreError> for PageError {
    fn from(e: GymStoreError) -> Self {
        Self(e.into())
    }
}

impl From<askama::Error> for GymAPIError {
    fn from(e: askama::Error) -> Self {
        GymAPIError::UnexpectedError(e.into())
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let error = self.0;
        error.log();
        let status = error.status_code();
        let template = ErrorTemplate {
            status: status.as_u16(),
            message: error.client_message(),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {e}");
                (status, template.message).into_response()
            }
        }
    }
}

fn render<T: Template>(
    status: StatusCode,
    template: &T,
) -> Result<Response, PageError> {
    let html = template.render().map_err(GymAPIError::from)?;
    Ok((status, Html(html)).into_response())
}

/// Splits a failed form submission into the errors that are shown next to
/// the form and the ones that end the request.
fn form_error(
    error: impl Into<GymAPIError>,
) -> Result<(StatusCode, String), PageError> {
    match error.into() {
        GymAPIError::ValidationError(e) => {
            Ok((StatusCode::BAD_REQUEST, e.as_ref().to_owned()))
        }
        GymAPIError::ReferentialIntegrityError(message) => {
            Ok((StatusCode::CONFLICT, message))
        }
        other => Err(PageError(other)),
    }
}

pub struct MemberLink {
    pub id: i32,
    pub full_name: String,
}

impl From<&Member> for MemberLink {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_ref(),
            full_name: member.full_name.as_ref().to_owned(),
        }
    }
}

fn member_links(members: &[Member]) -> Vec<MemberLink> {
    members.iter().map(MemberLink::from).collect()
}

fn display_or_empty<T: AsRef<String>>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.as_ref().to_owned())
        .unwrap_or_default()
}
