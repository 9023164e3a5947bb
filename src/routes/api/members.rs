use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::location;
use crate::{
    domain::{GymAPIError, Member, MemberId, NewMember, ValidationError},
    routes::SearchParams,
    AppState,
};

const RESOURCE: &str = "MemberApi";

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/MemberApi", get(list_members).post(create_member))
        .route(
            "/api/MemberApi/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}

/// Flat member shape: related rows are referenced by id only.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: i32,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "trainerId")]
    pub trainer_id: Option<i32>,
    #[serde(rename = "gymClassIds")]
    pub gym_class_ids: Vec<i32>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_ref(),
            full_name: member.full_name.as_ref().to_owned(),
            email: member.email.as_ref().map(|e| e.as_ref().to_owned()),
            phone_number: member.phone.as_ref().map(|p| p.as_ref().to_owned()),
            trainer_id: member.trainer_id.as_ref().map(|t| *t.as_ref()),
            gym_class_ids: member.class_ids.to_raw_ids(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct MemberRequest {
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, rename = "trainerId")]
    pub trainer_id: Option<i32>,
    #[serde(default, rename = "gymClassIds")]
    pub gym_class_ids: Option<Vec<i32>>,
}

impl MemberRequest {
    fn parse(&self) -> Result<NewMember, ValidationError> {
        NewMember::parse(
            &self.full_name,
            self.email.as_deref().unwrap_or_default(),
            self.phone_number.as_deref().unwrap_or_default(),
            self.trainer_id,
            self.gym_class_ids.as_deref().unwrap_or_default(),
        )
    }
}

#[tracing::instrument(name = "List members API handler", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<(StatusCode, Json<Vec<MemberResponse>>), GymAPIError> {
    let members = state
        .member_store
        .read()
        .await
        .list_members(params.filter())
        .await?;

    let response: Vec<MemberResponse> =
        members.iter().map(MemberResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[tracing::instrument(name = "Get member API handler", skip_all)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<MemberResponse>), GymAPIError> {
    let member_id = MemberId::new(id);
    tracing::debug!("member_id: {}", member_id);

    let member = state
        .member_store
        .read()
        .await
        .get_member(&member_id)
        .await?;

    Ok((StatusCode::OK, Json(MemberResponse::from(&member))))
}

#[tracing::instrument(name = "Create member API handler", skip_all)]
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> Result<
    (StatusCode, [(header::HeaderName, String); 1], Json<MemberResponse>),
    GymAPIError,
> {
    let new_member = request.parse()?;

    let member = state
        .member_store
        .write()
        .await
        .add_member(new_member)
        .await?;
    tracing::debug!("created member_id: {}", member.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(RESOURCE, member.id))],
        Json(MemberResponse::from(&member)),
    ))
}

#[tracing::instrument(name = "Update member API handler", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MemberRequest>,
) -> Result<StatusCode, GymAPIError> {
    let member = request.parse()?.with_id(MemberId::new(id));

    state
        .member_store
        .write()
        .await
        .update_member(&member)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "Delete member API handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, GymAPIError> {
    state
        .member_store
        .write()
        .await
        .delete_member(&MemberId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
