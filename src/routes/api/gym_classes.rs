use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{location, MemberSummary};
use crate::{
    domain::{ClassName, GymAPIError, GymClass, GymClassId},
    AppState,
};

const RESOURCE: &str = "GymClassApi";

pub fn gym_class_routes() -> Router<AppState> {
    Router::new()
        .route("/api/GymClassApi", get(list_classes).post(create_class))
        .route(
            "/api/GymClassApi/:id",
            get(get_class).put(update_class).delete(delete_class),
        )
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GymClassResponse {
    pub id: i32,
    #[serde(rename = "className")]
    pub class_name: String,
}

impl From<&GymClass> for GymClassResponse {
    fn from(gym_class: &GymClass) -> Self {
        Self {
            id: *gym_class.id.as_ref(),
            class_name: gym_class.class_name.as_ref().to_owned(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GymClassDetailsResponse {
    #[serde(flatten)]
    pub gym_class: GymClassResponse,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct GymClassRequest {
    #[serde(default, rename = "className")]
    pub class_name: String,
}

#[tracing::instrument(name = "List gym classes API handler", skip_all)]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<GymClassResponse>>), GymAPIError> {
    let classes = state.gym_class_store.read().await.list_classes().await?;

    let response: Vec<GymClassResponse> =
        classes.iter().map(GymClassResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[tracing::instrument(name = "Get gym class API handler", skip_all)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<GymClassDetailsResponse>), GymAPIError> {
    let class_id = GymClassId::new(id);
    tracing::debug!("class_id: {}", class_id);

    let gym_class = state
        .gym_class_store
        .read()
        .await
        .get_class(&class_id)
        .await?;

    let members = state
        .member_store
        .read()
        .await
        .list_members_for_class(&class_id)
        .await?;

    let response = Json(GymClassDetailsResponse {
        gym_class: GymClassResponse::from(&gym_class),
        members: members.iter().map(MemberSummary::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[tracing::instrument(name = "Create gym class API handler", skip_all)]
pub async fn create_class(
    State(state): State<AppState>,
    Json(request): Json<GymClassRequest>,
) -> Result<
    (StatusCode, [(header::HeaderName, String); 1], Json<GymClassResponse>),
    GymAPIError,
> {
    let class_name = ClassName::parse(&request.class_name)?;

    let gym_class = state
        .gym_class_store
        .write()
        .await
        .add_class(class_name)
        .await?;
    tracing::debug!("created class_id: {}", gym_class.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(RESOURCE, gym_class.id))],
        Json(GymClassResponse::from(&gym_class)),
    ))
}

#[tracing::instrument(name = "Update gym class API handler", skip_all)]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<GymClassRequest>,
) -> Result<StatusCode, GymAPIError> {
    let class_name = ClassName::parse(&request.class_name)?;
    let gym_class = GymClass::new(GymClassId::new(id), class_name);

    state
        .gym_class_store
        .write()
        .await
        .update_class(&gym_class)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "Delete gym class API handler", skip_all)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, GymAPIError> {
    state
        .gym_class_store
        .write()
        .await
        .delete_class(&GymClassId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
