use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{location, MemberSummary};
use crate::{
    domain::{GymAPIError, NewTrainer, Trainer, TrainerId, ValidationError},
    routes::SearchParams,
    AppState,
};

const RESOURCE: &str = "TrainerApi";

pub fn trainer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/TrainerApi", get(list_trainers).post(create_trainer))
        .route(
            "/api/TrainerApi/:id",
            get(get_trainer).put(update_trainer).delete(delete_trainer),
        )
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainerResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl From<&Trainer> for TrainerResponse {
    fn from(trainer: &Trainer) -> Self {
        Self {
            id: *trainer.id.as_ref(),
            name: trainer.name.as_ref().to_owned(),
            email: trainer.email.as_ref().map(|e| e.as_ref().to_owned()),
            phone_number: trainer.phone.as_ref().map(|p| p.as_ref().to_owned()),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainerDetailsResponse {
    #[serde(flatten)]
    pub trainer: TrainerResponse,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct TrainerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl TrainerRequest {
    fn parse(&self) -> Result<NewTrainer, ValidationError> {
        NewTrainer::parse(
            &self.name,
            self.email.as_deref().unwrap_or_default(),
            self.phone_number.as_deref().unwrap_or_default(),
        )
    }
}

#[tracing::instrument(name = "List trainers API handler", skip_all)]
pub async fn list_trainers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<(StatusCode, Json<Vec<TrainerResponse>>), GymAPIError> {
    let trainers = state
        .trainer_store
        .read()
        .await
        .list_trainers(params.filter())
        .await?;

    let response: Vec<TrainerResponse> =
        trainers.iter().map(TrainerResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[tracing::instrument(name = "Get trainer API handler", skip_all)]
pub async fn get_trainer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<TrainerDetailsResponse>), GymAPIError> {
    let trainer_id = TrainerId::new(id);
    tracing::debug!("trainer_id: {}", trainer_id);

    let trainer = state
        .trainer_store
        .read()
        .await
        .get_trainer(&trainer_id)
        .await?;

    let members = state
        .member_store
        .read()
        .await
        .list_members_for_trainer(&trainer_id)
        .await?;

    let response = Json(TrainerDetailsResponse {
        trainer: TrainerResponse::from(&trainer),
        members: members.iter().map(MemberSummary::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[tracing::instrument(name = "Create trainer API handler", skip_all)]
pub async fn create_trainer(
    State(state): State<AppState>,
    Json(request): Json<TrainerRequest>,
) -> Result<
    (StatusCode, [(header::HeaderName, String); 1], Json<TrainerResponse>),
    GymAPIError,
> {
    let new_trainer = request.parse()?;

    let trainer = state
        .trainer_store
        .write()
        .await
        .add_trainer(new_trainer)
        .await?;
    tracing::debug!("created trainer_id: {}", trainer.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(RESOURCE, trainer.id))],
        Json(TrainerResponse::from(&trainer)),
    ))
}

#[tracing::instrument(name = "Update trainer API handler", skip_all)]
pub async fn update_trainer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<TrainerRequest>,
) -> Result<StatusCode, GymAPIError> {
    let trainer = request.parse()?.with_id(TrainerId::new(id));

    state
        .trainer_store
        .write()
        .await
        .update_trainer(&trainer)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "Delete trainer API handler", skip_all)]
pub async fn delete_trainer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, GymAPIError> {
    state
        .trainer_store
        .write()
        .await
        .delete_trainer(&TrainerId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
