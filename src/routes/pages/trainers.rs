use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{
    display_or_empty, form_error, member_links, render, MemberLink, PageError,
};
use crate::{
    domain::{NewTrainer, Trainer, TrainerId, ValidationError},
    routes::SearchParams,
    AppState,
};

const INDEX: &str = "/Trainer";

pub fn trainer_routes() -> Router<AppState> {
    Router::new()
        .route("/Trainer", get(index))
        .route("/Trainer/Index", get(index))
        .route("/Trainer/Details/:id", get(details))
        .route("/Trainer/Create", get(create_form).post(create))
        .route("/Trainer/Edit/:id", get(edit_form).post(edit))
        .route("/Trainer/Delete/:id", get(delete_confirmation).post(delete))
}

pub struct TrainerView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<&Trainer> for TrainerView {
    fn from(trainer: &Trainer) -> Self {
        Self {
            id: *trainer.id.as_ref(),
            name: trainer.name.as_ref().to_owned(),
            email: display_or_empty(&trainer.email),
            phone_number: display_or_empty(&trainer.phone),
        }
    }
}

/// Raw form fields, echoed back when the submission is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct TrainerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: String,
}

impl TrainerForm {
    fn parse(&self) -> Result<NewTrainer, ValidationError> {
        NewTrainer::parse(&self.name, &self.email, &self.phone_number)
    }
}

impl From<&Trainer> for TrainerForm {
    fn from(trainer: &Trainer) -> Self {
        Self {
            name: trainer.name.as_ref().to_owned(),
            email: display_or_empty(&trainer.email),
            phone_number: display_or_empty(&trainer.phone),
        }
    }
}

#[derive(Template)]
#[template(path = "trainers/index.html")]
struct IndexTemplate {
    trainers: Vec<TrainerView>,
    search_string: String,
}

#[derive(Template)]
#[template(path = "trainers/details.html")]
struct DetailsTemplate {
    trainer: TrainerView,
    members: Vec<MemberLink>,
}

#[derive(Template)]
#[template(path = "trainers/form.html")]
struct FormTemplate {
    heading: &'static str,
    action: String,
    form: TrainerForm,
    error: String,
}

#[derive(Template)]
#[template(path = "trainers/delete.html")]
struct DeleteTemplate {
    trainer: TrainerView,
}

#[tracing::instrument(name = "Trainer index page", skip_all)]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, PageError> {
    let trainers = state
        .trainer_store
        .read()
        .await
        .list_trainers(params.filter())
        .await?;

    let template = IndexTemplate {
        trainers: trainers.iter().map(TrainerView::from).collect(),
        search_string: params.filter().unwrap_or_default().to_owned(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Trainer details page", skip_all)]
async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let trainer_id = TrainerId::new(id);
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

    let template = DetailsTemplate {
        trainer: TrainerView::from(&trainer),
        members: member_links(&members),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Trainer create form", skip_all)]
async fn create_form() -> Result<Response, PageError> {
    let template = FormTemplate {
        heading: "Create",
        action: "/Trainer/Create".to_owned(),
        form: TrainerForm::default(),
        error: String::new(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Trainer create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Form(form): Form<TrainerForm>,
) -> Result<Response, PageError> {
    let outcome = match form.parse() {
        Ok(new_trainer) => state
            .trainer_store
            .write()
            .await
            .add_trainer(new_trainer)
            .await
            .map(|_| ())
            .map_err(form_error),
        Err(e) => Err(form_error(e)),
    };

    match outcome {
        Ok(()) => Ok(Redirect::to(INDEX).into_response()),
        Err(rejection) => {
            let (status, error) = rejection?;
            let template = FormTemplate {
                heading: "Create",
                action: "/Trainer/Create".to_owned(),
                form,
                error,
            };
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Trainer edit form", skip_all)]
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let trainer = state
        .trainer_store
        .read()
        .await
        .get_trainer(&TrainerId::new(id))
        .await?;

    let template = FormTemplate {
        heading: "Edit",
        action: format!("/Trainer/Edit/{id}"),
        form: TrainerForm::from(&trainer),
        error: String::new(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Trainer edit", skip_all)]
async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<TrainerForm>,
) -> Result<Response, PageError> {
    let outcome = match form.parse() {
        Ok(new_trainer) => state
            .trainer_store
            .write()
            .await
            .update_trainer(&new_trainer.with_id(TrainerId::new(id)))
            .await
            .map_err(form_error),
        Err(e) => Err(form_error(e)),
    };

    match outcome {
        Ok(()) => Ok(Redirect::to(INDEX).into_response()),
        Err(rejection) => {
            let (status, error) = rejection?;
            let template = FormTemplate {
                heading: "Edit",
                action: format!("/Trainer/Edit/{id}"),
                form,
                error,
            };
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Trainer delete confirmation", skip_all)]
async fn delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let trainer = state
        .trainer_store
        .read()
        .await
        .get_trainer(&TrainerId::new(id))
        .await?;

    let template = DeleteTemplate {
        trainer: TrainerView::from(&trainer),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Trainer delete", skip_all)]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    state
        .trainer_store
        .write()
        .await
        .delete_trainer(&TrainerId::new(id))
        .await?;

    Ok(Redirect::to(INDEX).into_response())
}
