use std::collections::BTreeMap;

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

use super::{display_or_empty, form_error, render, PageError};
use crate::{
    domain::{
        GymClass, Member, MemberId, NewMember, Trainer, TrainerId,
        ValidationError,
    },
    routes::SearchParams,
    AppState,
};

const INDEX: &str = "/Member";

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/Member", get(index))
        .route("/Member/Index", get(index))
        .route("/Member/Details/:id", get(details))
        .route("/Member/Create", get(create_form).post(create))
        .route("/Member/Edit/:id", get(edit_form).post(edit))
        .route("/Member/Delete/:id", get(delete_confirmation).post(delete))
}

/// Lookup tables for rendering a member's trainer and classes by name.
struct Names {
    trainers: BTreeMap<i32, String>,
    classes: BTreeMap<i32, String>,
}

impl Names {
    fn new(trainers: &[Trainer], classes: &[GymClass]) -> Self {
        Self {
            trainers: trainers
                .iter()
                .map(|t| (*t.id.as_ref(), t.name.as_ref().to_owned()))
                .collect(),
            classes: classes
                .iter()
                .map(|c| (*c.id.as_ref(), c.class_name.as_ref().to_owned()))
                .collect(),
        }
    }

    fn view(&self, member: &Member) -> MemberView {
        let trainer_name = member
            .trainer_id
            .as_ref()
            .and_then(|id| {
                let key: &i32 = id.as_ref();
                self.trainers.get(key)
            })
            .cloned()
            .unwrap_or_default();
        let class_names = member
            .class_ids
            .iter()
            .filter_map(|id| {
                let key: &i32 = id.as_ref();
                self.classes.get(key)
            })
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        MemberView {
            id: *member.id.as_ref(),
            full_name: member.full_name.as_ref().to_owned(),
            email: display_or_empty(&member.email),
            phone_number: display_or_empty(&member.phone),
            trainer_name,
            class_names,
        }
    }
}

pub struct MemberView {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub trainer_name: String,
    pub class_names: String,
}

pub struct TrainerOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

pub struct ClassOption {
    pub id: i32,
    pub class_name: String,
    pub checked: bool,
}

/// Raw form fields, echoed back when the submission is rejected.
/// `trainerId` stays a string so that "no trainer" can be submitted blank.
#[derive(Debug, Default, Deserialize)]
pub struct MemberForm {
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(default, rename = "trainerId")]
    pub trainer_id: String,
    #[serde(default, rename = "gymClassIds")]
    pub gym_class_ids: Vec<i32>,
}

impl MemberForm {
    fn parse(&self) -> Result<NewMember, ValidationError> {
        let trainer_id = TrainerId::parse_optional(&self.trainer_id)?;
        NewMember::parse(
            &self.full_name,
            &self.email,
            &self.phone_number,
            trainer_id.map(|id| *id.as_ref()),
            &self.gym_class_ids,
        )
    }
}

impl From<&Member> for MemberForm {
    fn from(member: &Member) -> Self {
        Self {
            full_name: member.full_name.as_ref().to_owned(),
            email: display_or_empty(&member.email),
            phone_number: display_or_empty(&member.phone),
            trainer_id: member
                .trainer_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            gym_class_ids: member.class_ids.to_raw_ids(),
        }
    }
}

#[derive(Template)]
#[template(path = "members/index.html")]
struct IndexTemplate {
    members: Vec<MemberView>,
    search_string: String,
}

#[derive(Template)]
#[template(path = "members/details.html")]
struct DetailsTemplate {
    member: MemberView,
}

#[derive(Template)]
#[template(path = "members/form.html")]
struct FormTemplate {
    heading: &'static str,
    action: String,
    form: MemberForm,
    trainers: Vec<TrainerOption>,
    classes: Vec<ClassOption>,
    error: String,
}

#[derive(Template)]
#[template(path = "members/delete.html")]
struct DeleteTemplate {
    member: MemberView,
}

async fn lookup_names(state: &AppState) -> Result<Names, PageError> {
    let trainers = state.trainer_store.read().await.list_trainers(None).await?;
    let classes = state.gym_class_store.read().await.list_classes().await?;
    Ok(Names::new(&trainers, &classes))
}

async fn form_template(
    state: &AppState,
    heading: &'static str,
    action: String,
    form: MemberForm,
    error: String,
) -> Result<FormTemplate, PageError> {
    let trainers = state.trainer_store.read().await.list_trainers(None).await?;
    let classes = state.gym_class_store.read().await.list_classes().await?;

    let selected_trainer = form.trainer_id.trim();
    let trainers = trainers
        .iter()
        .map(|t| TrainerOption {
            id: *t.id.as_ref(),
            name: t.name.as_ref().to_owned(),
            selected: t.id.to_string() == selected_trainer,
        })
        .collect();
    let classes = classes
        .iter()
        .map(|c| ClassOption {
            id: *c.id.as_ref(),
            class_name: c.class_name.as_ref().to_owned(),
            checked: form.gym_class_ids.contains(c.id.as_ref()),
        })
        .collect();

    Ok(FormTemplate {
        heading,
        action,
        form,
        trainers,
        classes,
        error,
    })
}

async fn get_member_view(
    state: &AppState,
    id: i32,
) -> Result<MemberView, PageError> {
    let member = state
        .member_store
        .read()
        .await
        .get_member(&MemberId::new(id))
        .await?;
    let names = lookup_names(state).await?;
    Ok(names.view(&member))
}

#[tracing::instrument(name = "Member index page", skip_all)]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, PageError> {
    let members = state
        .member_store
        .read()
        .await
        .list_members(params.filter())
        .await?;
    let names = lookup_names(&state).await?;

    let template = IndexTemplate {
        members: members.iter().map(|m| names.view(m)).collect(),
        search_string: params.filter().unwrap_or_default().to_owned(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Member details page", skip_all)]
async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let member = get_member_view(&state, id).await?;
    render(StatusCode::OK, &DetailsTemplate { member })
}

#[tracing::instrument(name = "Member create form", skip_all)]
async fn create_form(
    State(state): State<AppState>,
) -> Result<Response, PageError> {
    let template = form_template(
        &state,
        "Create",
        "/Member/Create".to_owned(),
        MemberForm::default(),
        String::new(),
    )
    .await?;
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Member create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Form(form): Form<MemberForm>,
) -> Result<Response, PageError> {
    let outcome = match form.parse() {
        Ok(new_member) => state
            .member_store
            .write()
            .await
            .add_member(new_member)
            .await
            .map(|_| ())
            .map_err(form_error),
        Err(e) => Err(form_error(e)),
    };

    match outcome {
        Ok(()) => Ok(Redirect::to(INDEX).into_response()),
        Err(rejection) => {
            let (status, error) = rejection?;
            let template = form_template(
                &state,
                "Create",
                "/Member/Create".to_owned(),
                form,
                error,
            )
            .await?;
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Member edit form", skip_all)]
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let member = state
        .member_store
        .read()
        .await
        .get_member(&MemberId::new(id))
        .await?;

    let template = form_template(
        &state,
        "Edit",
        format!("/Member/Edit/{id}"),
        MemberForm::from(&member),
        String::new(),
    )
    .await?;
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Member edit", skip_all)]
async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<MemberForm>,
) -> Result<Response, PageError> {
    let outcome = match form.parse() {
        Ok(new_member) => state
            .member_store
            .write()
            .await
            .update_member(&new_member.with_id(MemberId::new(id)))
            .await
            .map_err(form_error),
        Err(e) => Err(form_error(e)),
    };

    match outcome {
        Ok(()) => Ok(Redirect::to(INDEX).into_response()),
        Err(rejection) => {
            let (status, error) = rejection?;
            let template = form_template(
                &state,
                "Edit",
                format!("/Member/Edit/{id}"),
                form,
                error,
            )
            .await?;
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Member delete confirmation", skip_all)]
async fn delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let member = get_member_view(&state, id).await?;
    render(StatusCode::OK, &DeleteTemplate { member })
}

#[tracing::instrument(name = "Member delete", skip_all)]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    state
        .member_store
        .write()
        .await
        .delete_member(&MemberId::new(id))
        .await?;

    Ok(Redirect::to(INDEX).into_response())
}
