use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{form_error, member_links, render, MemberLink, PageError};
use crate::{
    domain::{ClassName, GymClass, GymClassId},
    AppState,
};

const INDEX: &str = "/GymClass";

pub fn gym_class_routes() -> Router<AppState> {
    Router::new()
        .route("/GymClass", get(index))
        .route("/GymClass/Index", get(index))
        .route("/GymClass/Details/:id", get(details))
        .route("/GymClass/Create", get(create_form).post(create))
        .route("/GymClass/Edit/:id", get(edit_form).post(edit))
        .route("/GymClass/Delete/:id", get(delete_confirmation).post(delete))
}

pub struct GymClassView {
    pub id: i32,
    pub class_name: String,
}

impl From<&GymClass> for GymClassView {
    fn from(gym_class: &GymClass) -> Self {
        Self {
            id: *gym_class.id.as_ref(),
            class_name: gym_class.class_name.as_ref().to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GymClassForm {
    #[serde(default, rename = "className")]
    pub class_name: String,
}

#[derive(Template)]
#[template(path = "gym_classes/index.html")]
struct IndexTemplate {
    classes: Vec<GymClassView>,
}

#[derive(Template)]
#[template(path = "gym_classes/details.html")]
struct DetailsTemplate {
    gym_class: GymClassView,
    members: Vec<MemberLink>,
}

#[derive(Template)]
#[template(path = "gym_classes/form.html")]
struct FormTemplate {
    heading: &'static str,
    action: String,
    form: GymClassForm,
    error: String,
}

#[derive(Template)]
#[template(path = "gym_classes/delete.html")]
struct DeleteTemplate {
    gym_class: GymClassView,
    member_count: usize,
}

#[tracing::instrument(name = "Gym class index page", skip_all)]
async fn index(State(state): State<AppState>) -> Result<Response, PageError> {
    let classes = state.gym_class_store.read().await.list_classes().await?;

    let template = IndexTemplate {
        classes: classes.iter().map(GymClassView::from).collect(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Gym class details page", skip_all)]
async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let class_id = GymClassId::new(id);
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

    let template = DetailsTemplate {
        gym_class: GymClassView::from(&gym_class),
        members: member_links(&members),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Gym class create form", skip_all)]
async fn create_form() -> Result<Response, PageError> {
    let template = FormTemplate {
        heading: "Create",
        action: "/GymClass/Create".to_owned(),
        form: GymClassForm::default(),
        error: String::new(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Gym class create", skip_all)]
async fn create(
    State(state): State<AppState>,
    Form(form): Form<GymClassForm>,
) -> Result<Response, PageError> {
    let outcome = match ClassName::parse(&form.class_name) {
        Ok(class_name) => state
            .gym_class_store
            .write()
            .await
            .add_class(class_name)
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
                action: "/GymClass/Create".to_owned(),
                form,
                error,
            };
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Gym class edit form", skip_all)]
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let gym_class = state
        .gym_class_store
        .read()
        .await
        .get_class(&GymClassId::new(id))
        .await?;

    let template = FormTemplate {
        heading: "Edit",
        action: format!("/GymClass/Edit/{id}"),
        form: GymClassForm {
            class_name: gym_class.class_name.as_ref().to_owned(),
        },
        error: String::new(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Gym class edit", skip_all)]
async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GymClassForm>,
) -> Result<Response, PageError> {
    let outcome = match ClassName::parse(&form.class_name) {
        Ok(class_name) => state
            .gym_class_store
            .write()
            .await
            .update_class(&GymClass::new(GymClassId::new(id), class_name))
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
                action: format!("/GymClass/Edit/{id}"),
                form,
                error,
            };
            render(status, &template)
        }
    }
}

#[tracing::instrument(name = "Gym class delete confirmation", skip_all)]
async fn delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let class_id = GymClassId::new(id);
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

    let template = DeleteTemplate {
        gym_class: GymClassView::from(&gym_class),
        member_count: members.len(),
    };
    render(StatusCode::OK, &template)
}

#[tracing::instrument(name = "Gym class delete", skip_all)]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    state
        .gym_class_store
        .write()
        .await
        .delete_class(&GymClassId::new(id))
        .await?;

    Ok(Redirect::to(INDEX).into_response())
}
