use gym_manager::{
    app_state::AppState,
    get_postgres_pool,
    utils::constants::{test, DATABASE_URL},
    Application,
};
use reqwest::{redirect::Policy, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection, PgPoolOptions},
    Connection, Executor, PgPool,
};
use std::str::FromStr;
use test_context::AsyncTestContext;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub app_state: AppState,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_state(AppState::in_memory()).await
    }

    pub async fn with_state(app_state: AppState) -> Self {
        let app = Application::build(app_state.clone(), test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        // Page handlers answer with 303; tests inspect the redirect itself.
        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            app_state,
            http_client,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_with_search(&self, path: &str, search: &str) -> Response {
        self.http_client
            .get(format!("{}{}", &self.address, path))
            .query(&[("searchString", search)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json<Body>(&self, path: &str, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json<Body>(&self, path: &str, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.http_client
            .delete(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.http_client
            .post(format!("{}{}", &self.address, path))
            .form(fields)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

/// Same application backed by a throwaway Postgres database.
pub struct PostgresTestApp {
    pub app: TestApp,
    pub tmp_db_name: String,
}

impl AsyncTestContext for PostgresTestApp {
    async fn setup() -> PostgresTestApp {
        let tmp_db_name = Uuid::new_v4().to_string();
        let pg_pool = configure_postgresql(&tmp_db_name).await;
        let app = TestApp::with_state(AppState::postgres(pg_pool)).await;

        PostgresTestApp { app, tmp_db_name }
    }

    async fn teardown(self) {
        delete_database(&self.tmp_db_name).await;
    }
}

async fn configure_postgresql(db_name: &str) -> PgPool {
    let postgresql_conn_url = DATABASE_URL.to_owned();

    configure_database(&postgresql_conn_url, db_name).await;

    let postgresql_conn_url_with_db = Secret::new(format!(
        "{}/{}",
        postgresql_conn_url.expose_secret(),
        db_name
    ));

    get_postgres_pool(&postgresql_conn_url_with_db)
        .await
        .expect("Failed to create Postgres connection pool!")
}

async fn configure_database(db_conn_string: &Secret<String>, db_name: &str) {
    let connection = PgPoolOptions::new()
        .connect(db_conn_string.expose_secret())
        .await
        .expect("Failed to create Postgres connection pool.");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    let db_conn_string =
        format!("{}/{}", db_conn_string.expose_secret(), db_name);

    let connection = PgPoolOptions::new()
        .connect(&db_conn_string)
        .await
        .expect("Failed to create Postgres connection pool.");

    sqlx::migrate!()
        .run(&connection)
        .await
        .expect("Failed to migrate the database");
}

async fn delete_database(db_name: &str) {
    let postgresql_conn_url: String = DATABASE_URL.expose_secret().to_owned();

    let connection_options = PgConnectOptions::from_str(&postgresql_conn_url)
        .expect("Failed to parse PostgreSQL connection string");

    let mut connection = PgConnection::connect_with(&connection_options)
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(
            format!(
                r#"
                SELECT pg_terminate_backend(pg_stat_activity.pid)
                FROM pg_stat_activity
                WHERE pg_stat_activity.datname = '{}'
                  AND pid <> pg_backend_pid();
        "#,
                db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to drop the database.");

    connection
        .execute(format!(r#"DROP DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

pub async fn get_error_message(response: Response) -> String {
    let body = get_json_response_body(response).await;
    body.get("error")
        .expect("No error field in response")
        .as_str()
        .expect("Error field is not a string")
        .to_owned()
}

fn read_id(body: &Value) -> i32 {
    body.get("id")
        .expect("No ID in response")
        .as_i64()
        .expect("ID is not an integer") as i32
}

pub async fn add_trainer(app: &TestApp, name: &str) -> i32 {
    let response = app
        .post_json("/api/TrainerApi", &serde_json::json!({ "name": name }))
        .await;

    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "Failed to add trainer with name: {name}"
    );
    read_id(&get_json_response_body(response).await)
}

pub async fn add_class(app: &TestApp, class_name: &str) -> i32 {
    let response = app
        .post_json(
            "/api/GymClassApi",
            &serde_json::json!({ "className": class_name }),
        )
        .await;

    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "Failed to add class with name: {class_name}"
    );
    read_id(&get_json_response_body(response).await)
}

pub async fn add_member(
    app: &TestApp,
    full_name: &str,
    trainer_id: Option<i32>,
    class_ids: &[i32],
) -> i32 {
    let response = app
        .post_json(
            "/api/MemberApi",
            &serde_json::json!({
                "fullName": full_name,
                "trainerId": trainer_id,
                "gymClassIds": class_ids
            }),
        )
        .await;

    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "Failed to add member with name: {full_name}"
    );
    read_id(&get_json_response_body(response).await)
}

pub async fn get_member(app: &TestApp, id: i32) -> Value {
    let response = app.get(&format!("/api/MemberApi/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK, "Member {id} not found");
    get_json_response_body(response).await
}

pub fn class_ids_of(member: &Value) -> Vec<i64> {
    member
        .get("gymClassIds")
        .expect("No gymClassIds in member")
        .as_array()
        .expect("gymClassIds is not an array")
        .iter()
        .map(|id| id.as_i64().expect("class id is not an integer"))
        .collect()
}
