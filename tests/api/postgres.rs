//! Runs against a real database. Needs `DATABASE_URL` pointing at a Postgres
//! server the tests may create and drop databases on.
use crate::helpers::{
    add_class, add_member, add_trainer, class_ids_of, get_error_message,
    get_json_response_body, get_member, PostgresTestApp,
};
use reqwest::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore]
async fn should_persist_members_with_enrollments(ctx: &mut PostgresTestApp) {
    let app = &ctx.app;
    let alice = add_trainer(app, "Alice").await;
    let yoga = add_class(app, "Yoga").await;
    let spin = add_class(app, "Spin").await;
    let bob = add_member(app, "Bob", Some(alice), &[spin, yoga, spin]).await;

    let member = get_member(app, bob).await;
    assert_eq!(member["trainerId"], alice);
    assert_eq!(class_ids_of(&member), vec![yoga as i64, spin as i64]);

    let response = app.get_with_search("/api/TrainerApi", "ALI").await;
    let body = get_json_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore]
async fn should_map_foreign_key_violations_to_409(ctx: &mut PostgresTestApp) {
    let app = &ctx.app;
    let yoga = add_class(app, "Yoga").await;
    let bob = add_member(app, "Bob", None, &[yoga]).await;

    let response = app
        .post_json("/api/MemberApi", &json!({ "fullName": "Carol", "trainerId": 77 }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        get_error_message(response).await,
        "Referenced trainer does not exist"
    );

    let response = app
        .put_json(
            &format!("/api/MemberApi/{bob}"),
            &json!({ "fullName": "Bobby", "gymClassIds": [yoga, 77] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        get_error_message(response).await,
        "Referenced gym class does not exist"
    );

    let member = get_member(app, bob).await;
    assert_eq!(member["fullName"], "Bob", "Failed update should roll back");
    assert_eq!(class_ids_of(&member), vec![yoga as i64]);
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore]
async fn should_cascade_deletes(ctx: &mut PostgresTestApp) {
    let app = &ctx.app;
    let alice = add_trainer(app, "Alice").await;
    let yoga = add_class(app, "Yoga").await;
    let spin = add_class(app, "Spin").await;
    let bob = add_member(app, "Bob", Some(alice), &[yoga, spin]).await;

    let response = app.delete(&format!("/api/GymClassApi/{yoga}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.delete(&format!("/api/TrainerApi/{alice}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let member = get_member(app, bob).await;
    assert!(member["trainerId"].is_null());
    assert_eq!(class_ids_of(&member), vec![spin as i64]);

    let response = app.delete(&format!("/api/MemberApi/{bob}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.get(&format!("/api/GymClassApi/{spin}")).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body["members"], json!([]));

    let response = app.delete(&format!("/api/MemberApi/{bob}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
