use crate::helpers::{
    add_member, add_trainer, get_error_message, get_json_response_body,
    get_member, TestApp,
};
use reqwest::{header, StatusCode};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_trainer(app: &mut TestApp) {
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "integer", "minimum": 1 },
        "name": { "type": "string", "minLength": 1, "maxLength": 255 },
        "email": { "type": ["string", "null"] },
        "phoneNumber": { "type": ["string", "null"] }
      },
      "required": ["id", "name", "email", "phoneNumber"]
    });

    let response = app
        .post_json(
            "/api/TrainerApi",
            &json!({
                "name": "  Alice Smith ",
                "email": "alice@example.com",
                "phoneNumber": "+44 (0)1632 960000"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("No Location header")
        .to_str()
        .unwrap()
        .to_owned();

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema: {body}"
    );
    assert_eq!(body["name"], "Alice Smith", "Name should be trimmed");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(location, format!("/api/TrainerApi/{}", body["id"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_store_blank_contact_details_as_null(app: &mut TestApp) {
    let response = app
        .post_json(
            "/api/TrainerApi",
            &json!({ "name": "Bob", "email": "  ", "phoneNumber": "" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = get_json_response_body(response).await;
    assert!(body["email"].is_null());
    assert!(body["phoneNumber"].is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let long_name = "a".repeat(256);
    let test_cases = [
        (json!({ "name": "" }), "Validation error: Name cannot be empty"),
        (json!({}), "Validation error: Name cannot be empty"),
        (
            json!({ "email": "alice@example.com" }),
            "Validation error: Name cannot be empty",
        ),
        (json!({ "name": "   " }), "Validation error: Name cannot be empty"),
        (
            json!({ "name": long_name }),
            "Validation error: Max name length is 255 characters",
        ),
        (
            json!({ "name": "Alice", "email": "not-an-email" }),
            "Validation error: Invalid email address: not-an-email",
        ),
        (
            json!({ "name": "Alice", "phoneNumber": "call me" }),
            "Validation error: Invalid phone number: call me",
        ),
    ];

    for (body, expected) in test_cases.iter() {
        let response = app.post_json("/api/TrainerApi", body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Failed for input: {body}"
        );
        assert_eq!(get_error_message(response).await, *expected);
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_request(app: &mut TestApp) {
    let test_cases = [
        json!({ "name": 42 }),
        json!({ "name": "Alice", "phoneNumber": ["555"] }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_json("/api/TrainerApi", test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_trainers_in_id_order(app: &mut TestApp) {
    let names = ["Zoe", "Adam", "Maria"];
    for name in names.iter() {
        add_trainer(app, name).await;
    }

    let response = app.get("/api/TrainerApi").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_json_response_body(response).await;
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, names);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_trainers_by_name_ignoring_case(app: &mut TestApp) {
    add_trainer(app, "Alice Smith").await;
    add_trainer(app, "Bob Jones").await;
    add_trainer(app, "Malice Cooper").await;

    let response = app.get_with_search("/api/TrainerApi", "ALICE").await;
    let body = get_json_response_body(response).await;
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, ["Alice Smith", "Malice Cooper"]);

    let response = app.get_with_search("/api/TrainerApi", "   ").await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.as_array().unwrap().len(),
        3,
        "Blank search should list everything"
    );

    let response = app.get_with_search("/api/TrainerApi", "nobody").await;
    let body = get_json_response_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_trainer_with_members(app: &mut TestApp) {
    let trainer_id = add_trainer(app, "Alice").await;
    let other_trainer_id = add_trainer(app, "Bob").await;
    let carol = add_member(app, "Carol", Some(trainer_id), &[]).await;
    add_member(app, "Dave", Some(other_trainer_id), &[]).await;
    let erin = add_member(app, "Erin", Some(trainer_id), &[]).await;

    let response = app.get(&format!("/api/TrainerApi/{trainer_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_json_response_body(response).await;
    assert_eq!(body["name"], "Alice");
    assert_eq!(
        body["members"],
        json!([
            { "id": carol, "fullName": "Carol" },
            { "id": erin, "fullName": "Erin" }
        ])
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_trainer(app: &mut TestApp) {
    let response = app.get("/api/TrainerApi/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get_error_message(response).await,
        "Resource with ID not found: 999"
    );

    let response = app
        .put_json("/api/TrainerApi/999", &json!({ "name": "Nobody" }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete("/api/TrainerApi/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_update_trainer(app: &mut TestApp) {
    let trainer_id = add_trainer(app, "Alice").await;

    let response = app
        .put_json(
            &format!("/api/TrainerApi/{trainer_id}"),
            &json!({ "name": "Alice Cooper", "email": "alice@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/TrainerApi/{trainer_id}")).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body["name"], "Alice Cooper");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["phoneNumber"].is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_invalid_update_without_changes(app: &mut TestApp) {
    let trainer_id = add_trainer(app, "Alice").await;

    let response = app
        .put_json(&format!("/api/TrainerApi/{trainer_id}"), &json!({ "name": "" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get(&format!("/api/TrainerApi/{trainer_id}")).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body["name"], "Alice");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_trainer_and_unassign_members(app: &mut TestApp) {
    let trainer_id = add_trainer(app, "Alice").await;
    let member_id = add_member(app, "Carol", Some(trainer_id), &[]).await;

    let response = app.delete(&format!("/api/TrainerApi/{trainer_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/TrainerApi/{trainer_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let member = get_member(app, member_id).await;
    assert!(
        member["trainerId"].is_null(),
        "Member should survive without a trainer: {member}"
    );

    let response = app.delete(&format!("/api/TrainerApi/{trainer_id}")).await;
    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Deleting twice should fail"
    );
}
