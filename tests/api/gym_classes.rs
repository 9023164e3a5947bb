use crate::helpers::{
    add_class, add_member, class_ids_of, get_error_message,
    get_json_response_body, get_member, TestApp,
};
use reqwest::{header, StatusCode};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_class(app: &mut TestApp) {
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "integer", "minimum": 1 },
        "className": { "type": "string", "minLength": 1, "maxLength": 255 }
      },
      "required": ["id", "className"]
    });

    let response = app
        .post_json("/api/GymClassApi", &json!({ "className": " Yoga " }))
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
    assert_eq!(body["className"], "Yoga");
    assert_eq!(location, format!("/api/GymClassApi/{}", body["id"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let long_name = "x".repeat(256);
    let test_cases = [
        (
            json!({ "className": "" }),
            "Validation error: Class name cannot be empty",
        ),
        (json!({}), "Validation error: Class name cannot be empty"),
        (
            json!({ "className": long_name }),
            "Validation error: Max class name length is 255 characters",
        ),
    ];

    for (body, expected) in test_cases.iter() {
        let response = app.post_json("/api/GymClassApi", body).await;
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
        json!({ "className": ["Yoga"] }),
        json!({ "className": 7 }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_json("/api/GymClassApi", test_case).await;
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
async fn should_list_classes_in_id_order(app: &mut TestApp) {
    let spin = add_class(app, "Spin").await;
    let boxing = add_class(app, "Boxing").await;

    let response = app.get("/api/GymClassApi").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_json_response_body(response).await;
    assert_eq!(
        body,
        json!([
            { "id": spin, "className": "Spin" },
            { "id": boxing, "className": "Boxing" }
        ])
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_update_class(app: &mut TestApp) {
    let class_id = add_class(app, "Spin").await;

    let response = app
        .put_json(
            &format!("/api/GymClassApi/{class_id}"),
            &json!({ "className": "Spin Advanced" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/GymClassApi/{class_id}")).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body["className"], "Spin Advanced");

    let response = app
        .put_json("/api/GymClassApi/999", &json!({ "className": "Nope" }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get_error_message(response).await,
        "Resource with ID not found: 999"
    );

    let response = app
        .put_json(&format!("/api/GymClassApi/{class_id}"), &json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        get_error_message(response).await,
        "Validation error: Class name cannot be empty"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_class_and_its_enrollments_only(app: &mut TestApp) {
    let yoga = add_class(app, "Yoga").await;
    let spin = add_class(app, "Spin").await;
    let carol = add_member(app, "Carol", None, &[yoga, spin]).await;
    let dave = add_member(app, "Dave", None, &[yoga]).await;
    let erin = add_member(app, "Erin", None, &[spin]).await;
    let frank = add_member(app, "Frank", None, &[]).await;

    let response = app.get(&format!("/api/GymClassApi/{yoga}")).await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body["members"],
        json!([
            { "id": carol, "fullName": "Carol" },
            { "id": dave, "fullName": "Dave" }
        ])
    );

    let response = app.delete(&format!("/api/GymClassApi/{yoga}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/GymClassApi/{yoga}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(class_ids_of(&get_member(app, carol).await), vec![spin as i64]);
    assert!(class_ids_of(&get_member(app, dave).await).is_empty());
    assert_eq!(class_ids_of(&get_member(app, erin).await), vec![spin as i64]);
    assert!(class_ids_of(&get_member(app, frank).await).is_empty());

    let response = app.get("/api/MemberApi").await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.as_array().unwrap().len(),
        4,
        "Deleting a class should not delete members"
    );

    let response = app.delete(&format!("/api/GymClassApi/{yoga}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
