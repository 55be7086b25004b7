mod common;

use axum::http::StatusCode;
use common::{
    create_test_user, generate_unique_email, get_request, json_request, read_json, setup_test_app,
    sign_in, user_payload,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request("POST", "/users", &user_payload(&email), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["firstName"], "Joe");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["isAdmin"], false);
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_stores_hashed_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    app.oneshot(json_request("POST", "/users", &user_payload(&email), None))
        .await
        .unwrap();

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "password1234");
    assert!(stored.starts_with("$2"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_lowercases_email(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/users",
            &user_payload("Joe.Doe@Wolox.com.ar"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["email"], "joe.doe@wolox.com.ar");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let email = generate_unique_email();

    let first = setup_test_app(pool.clone())
        .oneshot(json_request("POST", "/users", &user_payload(&email), None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = setup_test_app(pool.clone())
        .oneshot(json_request("POST", "/users", &user_payload(&email), None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = read_json(second).await;
    assert_eq!(
        body["message"],
        format!("E-mail '{}' already registered", email)
    );
    assert_eq!(body["internal_code"], "already_exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_without_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let payload = json!({
        "firstName": "firstName",
        "lastName": "lastName",
        "username": "username",
        "email": "user@wolox.com.ar"
    });

    let response = app
        .oneshot(json_request("POST", "/users", &payload, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["internal_code"], "validation_error");
    assert_eq!(body["message"][0]["message"], "\"password\" is required");
    assert_eq!(body["message"][0]["path"], json!(["password"]));
    assert_eq!(body["message"][0]["type"], "any.required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_with_foreign_domain(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request("POST", "/users", &user_payload("user@gmail.com"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["message"][0]["message"],
        "\"email\" with value \"user@gmail.com\" fails to match the Wolox e-mail pattern"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_with_short_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let mut payload = user_payload("user@wolox.com.ar");
    payload["password"] = json!("pass12");

    let response = app
        .oneshot(json_request("POST", "/users", &payload, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["message"][0]["message"],
        "\"password\" length must be at least 8 characters long"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_collects_one_violation_per_field(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let payload = json!({ "email": "not-an-email", "password": "short" });

    let response = app
        .oneshot(json_request("POST", "/users", &payload, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    let paths: Vec<&str> = body["message"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["path"][0].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["firstName", "lastName", "email", "password"]);
    assert_eq!(
        body["message"][2]["message"],
        "\"email\" must be a valid email"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_with_session(pool: PgPool) {
    let caller = create_test_user(&pool, &generate_unique_email(), false).await;
    for _ in 0..3 {
        create_test_user(&pool, &generate_unique_email(), false).await;
    }

    let token = sign_in(setup_test_app(pool.clone()), &caller.email, &caller.password).await;

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users?limit=2&offset=1", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 4);
    assert_eq!(body["meta"]["limit"], 2);
    assert_eq!(body["meta"]["offset"], 1);
    assert_eq!(body["meta"]["has_more"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_page_based(pool: PgPool) {
    let caller = create_test_user(&pool, &generate_unique_email(), false).await;
    for _ in 0..4 {
        create_test_user(&pool, &generate_unique_email(), false).await;
    }

    let token = sign_in(setup_test_app(pool.clone()), &caller.email, &caller.password).await;

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users?limit=2&page=3", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["page"], 3);
    assert!(body["meta"].get("offset").is_none());
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_rejects_bad_limit(pool: PgPool) {
    let caller = create_test_user(&pool, &generate_unique_email(), false).await;
    let token = sign_in(setup_test_app(pool.clone()), &caller.email, &caller.password).await;

    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users?limit=0", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["internal_code"], "validation_error");
    assert_eq!(body["message"][0]["path"], json!(["limit"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_rejects_out_of_range_page_and_offset(pool: PgPool) {
    let caller = create_test_user(&pool, &generate_unique_email(), false).await;
    let token = sign_in(setup_test_app(pool.clone()), &caller.email, &caller.password).await;

    for (query, field) in [
        ("/users?page=9223372036854775807", "page"),
        ("/users?offset=9223372036854775807", "offset"),
    ] {
        let response = setup_test_app(pool.clone())
            .oneshot(get_request(query, Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        let body = read_json(response).await;
        assert_eq!(body["internal_code"], "validation_error");
        assert_eq!(body["message"][0]["path"], json!([field]));
        assert_eq!(body["message"][0]["type"], "number.max");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_without_session(pool: PgPool) {
    let response = setup_test_app(pool.clone())
        .oneshot(get_request("/users", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["internal_code"], "unauthorized");
}
