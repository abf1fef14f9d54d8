use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> Router {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/jobboard_test");
    env::set_var("JWT_SECRET", "test_secret_key");
    let _ = jobboard_backend::config::init_config();

    let state = jobboard_backend::AppState::new(
        jobboard_backend::store::Store::in_memory(),
        jobboard_backend::utils::uploads::BlobStore::new("./target/test-uploads"),
    );
    jobboard_backend::app(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, name: &str, email: &str, role: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": name,
                "email": email,
                "password": "password123",
                "role": role,
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("register sets the auth cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn create_job(app: &Router, cookie: &str, title: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/jobs",
        Some(cookie),
        Some(json!({
            "title": title,
            "description": "We are looking for a systems engineer.",
            "location": "Berlin",
            "work_mode": "hybrid",
            "employment_type": "full-time",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn apply(app: &Router, cookie: &str, job_id: &str) -> (StatusCode, JsonValue) {
    let uri = format!("/api/jobs/{}/applications", job_id);
    request(app, "POST", &uri, Some(cookie), None).await
}

#[tokio::test]
async fn second_apply_conflicts_and_creates_no_record() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.dup@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.dup@example.com", "company").await;
    let job = create_job(&app, &acme, "Engineer").await;

    let (status, body) = apply(&app, &alice, &job).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "applied");

    let (status, _) = apply(&app, &alice, &job).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let list_uri = format!("/api/jobs/{}/applications", job);
    let (_, applicants) = request(&app, "GET", &list_uri, Some(&acme), None).await;
    assert_eq!(applicants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn applying_to_missing_or_closed_jobs_is_not_found() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.closed2@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.closed2@example.com", "company").await;

    let (status, _) = apply(&app, &alice, &Uuid::new_v4().to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let job = create_job(&app, &acme, "Closing Soon").await;
    let close_uri = format!("/api/jobs/{}/close", job);
    request(&app, "PATCH", &close_uri, Some(&acme), None).await;

    let (status, _) = apply(&app, &alice, &job).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn apply_is_applicant_only() {
    let app = test_app();
    let acme = register(&app, "Acme", "acme.selfapply@example.com", "company").await;
    let job = create_job(&app, &acme, "Engineer").await;

    let (status, _) = apply(&app, &acme, &job).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn my_applications_join_job_and_company_newest_first() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.myapps@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.myapps@example.com", "company").await;

    let first = create_job(&app, &acme, "First Role").await;
    let second = create_job(&app, &acme, "Second Role").await;
    apply(&app, &alice, &first).await;
    apply(&app, &alice, &second).await;

    let (status, body) = request(&app, "GET", "/api/applications/me", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["job"]["title"], "Second Role");
    assert_eq!(items[1]["job"]["title"], "First Role");
    assert_eq!(items[0]["company"]["name"], "Acme");
    assert_eq!(items[0]["status"], "applied");

    // Company side of the same route family is off limits.
    let (status, _) = request(&app, "GET", "/api/applications/me", Some(&acme), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn applications_for_a_job_are_owner_only() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.forjob@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.forjob@example.com", "company").await;
    let other = register(&app, "Other", "other.forjob@example.com", "company").await;

    let job = create_job(&app, &acme, "Watched Role").await;
    apply(&app, &alice, &job).await;

    let uri = format!("/api/jobs/{}/applications", job);
    let (status, body) = request(&app, "GET", &uri, Some(&acme), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["applicant"]["name"], "Alice");
    assert_eq!(items[0]["applicant"]["email"], "alice.forjob@example.com");
    assert_eq!(items[0]["job"]["title"], "Watched Role");

    let (status, _) = request(&app, "GET", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let missing = format!("/api/jobs/{}/applications", Uuid::new_v4());
    let (status, _) = request(&app, "GET", &missing, Some(&acme), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recruiter_view_spans_all_owned_jobs() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.recr@example.com", "applicant").await;
    let bob = register(&app, "Bob", "bob.recr@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.recr@example.com", "company").await;
    let other = register(&app, "Other", "other.recr@example.com", "company").await;

    let first = create_job(&app, &acme, "Role A").await;
    let second = create_job(&app, &acme, "Role B").await;
    let foreign = create_job(&app, &other, "Role C").await;

    apply(&app, &alice, &first).await;
    apply(&app, &bob, &second).await;
    apply(&app, &alice, &foreign).await;

    let (status, body) = request(
        &app,
        "GET",
        "/api/applications/recruiter",
        Some(&acme),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Newest first across jobs.
    assert_eq!(items[0]["job"]["title"], "Role B");
    assert_eq!(items[1]["job"]["title"], "Role A");
}

#[tokio::test]
async fn status_updates_are_owner_only_and_enum_checked() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.status@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.status@example.com", "company").await;
    let other = register(&app, "Other", "other.status@example.com", "company").await;

    let job = create_job(&app, &acme, "Tracked Role").await;
    let (_, application) = apply(&app, &alice, &job).await;
    let uri = format!("/api/applications/{}", application["id"].as_str().unwrap());

    // The owning company moves the application straight to selected.
    let (status, body) = request(
        &app,
        "PATCH",
        &uri,
        Some(&acme),
        Some(json!({"status": "selected"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "selected");

    // A different company is refused on the same application.
    let (status, _) = request(
        &app,
        "PATCH",
        &uri,
        Some(&other),
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Applicants never change statuses.
    let (status, _) = request(
        &app,
        "PATCH",
        &uri,
        Some(&alice),
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Out-of-enum values are a validation failure.
    let (status, _) = request(
        &app,
        "PATCH",
        &uri,
        Some(&acme),
        Some(json!({"status": "hired"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Permissive lifecycle: jumping back to applied is allowed for the owner.
    let (status, body) = request(
        &app,
        "PATCH",
        &uri,
        Some(&acme),
        Some(json!({"status": "applied"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");

    let missing = format!("/api/applications/{}", Uuid::new_v4());
    let (status, _) = request(
        &app,
        "PATCH",
        &missing,
        Some(&acme),
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_job_takes_its_applications_with_it() {
    let app = test_app();
    let alice = register(&app, "Alice", "alice.cascade@example.com", "applicant").await;
    let acme = register(&app, "Acme", "acme.cascade@example.com", "company").await;

    let job = create_job(&app, &acme, "Vanishing Role").await;
    apply(&app, &alice, &job).await;

    let job_uri = format!("/api/jobs/{}", job);
    let (status, _) = request(&app, "DELETE", &job_uri, Some(&acme), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = request(&app, "GET", "/api/applications/me", Some(&alice), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 0);

    let (_, recruiter) = request(
        &app,
        "GET",
        "/api/applications/recruiter",
        Some(&acme),
        None,
    )
    .await;
    assert_eq!(recruiter.as_array().unwrap().len(), 0);
}
