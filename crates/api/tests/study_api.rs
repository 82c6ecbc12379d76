//! HTTP tests for courses, subjects, templates, sessions, exams, and stats.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn seed_course(app: &Router, name: &str) -> i64 {
    let response = post_json(app.clone(), "/api/v1/courses", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn seed_subject(app: &Router, name: &str, course_id: i64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/subjects",
        json!({ "name": name, "course_id": course_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Courses & subjects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn courses_list_with_subjects(pool: PgPool) {
    let app = common::build_test_app(pool);
    let course_id = seed_course(&app, "Science").await;
    seed_subject(&app, "Physics", course_id).await;

    let json = body_json(get(app, "/api/v1/courses").await).await;
    assert_eq!(json["data"][0]["name"], "Science");
    assert_eq!(json["data"][0]["subjects"][0]["name"], "Physics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_course_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/courses", json!({ "name": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_requires_course(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/subjects", json!({ "name": "Physics" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Course is mandatory");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_with_unknown_course_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/subjects",
        json!({ "name": "Physics", "course_id": 9999 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_REFERENCE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_subject_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let course_id = seed_course(&app, "Science").await;
    seed_subject(&app, "Physics", course_id).await;

    let response = post_json(
        app,
        "/api/v1/subjects",
        json!({ "name": "Physics", "course_id": course_id }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_color_defaults_and_validates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let course_id = seed_course(&app, "Science").await;
    let subject_id = seed_subject(&app, "Physics", course_id).await;

    let json = body_json(get(app.clone(), "/api/v1/subjects").await).await;
    assert_eq!(json["data"][0]["color"], "#4f46e5");
    assert_eq!(json["data"][0]["course"]["id"], course_id);

    let response = put_json(
        app.clone(),
        &format!("/api/v1/subjects/{subject_id}"),
        json!({ "name": "Physics", "course_id": course_id, "color": "blue" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app,
        &format!("/api/v1/subjects/{subject_id}"),
        json!({ "name": "Physics I", "course_id": course_id, "color": "#10b981" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Physics I");
    assert_eq!(json["data"]["color"], "#10b981");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_records_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in [
        "/api/v1/courses/9999",
        "/api/v1/subjects/9999",
        "/api/v1/templates/9999",
        "/api/v1/sessions/9999",
        "/api/v1/exams/9999",
    ] {
        let response = delete(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_items_are_required(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/templates", json!({ "name": "Basics" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Template items are required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_items_keep_their_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/templates",
        json!({ "name": "Basics", "description": "Default flow", "items": ["Read", "Summarize", "Quiz"] }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let json = body_json(get(app.clone(), &format!("/api/v1/templates/{id}")).await).await;
    let items = json["data"]["items"].as_array().unwrap();
    let pairs: Vec<(&str, i64)> = items
        .iter()
        .map(|i| (i["text"].as_str().unwrap(), i["order"].as_i64().unwrap()))
        .collect();
    assert_eq!(pairs, [("Read", 0), ("Summarize", 1), ("Quiz", 2)]);

    let list = body_json(get(app, "/api/v1/templates").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Sessions, exams, stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cannot_end_before_it_starts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let course_id = seed_course(&app, "Science").await;
    let subject_id = seed_subject(&app, "Physics", course_id).await;

    let response = post_json(
        app,
        "/api/v1/sessions",
        json!({
            "subject_id": subject_id,
            "topic": "Vectors",
            "start_time": "2026-02-01T10:00:00Z",
            "end_time": "2026-02-01T09:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exam_reports_percentage(pool: PgPool) {
    let app = common::build_test_app(pool);
    let course_id = seed_course(&app, "Science").await;
    let subject_id = seed_subject(&app, "Physics", course_id).await;

    let response = post_json(
        app.clone(),
        "/api/v1/exams",
        json!({ "subject_id": subject_id, "score": 0, "max_score": 0, "date": "2026-01-21" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/exams",
        json!({ "subject_id": subject_id, "score": 17, "max_score": 20, "date": "2026-01-21" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app, "/api/v1/exams").await).await;
    assert_eq!(json["data"][0]["percentage"], 85.0);
    assert_eq!(json["data"][0]["subject"]["name"], "Physics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_summary_and_progress(pool: PgPool) {
    let app = common::build_test_app(pool);

    let empty = body_json(get(app.clone(), "/api/v1/stats/summary").await).await;
    assert_eq!(
        empty["data"],
        json!({ "total_sessions": 0, "total_hours": 0.0, "average_score": 0.0 })
    );

    let course_id = seed_course(&app, "Science").await;
    let subject_id = seed_subject(&app, "Physics", course_id).await;

    for (start, end) in [
        ("2026-02-01T09:00:00Z", "2026-02-01T10:30:00Z"),
        ("2026-02-02T09:00:00Z", "2026-02-02T09:45:00Z"),
    ] {
        let response = post_json(
            app.clone(),
            "/api/v1/sessions",
            json!({ "subject_id": subject_id, "topic": "Vectors", "start_time": start, "end_time": end }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    for score in [70, 90] {
        post_json(
            app.clone(),
            "/api/v1/exams",
            json!({ "subject_id": subject_id, "score": score, "max_score": 100, "date": "2026-02-03" }),
        )
        .await;
    }
    for date in ["2000-01-01", "2999-01-01"] {
        post_json(
            app.clone(),
            "/api/v1/lessons",
            json!({ "title": "Lesson", "subject_id": subject_id, "planned_date": date }),
        )
        .await;
    }

    let summary = body_json(get(app.clone(), "/api/v1/stats/summary").await).await;
    assert_eq!(summary["data"]["total_sessions"], 2);
    assert_eq!(summary["data"]["total_hours"], 2.3);
    assert_eq!(summary["data"]["average_score"], 80.0);

    let progress = body_json(get(app, "/api/v1/stats/progress").await).await;
    assert_eq!(progress["data"]["overdue_lessons"], 1);
}
