//! HTTP-level integration tests for the detection endpoints, driving the
//! full pipeline (multipart upload, decode, stub detector, persistence).

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_multipart, put_json};
use sqlx::SqlitePool;

fn png_frame() -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(320, 240)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

async fn create_inspection(pool: &SqlitePool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/inspection",
            serde_json::json!({"inspector_id": "inspector-1", "animal_id": "cow-1"}),
        )
        .await,
    )
    .await;
    created["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Frame processing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_persists_stub_detection(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;
    let frame = png_frame();

    let app = common::build_test_app(pool.clone());
    let response = post_multipart(
        app,
        &format!("/api/detection/process?inspection_id={inspection_id}"),
        &[("file", frame.as_slice())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["inspection_id"].as_i64().unwrap(), inspection_id);
    assert_eq!(arr[0]["lesion_type"], "sample_lesion");
    assert_eq!(arr[0]["confidence_score"].as_f64().unwrap(), 0.85);
    assert_eq!(
        arr[0]["location_data"],
        serde_json::json!({"x": 100, "y": 100, "width": 50, "height": 50})
    );
    assert_eq!(arr[0]["verified"], false);
    assert!(arr[0]["verified_by"].is_null());

    // The detection is persisted and listable.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/detection/inspection/{inspection_id}")).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_missing_file_part_returns_400(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_multipart(
        app,
        &format!("/api/detection/process?inspection_id={inspection_id}"),
        &[("settings", b"{}".as_slice())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_unknown_inspection_returns_404(pool: SqlitePool) {
    let frame = png_frame();

    let app = common::build_test_app(pool);
    let response = post_multipart(
        app,
        "/api/detection/process?inspection_id=999999",
        &[("file", frame.as_slice())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_rejects_undecodable_image(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_multipart(
        app,
        &format!("/api/detection/process?inspection_id={inspection_id}"),
        &[("file", b"definitely not an image".as_slice())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_IMAGE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_settings_filter_out_low_confidence(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;
    let frame = png_frame();

    // Threshold above the stub's fixed 0.85 confidence.
    let app = common::build_test_app(pool.clone());
    let response = post_multipart(
        app,
        &format!("/api/detection/process?inspection_id={inspection_id}"),
        &[
            ("file", frame.as_slice()),
            ("settings", br#"{"confidence_threshold": 0.9}"#.as_slice()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());

    // Nothing was persisted either.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/detection/inspection/{inspection_id}")).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_rejects_malformed_settings(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;
    let frame = png_frame();

    let app = common::build_test_app(pool);
    let response = post_multipart(
        app,
        &format!("/api/detection/process?inspection_id={inspection_id}"),
        &[
            ("file", frame.as_slice()),
            ("settings", b"not json".as_slice()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Verification and deletion
// ---------------------------------------------------------------------------

async fn process_one(pool: &SqlitePool, inspection_id: i64) -> i64 {
    let frame = png_frame();
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_multipart(
            app,
            &format!("/api/detection/process?inspection_id={inspection_id}"),
            &[("file", frame.as_slice())],
        )
        .await,
    )
    .await;
    json[0]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_detection(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;
    let detection_id = process_one(&pool, inspection_id).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/detection/{detection_id}"),
        serde_json::json!({"verified": true, "verified_by": "vet-1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["verified"], true);
    assert_eq!(json["verified_by"], "vet-1");

    // Clearing verification also clears the verifier.
    let app = common::build_test_app(pool);
    let json = body_json(
        put_json(
            app,
            &format!("/api/detection/{detection_id}"),
            serde_json::json!({"verified": false}),
        )
        .await,
    )
    .await;
    assert_eq!(json["verified"], false);
    assert!(json["verified_by"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_nonexistent_detection_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/detection/999999",
        serde_json::json!({"verified": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_detection_returns_204(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;
    let detection_id = process_one(&pool, inspection_id).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/detection/{detection_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/detection/{detection_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/detection/inspection/{inspection_id}")).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_detections_empty_for_fresh_inspection(pool: SqlitePool) {
    let inspection_id = create_inspection(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/detection/inspection/{inspection_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}
