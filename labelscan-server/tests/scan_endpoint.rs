//! HTTP contract tests for the scan service.

use std::io::Cursor;

use axum::http::StatusCode;
use axum_test::TestServer;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GrayImage, Luma};
use labelscan_server::{AppState, Config, routes};
use rxing::{BarcodeFormat, MultiFormatWriter, Writer};
use serde_json::{Value, json};

fn test_server_with(config: Config) -> TestServer {
    TestServer::new(routes::create_router(AppState::new(config)))
        .expect("test server")
}

fn test_server() -> TestServer {
    test_server_with(Config {
        host: "127.0.0.1".into(),
        port: 0,
        ..Config::default()
    })
}

/// PNG bytes of a white canvas with no barcode on it.
fn blank_png() -> Vec<u8> {
    let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(
        64,
        64,
        Luma([255u8]),
    ));
    png_bytes(&blank)
}

/// PNG bytes of a QR code carrying `contents`.
fn qr_png(contents: &str) -> Vec<u8> {
    let size = 240u32;
    let matrix = MultiFormatWriter
        .encode(contents, &BarcodeFormat::QR_CODE, size as i32, size as i32)
        .expect("barcode encode");

    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));
    for y in 0..size {
        for x in 0..size {
            if matrix.get(x, y) {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }
    png_bytes(&DynamicImage::ImageLuma8(img))
}

fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encode");
    bytes
}

#[tokio::test]
async fn missing_image_field_is_a_bad_request() {
    let server = test_server();

    let response = server.post("/scan").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No image data provided");
}

#[tokio::test]
async fn non_string_image_field_is_a_bad_request() {
    let server = test_server();

    let response = server.post("/scan").json(&json!({ "image": 42 })).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No image data provided");
}

#[tokio::test]
async fn empty_body_is_a_bad_request() {
    let server = test_server();

    let response = server.post("/scan").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No image data provided");
}

#[tokio::test]
async fn invalid_base64_is_a_server_error() {
    let server = test_server();

    let response = server
        .post("/scan")
        .json(&json!({ "image": "!!definitely not base64!!" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Error:"));
}

#[tokio::test]
async fn corrupt_image_reports_the_load_failure() {
    let server = test_server();

    let response = server
        .post("/scan")
        .json(&json!({ "image": STANDARD.encode(b"not an image at all") }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error: Failed to load image");
}

#[tokio::test]
async fn oversized_payload_is_rejected() {
    let server = test_server_with(Config {
        host: "127.0.0.1".into(),
        port: 0,
        max_image_bytes: 16,
        ..Config::default()
    });

    let response = server
        .post("/scan")
        .json(&json!({ "image": STANDARD.encode(blank_png()) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Image data too large");
}

#[tokio::test]
async fn blank_image_scans_to_an_empty_result() {
    let server = test_server();

    let response = server
        .post("/scan")
        .json(&json!({ "image": STANDARD.encode(blank_png()) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "No barcodes detected in image");
    assert_eq!(body["barcodes"], json!([]));
    assert_eq!(body["text_lines"], json!([]));
    assert!(body["device_info"]["wanMAC"].is_null());
    assert!(body["device_info"]["gponSN"].is_null());
    assert!(body["device_info"]["productionSN"].is_null());
}

#[tokio::test]
async fn mac_label_fills_the_wan_field() {
    let server = test_server();

    let response = server
        .post("/scan")
        .json(&json!({ "image": STANDARD.encode(qr_png("AABBCCDDEEFF")) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let barcodes = body["barcodes"].as_array().unwrap();
    assert_eq!(barcodes.len(), 1);
    assert_eq!(barcodes[0]["type"], "MAC");
    assert_eq!(barcodes[0]["data"], "AA:BB:CC:DD:EE:FF");

    assert_eq!(body["device_info"]["wanMAC"], "AA:BB:CC:DD:EE:FF");
    assert!(body["device_info"]["voipMAC"].is_null());
    assert_eq!(body["text"], "MAC: AA:BB:CC:DD:EE:FF");
}

#[tokio::test]
async fn data_uri_payloads_are_accepted() {
    let server = test_server();

    let encoded = STANDARD.encode(qr_png("ALCLB1234567"));
    let response = server
        .post("/scan")
        .json(&json!({ "image": format!("data:image/png;base64,{encoded}") }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["device_info"]["gponSN"], "ALCLB1234567");
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let server = test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
