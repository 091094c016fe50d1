use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

// Scan request handler
pub async fn scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    // Absent body, non-JSON body, and JSON without a string `image` field
    // all get the same client-facing answer.
    let Some(image_field) = payload
        .as_ref()
        .ok()
        .and_then(|Json(body)| body.get("image"))
        .and_then(Value::as_str)
    else {
        return Err(AppError::bad_request("No image data provided"));
    };

    let image_bytes = decode_image_field(image_field)?;

    if image_bytes.len() > state.config.max_image_bytes {
        warn!(
            bytes = image_bytes.len(),
            limit = state.config.max_image_bytes,
            "rejecting oversized scan payload"
        );
        return Err(AppError::bad_request("Image data too large"));
    }

    info!(bytes = image_bytes.len(), "scan request received");

    // The scan is CPU-bound; run it off the async workers and bound it,
    // since decode time on pathological inputs is open-ended.
    let scanner = state.scanner.clone();
    let scan =
        tokio::task::spawn_blocking(move || scanner.scan_bytes(&image_bytes));
    let result = tokio::time::timeout(state.config.scan_timeout, scan)
        .await
        .map_err(|_| AppError::internal("Error: barcode scan timed out"))?
        .map_err(|err| {
            AppError::internal(format!("Error: scan task failed: {err}"))
        })??;

    Ok(Json(json!({
        "success": true,
        "text": result.text,
        "device_info": result.device_info,
        "barcodes": result.barcodes,
        // Filled by the OCR text path, which this service does not run.
        "text_lines": [],
    })))
}

/// Base64-decode the image field, accepting both bare payloads and
/// `data:image/...;base64,` URIs.
fn decode_image_field(image_field: &str) -> AppResult<Vec<u8>> {
    let encoded = if image_field.starts_with("data:image") {
        image_field
            .split_once(',')
            .map(|(_, rest)| rest)
            .unwrap_or(image_field)
    } else {
        image_field
    };

    STANDARD.decode(encoded.trim()).map_err(|err| {
        warn!("invalid base64 in scan payload: {err}");
        AppError::internal(format!("Error: invalid base64 image data: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_prefix_is_stripped_before_decoding() {
        let encoded = STANDARD.encode(b"pixels");
        let uri = format!("data:image/png;base64,{encoded}");
        assert_eq!(decode_image_field(&uri).unwrap(), b"pixels");
    }

    #[test]
    fn bare_base64_is_accepted() {
        let encoded = STANDARD.encode(b"pixels");
        assert_eq!(decode_image_field(&encoded).unwrap(), b"pixels");
    }

    #[test]
    fn invalid_base64_maps_to_a_server_error() {
        let err = decode_image_field("!!not-base64!!").unwrap_err();
        assert!(err.message.starts_with("Error:"));
    }
}
