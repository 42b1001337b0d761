// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_tracker::db::StoreError;
use workout_tracker::error::AppError;

#[test]
fn test_error_status_codes() {
    let cases = [
        (AppError::invalid_inputs(), StatusCode::BAD_REQUEST),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::MapNotLoaded, StatusCode::CONFLICT),
        (AppError::PositionResolved, StatusCode::CONFLICT),
        (
            AppError::Storage(StoreError::InvalidKey("../x".into())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn test_validation_message_is_the_alert_text() {
    let err = AppError::invalid_inputs();
    assert_eq!(err.to_string(), "Inputs have to be positive numbers");
}
