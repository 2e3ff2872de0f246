// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::favorites::FavoriteError;
use crate::generation::GenerationError;

/// Wire shape for every error leaving the HTTP boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    /// A generation run is already in flight
    RunInFlight,
    GenerationFailed {
        details: String,
    },
    FavoriteSaveFailed {
        details: String,
    },
    FavoritesFetchFailed {
        details: String,
    },
    FavoriteDeleteFailed {
        details: String,
    },
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::InvalidRequest(msg) => (msg.clone(), None),
            ApiError::RunInFlight => ("Generation already in progress".to_string(), None),
            ApiError::GenerationFailed { details } => (
                "Failed to generate any images".to_string(),
                Some(details.clone()),
            ),
            ApiError::FavoriteSaveFailed { details } => (
                "Failed to save favorite image".to_string(),
                Some(details.clone()),
            ),
            ApiError::FavoritesFetchFailed { details } => (
                "Failed to fetch favorite images".to_string(),
                Some(details.clone()),
            ),
            ApiError::FavoriteDeleteFailed { details } => (
                "Failed to delete favorite image".to_string(),
                Some(details.clone()),
            ),
        };

        ErrorResponse { error, details }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::RunInFlight => 409,
            ApiError::GenerationFailed { .. }
            | ApiError::FavoriteSaveFailed { .. }
            | ApiError::FavoritesFetchFailed { .. }
            | ApiError::FavoriteDeleteFailed { .. } => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::RunInFlight => write!(f, "Generation already in progress"),
            ApiError::GenerationFailed { details } => {
                write!(f, "Generation failed: {}", details)
            }
            ApiError::FavoriteSaveFailed { details } => {
                write!(f, "Favorite save failed: {}", details)
            }
            ApiError::FavoritesFetchFailed { details } => {
                write!(f, "Favorites fetch failed: {}", details)
            }
            ApiError::FavoriteDeleteFailed { details } => {
                write!(f, "Favorite delete failed: {}", details)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self.to_response())).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::InvalidArgument(msg) => ApiError::InvalidRequest(msg),
            other @ GenerationError::NoImagesGenerated => ApiError::GenerationFailed {
                details: other.to_string(),
            },
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(e: FavoriteError) -> Self {
        match e {
            FavoriteError::InvalidArgument(msg) => ApiError::InvalidRequest(msg),
            other => ApiError::FavoriteSaveFailed {
                details: other.to_string(),
            },
        }
    }
}
