// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Engine operations on validated input cannot fail; these errors come from
//! the form boundary, lookups by ID, and the storage collaborator.

use crate::db::StoreError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Whether the error was caused by user input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Validation(_)
        )
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AppError>;
