//! API Errors
//!
//! Failure taxonomy for calls to the inventory service and the
//! user-facing text chosen for each kind.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    /// Request never produced a response (offline, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),
    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Coarse classification driving the message shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Other,
}

/// Messages shown for one kind of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureMessages {
    pub bad_request: &'static str,
    pub not_found: &'static str,
    pub other: &'static str,
}

pub const LOAD_ITEMS: FailureMessages = FailureMessages {
    bad_request: "Invalid filter criteria.",
    not_found: "The requested items no longer exist.",
    other: "Error loading items. Please try again.",
};

pub const TOGGLE_STOCK: FailureMessages = FailureMessages {
    bad_request: "The stock change was rejected.",
    not_found: "Item not found. It may have been deleted.",
    other: "Error toggling stock status. Please try again.",
};

pub const CREATE_ITEM: FailureMessages = FailureMessages {
    bad_request: "An item with this name already exists. Please choose a different name.",
    not_found: "The selected category no longer exists.",
    other: "An error occurred while creating the item. Please try again.",
};

pub const UPDATE_ITEM: FailureMessages = FailureMessages {
    bad_request: "Invalid item data. Please check your inputs.",
    not_found: "Item not found. It may have been deleted.",
    other: "An error occurred while updating the item. Please try again.",
};

pub const DELETE_ITEM: FailureMessages = FailureMessages {
    bad_request: "The item could not be deleted.",
    not_found: "Item not found. It may have already been deleted.",
    other: "An error occurred while deleting the item. Please try again.",
};

pub const CREATE_CATEGORY: FailureMessages = FailureMessages {
    bad_request: "A category with this name already exists",
    not_found: "The category no longer exists.",
    other: "An error occurred while creating the category. Please try again.",
};

pub const LOAD_METRICS: FailureMessages = FailureMessages {
    bad_request: "Failed to load inventory metrics. Please try again.",
    not_found: "Failed to load inventory metrics. Please try again.",
    other: "Failed to load inventory metrics. Please try again.",
};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Build from a failed response's status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(400) => ErrorKind::BadRequest,
            Some(404) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Text for the operator: server text preferred for 400s
    pub fn user_message(&self, messages: &FailureMessages) -> String {
        match self.kind() {
            ErrorKind::BadRequest => self
                .server_message()
                .unwrap_or(messages.bad_request)
                .to_string(),
            ErrorKind::NotFound => messages.not_found.to_string(),
            ErrorKind::Other => messages.other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
