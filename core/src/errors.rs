//! User-facing descriptions of non-render failures.
//!
//! Data loading and exports fail through ordinary `Result`s. This module maps
//! those failures onto a short title and message for the status bar, along
//! with whether retrying makes sense.

const NETWORK_ERROR: &str = "Unable to connect to the server. Please check your internet connection.";
const API_ERROR: &str = "There was a problem with the server. Please try again later.";
const VALIDATION_ERROR: &str = "Please check your input and try again.";
const NOT_FOUND: &str = "The requested information could not be found.";
const UNAUTHORIZED: &str = "You are not authorized to perform this action.";
const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
const MARKET_DATA_ERROR: &str = "Unable to fetch current market data. Displaying cached prices.";
const UNKNOWN_ERROR: &str = "An unexpected error occurred. Please try again.";

const MAX_MESSAGE_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub title: String,
    pub message: String,
    pub can_retry: bool,
    pub is_critical: bool,
}

impl ErrorDetails {
    fn new(title: &str, message: &str, can_retry: bool, is_critical: bool) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            can_retry,
            is_critical,
        }
    }

    /// `Title: message`, for single-line surfaces.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}: {}", self.title, self.message)
    }
}

/// What is known about a failure before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure<'a> {
    /// Already has a user-facing title and message.
    Described {
        title: &'a str,
        message: &'a str,
        can_retry: Option<bool>,
        is_critical: Option<bool>,
    },
    /// No connectivity at all.
    Offline,
    /// An HTTP-like status with an optional server-provided message.
    Status { code: u16, message: Option<&'a str> },
    /// Connection could not be established.
    Network,
    Timeout,
    /// Anything else; the text is inspected for known patterns.
    Message(&'a str),
}

#[must_use]
pub fn classify(failure: Failure<'_>) -> ErrorDetails {
    match failure {
        Failure::Described {
            title,
            message,
            can_retry,
            is_critical,
        } => ErrorDetails::new(
            title,
            message,
            can_retry.unwrap_or(true),
            is_critical.unwrap_or(false),
        ),
        Failure::Offline => ErrorDetails::new(
            "Connection Error",
            "You appear to be offline. Please check your internet connection.",
            true,
            false,
        ),
        Failure::Status { code, message } => classify_status(code, message),
        Failure::Network => ErrorDetails::new("Connection Error", NETWORK_ERROR, true, false),
        Failure::Timeout => timeout(),
        Failure::Message(text) => classify_message(text),
    }
}

fn classify_status(code: u16, message: Option<&str>) -> ErrorDetails {
    let server_message = message.map(str::trim).filter(|m| !m.is_empty());
    match code {
        400 => ErrorDetails::new(
            "Invalid Request",
            server_message.unwrap_or(VALIDATION_ERROR),
            false,
            false,
        ),
        401 => ErrorDetails::new("Authentication Required", UNAUTHORIZED, false, true),
        403 => ErrorDetails::new(
            "Access Denied",
            "You do not have permission to perform this action.",
            false,
            false,
        ),
        404 => ErrorDetails::new("Not Found", NOT_FOUND, false, false),
        429 => ErrorDetails::new("Rate Limited", RATE_LIMITED, true, false),
        500 => ErrorDetails::new(
            "Server Error",
            "The server encountered an error. Our team has been notified.",
            true,
            false,
        ),
        _ => ErrorDetails::new(
            "Request Failed",
            server_message.unwrap_or(API_ERROR),
            true,
            false,
        ),
    }
}

fn timeout() -> ErrorDetails {
    ErrorDetails::new(
        "Request Timeout",
        "The request took too long to complete. Please try again.",
        true,
        false,
    )
}

fn classify_message(text: &str) -> ErrorDetails {
    let lower = text.to_ascii_lowercase();
    if lower.contains("fetch") && (lower.contains("failed") || lower.contains("network")) {
        return ErrorDetails::new("Connection Error", NETWORK_ERROR, true, false);
    }
    if lower.contains("timeout") || lower.contains("timed out") {
        return timeout();
    }
    if lower.contains("market data") || lower.contains("price") {
        return ErrorDetails::new("Market Data Unavailable", MARKET_DATA_ERROR, true, false);
    }

    let trimmed = text.trim();
    let message = if trimmed.is_empty() || trimmed.chars().count() > MAX_MESSAGE_LEN {
        UNKNOWN_ERROR
    } else {
        trimmed
    };
    ErrorDetails::new("Error", message, true, false)
}
