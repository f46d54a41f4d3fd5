use serde_json::Value;

/// Generic fallback shown when the server gives us nothing usable.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("please login to continue")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// The transient message a UI layer would surface for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Please login to continue.".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound => "Requested resource was not found.".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Network(_) => GENERIC_ERROR.to_string(),
        }
    }

    /// Build an error from a non-2xx status and its (possibly absent) JSON body.
    pub fn from_status_body(status: u16, body: Option<Value>) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        if status == 404 {
            return ApiError::NotFound;
        }
        if let Some(body) = body {
            if let Some(msg) = server_message(&body) {
                return ApiError::Api {
                    status,
                    message: msg,
                };
            }
            if let Some(flat) = flatten_field_errors(&body) {
                return ApiError::Validation(flat);
            }
        }
        ApiError::Api {
            status,
            message: GENERIC_ERROR.to_string(),
        }
    }
}

/// Server-provided `detail`/`error`/`message` field, first one present wins.
fn server_message(body: &Value) -> Option<String> {
    for key in ["detail", "error", "message"] {
        if let Some(msg) = body.get(key).and_then(Value::as_str) {
            return Some(msg.to_string());
        }
    }
    None
}

/// Flatten a `{field: ["msg", ...]}` validation body into one
/// semicolon-joined string.
fn flatten_field_errors(body: &Value) -> Option<String> {
    let map = body.as_object()?;
    let mut parts = Vec::new();
    for (field, messages) in map {
        match messages {
            Value::String(msg) => parts.push(format!("{field}: {msg}")),
            Value::Array(items) => {
                let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if !joined.is_empty() {
                    parts.push(format!("{field}: {}", joined.join(", ")));
                }
            }
            _ => {}
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
