use serde::Serialize;

const CODE_SUCCESS: i32 = 1;
const CODE_ERROR: i32 = 0;

/// Envelope returned by every JSON endpoint. The frontend switches on
/// `code`, so failures still travel with HTTP 200.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn success_with_msg(data: T, msg: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: msg.into(),
            data: Some(data),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_ERROR,
            msg: msg.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: "success".to_string(),
            data: None,
        }
    }
}
