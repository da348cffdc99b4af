// Author: Dustin Pilgrim
// License: MIT
//
// Wire format of the upload endpoint:
//   request  multipart/form-data, one file field named "image",
//            `Authorization: Bearer <token>`
//   2xx      {"url": "..."}
//   non-2xx  {"message": "..."}

use serde::{Deserialize, Serialize};

use crate::error::{Result, UploadError};

pub const IMAGE_FIELD: &str = "image";

/// An encoded image ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Pull the url out of a successful response body.
pub fn parse_success(body: &str) -> Result<String> {
    let resp: UploadResponse = serde_json::from_str(body)?;
    let url = resp.url.trim();
    if url.is_empty() {
        return Err(UploadError::MissingUrl);
    }
    Ok(url.to_string())
}

/// Turn a non-2xx response into an error. Falls back to the raw body (or the
/// status alone) when the server did not send the JSON error payload.
pub fn parse_failure(status: u16, body: &str) -> UploadError {
    let message = match serde_json::from_str::<ErrorPayload>(body) {
        Ok(p) => p.message,
        Err(_) => {
            let raw = body.trim();
            if raw.is_empty() {
                format!("server returned status {status}")
            } else {
                raw.to_string()
            }
        }
    };
    UploadError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_url() {
        let url = parse_success(r#"{"url":"https://cdn.example.com/a.jpg"}"#).unwrap();
        assert_eq!(url, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn success_without_url_is_an_error() {
        assert!(matches!(parse_success(r#"{"url":"  "}"#), Err(UploadError::MissingUrl)));
        assert!(matches!(parse_success(r#"{"ok":true}"#), Err(UploadError::Decode(_))));
    }

    #[test]
    fn failure_uses_message_payload() {
        match parse_failure(413, r#"{"message":"file too large"}"#) {
            UploadError::Rejected { status, message } => {
                assert_eq!(status, 413);
                assert_eq!(message, "file too large");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_without_payload_keeps_body_or_status() {
        match parse_failure(502, "Bad Gateway") {
            UploadError::Rejected { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected {other:?}"),
        }
        match parse_failure(401, "") {
            UploadError::Rejected { message, .. } => {
                assert_eq!(message, "server returned status 401")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
