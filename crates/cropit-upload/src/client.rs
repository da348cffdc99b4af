// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use crate::error::{Result, UploadError};
use crate::protocol::{parse_failure, parse_success, UploadImage, IMAGE_FIELD};

/// Anything that can take an encoded image and hand back where it lives.
pub trait Uploader {
    fn upload(&self, image: &UploadImage) -> Result<String>;
}

pub struct UploadClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl UploadClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Uploader for UploadClient {
    fn upload(&self, image: &UploadImage) -> Result<String> {
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|_| UploadError::InvalidMime(image.mime.clone()))?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;

        if status.is_success() {
            parse_success(&body)
        } else {
            Err(parse_failure(status.as_u16(), &body))
        }
    }
}
