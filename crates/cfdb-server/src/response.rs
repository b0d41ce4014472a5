use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use cfdb_core::PublishResult;
use cfdb_pack::ArchiveError;

use crate::pipeline::UploadError;

/// JSON envelope returned by `POST /file`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

impl From<PublishResult> for UploadResponse {
    fn from(result: PublishResult) -> Self {
        Self {
            success: true,
            folder_name: Some(result.folder_name.to_string()),
            uploaded_count: Some(result.published_count),
            index_url: Some(result.derived_urls.index),
            logo_url: result.derived_urls.asset,
            error: None,
        }
    }
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::MissingInput(_) => StatusCode::BAD_REQUEST,
            UploadError::Archive(ArchiveError::UnsafePath { .. }) => StatusCode::BAD_REQUEST,
            UploadError::Archive(_) | UploadError::Publish(_) | UploadError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(UploadResponse::failure(self.to_string()))
    }
}
