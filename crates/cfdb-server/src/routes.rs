use actix_multipart::form::bytes::Bytes as FileField;
use actix_multipart::form::text::Text;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use serde_json::json;

use cfdb_publish::ContentPublisher;

use crate::pipeline::{UploadError, UploadRequest, UploadService};
use crate::response::UploadResponse;

pub const HEALTH_MESSAGE: &str = "Creative File Database is running";

#[derive(MultipartForm)]
pub struct UploadForm {
    zip: Option<FileField>,
    logo: Option<FileField>,
    name: Option<Text<String>>,
    author: Option<Text<String>>,
    description: Option<Text<String>>,
}

impl From<UploadForm> for UploadRequest {
    fn from(form: UploadForm) -> Self {
        UploadRequest {
            display_name: form.name.map(Text::into_inner),
            author: form.author.map(Text::into_inner),
            description: form.description.map(Text::into_inner),
            archive: form.zip.map(|field| field.data),
            logo: form.logo.map(|field| field.data),
        }
    }
}

pub fn configure<P>(cfg: &mut web::ServiceConfig)
where
    P: ContentPublisher + Send + Sync + 'static,
{
    cfg.route("/", web::get().to(health))
        .route("/file", web::post().to(upload_file::<P>));
}

/// Multipart limits for the upload form; parse failures get the same JSON
/// envelope as pipeline failures.
pub fn multipart_config(limit_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(limit_bytes)
        .memory_limit(limit_bytes)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(UploadResponse::failure(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": HEALTH_MESSAGE }))
}

async fn upload_file<P>(
    service: web::Data<UploadService<P>>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, UploadError>
where
    P: ContentPublisher + Send + Sync + 'static,
{
    let request = UploadRequest::from(form);
    let service = service.into_inner();
    let outcome = web::block(move || service.publish_upload(request))
        .await
        .map_err(|err| UploadError::Worker(err.to_string()))?;
    match outcome {
        Ok(result) => Ok(HttpResponse::Ok().json(UploadResponse::from(result))),
        Err(err) => {
            log::error!("upload error: {}", err);
            Err(err)
        }
    }
}
