use std::io::{Cursor, Write};
use std::sync::Mutex;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use cfdb_core::HostingSite;
use cfdb_publish::{ContentPublisher, PublishError, PublishTarget, RemoteObjectMetadata};
use cfdb_server::{configure, multipart_config, UploadResponse, UploadService};

const BOUNDARY: &str = "cfdb-test-boundary";
const NOW: u64 = 1_700_000_000_000;

#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    failure: Option<(usize, PublishError)>,
}

impl ContentPublisher for RecordingPublisher {
    fn publish(&self, target: &PublishTarget) -> Result<RemoteObjectMetadata, PublishError> {
        let mut published = self.published.lock().expect("lock");
        published.push((target.remote_path.clone(), target.content.clone()));
        if let Some((call, error)) = &self.failure {
            if *call == published.len() {
                return Err(error.clone());
            }
        }
        Ok(RemoteObjectMetadata::default())
    }
}

impl RecordingPublisher {
    fn paths(&self) -> Vec<String> {
        self.published
            .lock()
            .expect("lock")
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                        BOUNDARY, name, value
                    )
                    .as_bytes(),
                );
            }
            Part::File(name, filename, content) => {
                body.extend_from_slice(
                    format!(
                        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        BOUNDARY, name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add dir");
            continue;
        }
        writer.start_file(*name, options).expect("start file");
        writer.write_all(content).expect("write");
    }
    writer.finish().expect("finish").into_inner()
}

fn fixed_clock() -> u64 {
    NOW
}

fn service(publisher: RecordingPublisher) -> web::Data<UploadService<RecordingPublisher>> {
    web::Data::new(
        UploadService::new(publisher, HostingSite::new("JuanHawu", "creativedatafileabase"))
            .with_clock(fixed_clock),
    )
}

async fn send_upload(
    service: &web::Data<UploadService<RecordingPublisher>>,
    limit_bytes: usize,
    content_type: String,
    payload: Vec<u8>,
) -> (StatusCode, UploadResponse) {
    let app = test::init_service(
        App::new()
            .app_data(service.clone())
            .app_data(multipart_config(limit_bytes))
            .configure(configure::<RecordingPublisher>),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/file")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let body: UploadResponse = test::read_body_json(response).await;
    (status, body)
}

async fn post_upload(
    service: &web::Data<UploadService<RecordingPublisher>>,
    parts: &[Part<'_>],
) -> (StatusCode, UploadResponse) {
    send_upload(
        service,
        10 * 1024 * 1024,
        format!("multipart/form-data; boundary={}", BOUNDARY),
        multipart_body(parts),
    )
    .await
}

#[actix_web::test]
async fn health_route_reports_running() {
    let service = service(RecordingPublisher::default());
    let app = test::init_service(
        App::new()
            .app_data(service.clone())
            .configure(configure::<RecordingPublisher>),
    )
    .await;
    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Creative File Database is running");
}

#[actix_web::test]
async fn archive_and_logo_are_published_in_order() {
    let service = service(RecordingPublisher::default());
    let archive = zip_archive(&[
        ("./index.html", b"<html></html>"),
        ("assets/", b""),
        ("assets/game.js", b"start()"),
        ("assets/sprite.bin", &[0, 159, 255]),
    ]);
    let (status, body) = post_upload(
        &service,
        &[
            Part::Text("name", "My Game!"),
            Part::Text("author", "Someone"),
            Part::Text("description", "A small game"),
            Part::File("zip", "game.zip", &archive),
            Part::File("logo", "logo.png", b"\x89PNG\r\n"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let folder = format!("My_Game__{}", NOW);
    assert_eq!(
        body,
        UploadResponse {
            success: true,
            folder_name: Some(folder.clone()),
            uploaded_count: Some(4),
            index_url: Some(format!(
                "https://juanhawu.github.io/creativedatafileabase/{}/index.html",
                folder
            )),
            logo_url: Some(format!(
                "https://juanhawu.github.io/creativedatafileabase/{}/logo.png",
                folder
            )),
            error: None,
        }
    );
    assert_eq!(
        service.publisher().paths(),
        vec![
            format!("{}/index.html", folder),
            format!("{}/assets/game.js", folder),
            format!("{}/assets/sprite.bin", folder),
            format!("{}/logo.png", folder),
        ]
    );
    let published = service.publisher().published.lock().expect("lock");
    assert_eq!(published[2].1, vec![0, 159, 255]);
    assert_eq!(published[3].1, b"\x89PNG\r\n".to_vec());
}

#[actix_web::test]
async fn upload_without_logo_or_name_uses_defaults() {
    let service = service(RecordingPublisher::default());
    let archive = zip_archive(&[("index.html", b"hi")]);
    let (status, body) = post_upload(&service, &[Part::File("zip", "site.zip", &archive)]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.folder_name.as_deref(), Some("game_1700000000000"));
    assert_eq!(body.uploaded_count, Some(1));
    assert_eq!(body.logo_url, None);
}

#[actix_web::test]
async fn missing_archive_is_a_bad_request() {
    let service = service(RecordingPublisher::default());
    let (status, body) = post_upload(
        &service,
        &[
            Part::Text("name", "demo"),
            Part::File("logo", "logo.png", b"png"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert!(body.error.is_some());
    assert!(service.publisher().paths().is_empty());
}

#[actix_web::test]
async fn corrupt_archive_is_a_server_error() {
    let service = service(RecordingPublisher::default());
    let (status, body) = post_upload(
        &service,
        &[Part::File("zip", "broken.zip", b"this is not a zip")],
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    assert!(body
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("zip"));
    assert!(service.publisher().paths().is_empty());
}

#[actix_web::test]
async fn traversal_entry_is_rejected_before_publishing() {
    let service = service(RecordingPublisher::default());
    let archive = zip_archive(&[("index.html", b"ok"), ("../../etc/passed", b"x")]);
    let (status, body) =
        post_upload(&service, &[Part::File("zip", "evil.zip", &archive)]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("../../etc/passed"));
    assert!(service.publisher().paths().is_empty());
}

#[actix_web::test]
async fn remote_html_failure_halts_and_reports_visibility_hint() {
    let html_failure = cfdb_publish::classify_response(
        404,
        "<!DOCTYPE html><html><body>Not Found</body></html>",
    )
    .expect_err("html failure");
    let service = service(RecordingPublisher {
        failure: Some((2, html_failure)),
        ..RecordingPublisher::default()
    });
    let archive = zip_archive(&[("a.txt", b"a"), ("b.txt", b"b"), ("c.txt", b"c")]);
    let (status, body) = post_upload(
        &service,
        &[
            Part::File("zip", "site.zip", &archive),
            Part::File("logo", "logo.png", b"png"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    let message = body.error.unwrap_or_default();
    assert!(message.contains("repository is public"), "{message}");
    assert_eq!(service.publisher().paths().len(), 2);
}

#[actix_web::test]
async fn non_multipart_body_is_a_bad_request_envelope() {
    let service = service(RecordingPublisher::default());
    let (status, body) = send_upload(
        &service,
        10 * 1024 * 1024,
        "application/json".to_string(),
        br#"{"name":"demo"}"#.to_vec(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert!(body.error.is_some());
    assert!(service.publisher().paths().is_empty());
}

#[actix_web::test]
async fn oversized_upload_is_a_bad_request_envelope() {
    let service = service(RecordingPublisher::default());
    let oversized: Vec<u8> = (0..8 * 1024u32).map(|i| (i % 251) as u8).collect();
    let (status, body) = send_upload(
        &service,
        1024,
        format!("multipart/form-data; boundary={}", BOUNDARY),
        multipart_body(&[Part::File("zip", "big.zip", &oversized)]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.success);
    assert!(body.error.is_some());
    assert!(service.publisher().paths().is_empty());
}
