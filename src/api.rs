use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::report::{sanitize_component, ReportRenderer};

/// Common upload shape of the three POST endpoints: a declared language and
/// the source file.
#[derive(MultipartForm)]
pub struct SubmissionForm {
    pub language: Text<String>,
    pub file: Bytes,
}

fn decode_upload(data: &[u8]) -> Result<String, ApiError> {
    String::from_utf8(data.to_vec())
        .map_err(|_| ApiError::BadRequest("uploaded file must be UTF-8 text".to_string()))
}

fn attachment_filename(language: &str) -> String {
    format!("code_review_report_{}.txt", sanitize_component(language))
}

pub async fn root() -> impl Responder {
    web::Json(serde_json::json!({"message": "AI Code Reviewer Backend is running"}))
}

pub async fn health() -> impl Responder {
    web::Json(serde_json::json!({"status": "ok"}))
}

pub async fn analyze(
    form: MultipartForm<SubmissionForm>,
    dispatcher: web::Data<Dispatcher>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let language = form.language.into_inner();
    let code = decode_upload(&form.file.data)?;

    info!(language = %language, bytes = code.len(), "analyze request");
    let outcome = dispatcher.analyze(&language, &code).await;
    Ok(web::Json(outcome))
}

pub async fn format_code(
    form: MultipartForm<SubmissionForm>,
    dispatcher: web::Data<Dispatcher>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let language = form.language.into_inner();
    let code = decode_upload(&form.file.data)?;

    info!(language = %language, bytes = code.len(), "format request");
    let outcome = dispatcher.format(&language, &code).await;
    Ok(web::Json(outcome))
}

/// Renders the report to disk, then serves it back as a download. The
/// language is not checked against the alias table here; any submission
/// gets a document.
pub async fn report(
    form: MultipartForm<SubmissionForm>,
    renderer: web::Data<ReportRenderer>,
) -> Result<impl Responder, ApiError> {
    let form = form.into_inner();
    let language = form.language.into_inner();
    let code = decode_upload(&form.file.data)?;

    info!(language = %language, bytes = code.len(), "report request");
    let path = renderer
        .write_report(&language, &code)
        .await
        .map_err(|err| ApiError::Report(err.to_string()))?;
    let document = tokio::fs::read(&path)
        .await
        .map_err(|err| ApiError::Report(err.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(attachment_filename(&language))],
        })
        .body(document))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/analyze", web::post().to(analyze))
            .route("/format", web::post().to(format_code))
            .route("/report", web::post().to(report)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ReviewModel;
    use crate::config::{ReportsConfig, ToolchainConfig};
    use crate::error::AiError;
    use actix_web::http::{header, StatusCode};
    use actix_web::{App, ResponseError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    const BOUNDARY: &str = "----request-boundary";

    struct KeylessModel;

    #[async_trait]
    impl ReviewModel for KeylessModel {
        async fn review(&self, _label: &str, _payload: &str) -> Result<String, AiError> {
            Err(AiError::MissingKey)
        }
    }

    /// Tool binaries point at nothing, so toolchain families degrade into
    /// missing-tool reports without touching the host.
    fn test_dispatcher() -> Dispatcher {
        let tools = ToolchainConfig {
            flake8_bin: "flake8-not-installed-xyz".to_string(),
            radon_bin: "radon-not-installed-xyz".to_string(),
            black_bin: "black-not-installed-xyz".to_string(),
            eslint_bin: "eslint-not-installed-xyz".to_string(),
            prettier_bin: "prettier-not-installed-xyz".to_string(),
            cpplint_bin: "cpplint-not-installed-xyz".to_string(),
            lizard_bin: "lizard-not-installed-xyz".to_string(),
            ..ToolchainConfig::default()
        };
        Dispatcher::new(&tools, Arc::new(KeylessModel))
    }

    fn multipart_body(language: &str, file: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"language\"\r\n\r\n");
        body.extend_from_slice(language.as_bytes());
        body.extend_from_slice(format!("\r\n--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"code.txt\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(file);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn multipart_post(uri: &str, language: &str, file: &[u8]) -> actix_web::test::TestRequest {
        actix_web::test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(language, file))
    }

    #[test]
    fn test_decode_upload_accepts_utf8() {
        let code = decode_upload("print('hi')\n".as_bytes()).unwrap();
        assert_eq!(code, "print('hi')\n");
    }

    #[test]
    fn test_decode_upload_rejects_binary_with_400() {
        let err = decode_upload(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_attachment_filename_keeps_language() {
        assert_eq!(
            attachment_filename("python"),
            "code_review_report_python.txt"
        );
        assert_eq!(attachment_filename("c++"), "code_review_report_c++.txt");
    }

    #[test]
    fn test_attachment_filename_is_header_safe() {
        assert_eq!(
            attachment_filename("py\"thon"),
            "code_review_report_py_thon.txt"
        );
    }

    #[actix_web::test]
    async fn test_root_reports_backend_running() {
        let app =
            actix_web::test::init_service(App::new().route("/", web::get().to(root))).await;

        let req = actix_web::test::TestRequest::get().uri("/").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["message"], "AI Code Reviewer Backend is running");
    }

    #[actix_web::test]
    async fn test_analyze_unsupported_language_is_200_with_error_payload() {
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(test_dispatcher()))
                .configure(configure),
        )
        .await;

        let req = multipart_post("/api/analyze", "rust", b"fn main() {}").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_web::test::read_body(resp).await;
        assert_eq!(
            String::from_utf8(body.to_vec()).unwrap(),
            r#"{"error":"Language rust not supported yet."}"#
        );
    }

    #[actix_web::test]
    async fn test_analyze_degraded_toolchain_still_answers_200() {
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(test_dispatcher()))
                .configure(configure),
        )
        .await;

        let req = multipart_post("/api/analyze", "python", b"import os\n").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["complexity"], "N/A");
        let lint = body["lint"].as_array().unwrap();
        assert_eq!(lint.len(), 1);
        assert!(lint[0].as_str().unwrap().contains("flake8"));
    }

    #[actix_web::test]
    async fn test_analyze_rejects_non_utf8_upload() {
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(test_dispatcher()))
                .configure(configure),
        )
        .await;

        let req = multipart_post("/api/analyze", "python", &[0xff, 0xfe, 0x00]).to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[actix_web::test]
    async fn test_report_serves_attachment_download() {
        let tmp = TempDir::new().unwrap();
        let renderer = ReportRenderer::from_config(&ReportsConfig {
            dir: tmp.path().to_path_buf(),
        });
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(renderer))
                .configure(configure),
        )
        .await;

        let req = multipart_post("/api/report", "python", b"x = 1\n").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert_eq!(content_type, "application/octet-stream");
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("code_review_report_python.txt"));

        let text = String::from_utf8(actix_web::test::read_body(resp).await.to_vec()).unwrap();
        assert!(text.contains("Submitted Code:\nx = 1\n"));
    }
}
