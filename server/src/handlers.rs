use std::sync::{Mutex, PoisonError};

use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use snapimg_core::catalog::{Tool, TOOLS};
use snapimg_core::config::{ProcessingConfig, TargetFormat};
use snapimg_core::processor::converter_for;
use snapimg_core::{
    Alert, BatchObserver, Download, MediaType, ProcessingError, Progress, SelectedFile, Session,
    SessionState,
};

#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    alerts: Vec<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            alerts: Vec::new(),
        }
    }
}

impl ApiResponse<()> {
    fn failure(error: String, alerts: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            alerts,
        }
    }
}

/// Collects alerts so they can be returned to the client.
#[derive(Default)]
struct AlertLog {
    alerts: Mutex<Vec<String>>,
}

impl AlertLog {
    fn into_alerts(self) -> Vec<String> {
        self.alerts.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BatchObserver for AlertLog {
    fn alert(&self, alert: &Alert) {
        log::warn!("{alert}");
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert.to_string());
    }

    fn progress(&self, progress: Progress) {
        log::debug!("{progress}");
    }
}

/// GET /tools
pub async fn tools() -> Json<ApiResponse<&'static [Tool]>> {
    Json(ApiResponse::success(TOOLS))
}

/// POST /convert
///
/// Convert uploaded images and return one file, or a ZIP archive when more
/// than one converts.
///
/// Form fields:
/// - file (repeatable): image data; the part's Content-Type is the declared type
/// - to (optional): jpg/png/webp (default: jpg)
/// - quality (optional): 0-100 (default: 85); anything else is rejected
pub async fn convert(mut multipart: Multipart) -> Result<Response, StatusCode> {
    let mut files = Vec::new();
    let mut target = TargetFormat::Jpg;
    let mut config = ProcessingConfig::default();

    // Parse multipart form
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        };

        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let media_type = declared_type(field.content_type(), &file_name);
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                files.push(SelectedFile::new(file_name, media_type, bytes.to_vec()));
            }
            "to" => {
                let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                target = text.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            }
            "quality" => {
                let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                config.quality = parse_quality(&text).ok_or(StatusCode::BAD_REQUEST)?;
            }
            _ => {}
        }
    }

    log::info!("Converting {} upload(s) to {}", files.len(), target.as_str());

    let converted = tokio::task::spawn_blocking(move || {
        let observer = AlertLog::default();
        let mut session = Session::new(converter_for(target), config);
        session.accept(files);
        let result = session.process(&observer).and_then(|_| {
            if session.state() == SessionState::NoResults {
                return Err(ProcessingError::NothingToDownload);
            }
            session.download(&observer)
        });
        (result, observer.into_alerts())
    })
    .await
    .map_err(|e| {
        log::error!("Conversion task failed: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match converted {
        (Ok(download), alerts) => Ok(download_response(download, target, alerts.len())),
        (Err(e), alerts) => {
            let status = match e {
                ProcessingError::NoFiles => StatusCode::BAD_REQUEST,
                ProcessingError::NothingToDownload => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Ok((status, Json(ApiResponse::failure(e.to_string(), alerts))).into_response())
        }
    }
}

fn parse_quality(text: &str) -> Option<u8> {
    text.trim().parse::<u8>().ok().filter(|q| *q <= 100)
}

/// Prefer the part's Content-Type; fall back to the file name.
fn declared_type(content_type: Option<&str>, file_name: &str) -> MediaType {
    match content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) {
        Some(m) if m != mime::APPLICATION_OCTET_STREAM => MediaType::from_mime(m.essence_str()),
        _ => MediaType::from_path(std::path::Path::new(file_name)),
    }
}

fn download_response(download: Download, target: TargetFormat, skipped: usize) -> Response {
    let content_type = if download.is_archive() {
        "application/zip"
    } else {
        target.mime_type()
    };
    let disposition = format!("attachment; filename=\"{}\"", download.name().replace('"', "'"));
    let (entries, body) = match download {
        Download::Single { data, .. } => (1, data),
        Download::Archive { entries, data, .. } => (entries, data),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::HeaderName::from_static("x-snapimg-skipped"), skipped.to_string()),
            (header::HeaderName::from_static("x-snapimg-entries"), entries.to_string()),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_must_be_a_percentage() {
        assert_eq!(parse_quality("70"), Some(70));
        assert_eq!(parse_quality(" 100 "), Some(100));
        assert_eq!(parse_quality("101"), None);
        assert_eq!(parse_quality("high"), None);
        assert_eq!(parse_quality("-5"), None);
    }

    #[test]
    fn declared_type_prefers_content_type() {
        assert_eq!(declared_type(Some("image/gif"), "a.png"), MediaType::Gif);
        assert_eq!(
            declared_type(Some("text/plain; charset=utf-8"), "a.png"),
            MediaType::Other("text/plain".into())
        );
        assert_eq!(declared_type(None, "a.webp"), MediaType::Webp);
        assert_eq!(
            declared_type(Some("application/octet-stream"), "a.jpg"),
            MediaType::Jpeg
        );
    }
}
