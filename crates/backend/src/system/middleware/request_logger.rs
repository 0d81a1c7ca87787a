use std::fmt;
use std::time::{Duration, Instant};

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_number;

/// Одна строка консольного журнала запросов
struct AccessLine<'a> {
    method: &'a Method,
    path: &'a str,
    status: StatusCode,
    elapsed: Duration,
    /// None, если тело ответа прочитать не удалось
    size: Option<usize>,
}

impl fmt::Display for AccessLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 36 - голубой для 2xx, 33 - коричневый для остального
        let color = match (self.size, self.status.is_success()) {
            (Some(_), true) => "36",
            _ => "33",
        };
        let size = self
            .size
            .map(format_number)
            .unwrap_or_else(|| "error".to_string());
        write!(
            f,
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color,
            Utc::now().format("%H:%M:%S"),
            self.elapsed.as_millis(),
            size,
            self.status.as_u16(),
            self.method,
            self.path
        )
    }
}

/// Middleware для логирования HTTP запросов
///
/// Тело ответа буферизуется, чтобы показать его реальный размер.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let (parts, body) = next.run(req).await.into_parts();
    let buffered = to_bytes(body, usize::MAX).await;

    let line = AccessLine {
        method: &method,
        path: &path,
        status: parts.status,
        elapsed: start.elapsed(),
        size: buffered.as_ref().ok().map(|b| b.len()),
    };
    println!("{line}");

    match buffered {
        Ok(bytes) => Response::from_parts(parts, Body::from(bytes)),
        Err(e) => {
            tracing::warn!("Failed to buffer response body for {} {}: {}", method, path, e);
            Response::from_parts(parts, Body::default())
        }
    }
}
