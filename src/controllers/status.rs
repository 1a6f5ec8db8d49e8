use log::debug;
use myrtio_core::http::{HttpMethod, ResponseHeaders};

use super::dependencies::status_usecases;
use crate::{
    domain::types::StatusUsecasesPortRef,
    infrastructure::services::http::{HttpConnection, HttpHandler, HttpResult},
};

/// Routes known to the local server, any method.
const KNOWN_PATHS: [&str; 4] = ["/status", "/health", "/light", "/registration"];

#[derive(Debug, Default)]
pub struct StatusHttpController;

impl HttpHandler for StatusHttpController {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let Some(usecases) = status_usecases() else {
            return conn
                .write_text(ResponseHeaders::internal_error(), "Not Ready")
                .await;
        };

        let (method, path) = conn.route();
        debug!("http: {} {}", method.as_str(), path);
        match (method, path) {
            (HttpMethod::Get, "/status" | "/health") => handle_get_status(conn, usecases).await,
            (HttpMethod::Post, "/light") => handle_toggle_light(conn, usecases).await,
            (HttpMethod::Get, "/registration") => handle_get_registration(conn, usecases).await,
            (_, path) if KNOWN_PATHS.contains(&path) => serve_405(conn).await,
            _ => serve_404(conn).await,
        }
    }
}

async fn handle_get_status(
    conn: &mut HttpConnection<'_>,
    usecases: StatusUsecasesPortRef,
) -> HttpResult {
    conn.write_json(&usecases.device_status()).await
}

async fn handle_toggle_light(
    conn: &mut HttpConnection<'_>,
    usecases: StatusUsecasesPortRef,
) -> HttpResult {
    conn.write_json(&usecases.toggle_light()).await
}

async fn handle_get_registration(
    conn: &mut HttpConnection<'_>,
    usecases: StatusUsecasesPortRef,
) -> HttpResult {
    conn.write_json(&usecases.registration()).await
}

async fn serve_405(conn: &mut HttpConnection<'_>) -> HttpResult {
    conn.write_text(ResponseHeaders::method_not_allowed(), "Method Not Allowed")
        .await
}

async fn serve_404(conn: &mut HttpConnection<'_>) -> HttpResult {
    conn.write_text(ResponseHeaders::not_found(), "Not Found").await
}
