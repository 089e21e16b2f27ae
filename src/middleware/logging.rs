use axum::{extract::Request, middleware::Next, response::Response};

use crate::utils::logger::LOGGER;

/// Outermost layer: one structured line per request, including rejected and
/// unmatched ones.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    LOGGER.log_request(&method, &path, None, response.status().as_u16());

    response
}
