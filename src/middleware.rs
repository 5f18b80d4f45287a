//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every request on its way through the
//! router. Currently one: [`trace`].

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use crate::method::Method;
use crate::response::Response;

/// Runs `fut` inside a per-request span and logs its outcome.
///
/// The span carries `method` and `path`; the completion event adds `status`
/// and `latency_ms`. Server errors are logged at `warn`.
pub async fn trace<F>(method: Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, path);
    async move {
        let started = Instant::now();
        let res = fut.await;
        let latency_ms = started.elapsed().as_millis() as u64;
        let status = res.status_code();
        if status >= 500 {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    #[tokio::test]
    async fn passes_response_through() {
        let res = trace(Method::Get, "/", async { Response::status(Status::NoContent) }).await;
        assert_eq!(res.status_code(), 204);
    }
}
