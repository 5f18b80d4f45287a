//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it reach the student store? Failure → pulled from the load balancer. |

use std::sync::Arc;

use tracing::warn;

use crate::app::AppState;
use crate::{Request, Response, Status};

/// Liveness check.
///
/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all,
/// it is alive; this handler has no dependencies.
pub async fn liveness(_state: Arc<AppState>, _req: Request) -> Response {
    Response::text("ok")
}

/// Readiness check.
///
/// `200 OK` with body `"ready"` once the store answers a ping, otherwise
/// `503 Service Unavailable`.
pub async fn readiness(state: Arc<AppState>, _req: Request) -> Response {
    match state.students.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!("readiness check failed: {e}");
            Response::builder().status(Status::ServiceUnavailable).text("store unavailable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::store::MemoryStore;
    use crate::store::testing::DownStore;

    #[tokio::test]
    async fn health_checks_answer_with_memory_store() {
        let state = Arc::new(AppState::new(Arc::new(MemoryStore::new())));
        let live = liveness(state.clone(), Request::new(Method::Get, "/healthz")).await;
        let ready = readiness(state, Request::new(Method::Get, "/readyz")).await;
        assert_eq!(live.body(), b"ok");
        assert_eq!(ready.status_code(), 200);
        assert_eq!(ready.body(), b"ready");
    }

    #[tokio::test]
    async fn readiness_is_503_when_store_is_down() {
        let state = Arc::new(AppState::new(Arc::new(DownStore)));
        let ready = readiness(state.clone(), Request::new(Method::Get, "/readyz")).await;
        assert_eq!(ready.status_code(), 503);
        assert_eq!(ready.body(), b"store unavailable");

        let live = liveness(state, Request::new(Method::Get, "/healthz")).await;
        assert_eq!(live.status_code(), 200);
    }
}
