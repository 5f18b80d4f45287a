//! Application wiring: shared state and the route table.

use std::sync::Arc;

use serde_json::json;

use crate::health;
use crate::method::Method;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::store::DocumentStore;
use crate::student::StudentRepository;
use crate::student::routes::{add_student, delete_student, get_student, list_students, update_student};

/// State handed to every handler. Created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { students: StudentRepository::new(store) }
    }
}

/// The full route table.
///
/// The collection routes answer with and without the trailing slash.
pub fn router(state: AppState) -> Router<AppState> {
    Router::with_state(state)
        .on(Method::Get,    "/",              read_root)
        .on(Method::Get,    "/healthz",       health::liveness)
        .on(Method::Get,    "/readyz",        health::readiness)
        .on(Method::Get,    "/student",       list_students)
        .on(Method::Get,    "/student/",      list_students)
        .on(Method::Post,   "/student",       add_student)
        .on(Method::Post,   "/student/",      add_student)
        .on(Method::Get,    "/student/{id}",  get_student)
        .on(Method::Put,    "/student/{id}",  update_student)
        .on(Method::Delete, "/student/{id}",  delete_student)
}

/// `GET /`
async fn read_root(_state: Arc<AppState>, _req: Request) -> Json<serde_json::Value> {
    Json(json!({"message": "Welcome to this fantastic app!"}))
}
