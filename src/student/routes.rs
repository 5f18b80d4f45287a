//! HTTP handlers for `/student`.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /student/` | [`list_students`] |
//! | `POST /student/` | [`add_student`] |
//! | `GET /student/{id}` | [`get_student`] |
//! | `PUT /student/{id}` | [`update_student`] |
//! | `DELETE /student/{id}` | [`delete_student`] |
//!
//! Not found, and an update with nothing in it, answer with a `404` error
//! envelope. Invalid payloads answer `422` with every violation listed.

use std::sync::Arc;

use tracing::error;

use crate::app::AppState;
use crate::envelope::{ErrorResponseModel, ResponseModel};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;
use crate::store::StoreError;

use super::schema::{ValidationErrors, validate_new, validate_patch};

fn store_failure(err: StoreError) -> Response {
    error!("student store failure: {err}");
    ErrorResponseModel::new(
        "Internal server error",
        Status::InternalServerError,
        "The student store is unavailable.",
    )
    .into_response()
}

fn invalid(errors: ValidationErrors) -> Response {
    (Status::UnprocessableContent, Json(errors)).into_response()
}

fn id_param(req: &Request) -> String {
    req.param("id").unwrap_or_default().to_owned()
}

/// `GET /student/`
pub async fn list_students(state: Arc<AppState>, _req: Request) -> Response {
    match state.students.list_all().await {
        Ok(students) if students.is_empty() => {
            ResponseModel::new(students, "Empty list returned").into_response()
        }
        Ok(students) => {
            ResponseModel::new(students, "Students data retrieved successfully").into_response()
        }
        Err(e) => store_failure(e),
    }
}

/// `POST /student/`
pub async fn add_student(state: Arc<AppState>, req: Request) -> Response {
    let payload = match req.json() {
        Ok(payload) => payload,
        Err(e) => return invalid(ValidationErrors::malformed_json(&e)),
    };
    let data = match validate_new(&payload) {
        Ok(data) => data,
        Err(errors) => return invalid(errors),
    };
    match state.students.create(data).await {
        Ok(student) => ResponseModel::new(student, "Student added successfully.").into_response(),
        Err(e) => store_failure(e),
    }
}

/// `GET /student/{id}`
pub async fn get_student(state: Arc<AppState>, req: Request) -> Response {
    match state.students.get(&id_param(&req)).await {
        Ok(Some(student)) => {
            ResponseModel::new(student, "Student data retrieved successfully").into_response()
        }
        Ok(None) => {
            ErrorResponseModel::new("An error occurred.", Status::NotFound, "Student doesn't exist.")
                .into_response()
        }
        Err(e) => store_failure(e),
    }
}

/// `PUT /student/{id}`
pub async fn update_student(state: Arc<AppState>, req: Request) -> Response {
    let id = id_param(&req);
    let payload = match req.json() {
        Ok(payload) => payload,
        Err(e) => return invalid(ValidationErrors::malformed_json(&e)),
    };
    let patch = match validate_patch(&payload) {
        Ok(patch) => patch,
        Err(errors) => return invalid(errors),
    };
    match state.students.update(&id, patch).await {
        Ok(true) => ResponseModel::new(
            format!("Student with ID: {id} updated successfully"),
            "Student record updated successfully.",
        )
        .into_response(),
        Ok(false) => ErrorResponseModel::new(
            "An error occurred",
            Status::NotFound,
            "There was an error updating the student data.",
        )
        .into_response(),
        Err(e) => store_failure(e),
    }
}

/// `DELETE /student/{id}`
pub async fn delete_student(state: Arc<AppState>, req: Request) -> Response {
    let id = id_param(&req);
    match state.students.delete(&id).await {
        Ok(true) => ResponseModel::new(
            format!("Student with ID: {id} removed"),
            "Student deleted successfully",
        )
        .into_response(),
        Ok(false) => ErrorResponseModel::new(
            "An error occurred",
            Status::NotFound,
            format!("Student with id {id} doesn't exist"),
        )
        .into_response(),
        Err(e) => store_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::app::{AppState, router};
    use crate::method::Method;
    use crate::request::Request;
    use crate::response::Response;
    use crate::router::Router;
    use crate::store::MemoryStore;
    use crate::store::testing::DownStore;

    fn app() -> Router<AppState> {
        router(AppState::new(std::sync::Arc::new(MemoryStore::new())))
    }

    fn body(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    async fn send(app: &Router<AppState>, method: Method, path: &str, payload: Option<Value>) -> Response {
        let mut req = Request::new(method, path);
        if let Some(p) = payload {
            req = req.with_body(serde_json::to_vec(&p).unwrap());
        }
        app.handle(req).await
    }

    fn john() -> Value {
        json!({
            "fullname": "John Doe",
            "email": "jdoe@x.edu.ng",
            "course_of_study": "Water resources engineering",
            "year": 2,
            "gpa": 3.0
        })
    }

    async fn create(app: &Router<AppState>) -> String {
        let res = send(app, Method::Post, "/student/", Some(john())).await;
        body(&res)["data"][0]["id"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn empty_list_has_its_own_message() {
        let res = send(&app(), Method::Get, "/student/", None).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(body(&res), json!({"data": [[]], "code": 200, "message": "Empty list returned"}));
    }

    #[tokio::test]
    async fn create_returns_record_with_generated_id() {
        let app = app();
        let res = send(&app, Method::Post, "/student/", Some(john())).await;
        assert_eq!(res.status_code(), 200);
        let body = body(&res);
        assert_eq!(body["message"], "Student added successfully.");
        let record = &body["data"][0];
        assert_eq!(record["id"].as_str().unwrap().len(), 24);
        for field in ["fullname", "email", "course_of_study", "year", "gpa"] {
            assert_eq!(record[field], john()[field], "{field}");
        }
    }

    #[tokio::test]
    async fn list_includes_created_record() {
        let app = app();
        let id = create(&app).await;
        let res = send(&app, Method::Get, "/student", None).await;
        let body = body(&res);
        assert_eq!(body["message"], "Students data retrieved successfully");
        let list = body["data"][0].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], id);
    }

    #[tokio::test]
    async fn invalid_payload_is_422_with_details() {
        let mut bad = john();
        bad["year"] = json!(9);
        bad["gpa"] = json!(4.01);
        let res = send(&app(), Method::Post, "/student/", Some(bad)).await;
        assert_eq!(res.status_code(), 422);
        let detail = body(&res)["detail"].as_array().unwrap().clone();
        let locs: Vec<_> = detail.iter().map(|d| d["loc"][1].clone()).collect();
        assert_eq!(locs, [json!("year"), json!("gpa")]);
    }

    #[tokio::test]
    async fn non_json_body_is_422() {
        let app = app();
        let res = app.handle(Request::new(Method::Post, "/student/").with_body("fullname=John")).await;
        assert_eq!(res.status_code(), 422);
        assert_eq!(body(&res)["detail"][0]["type"], "value_error.jsondecode");
    }

    #[tokio::test]
    async fn get_missing_is_404_envelope() {
        for id in ["507f1f77bcf86cd799439011", "not-an-id"] {
            let res = send(&app(), Method::Get, &format!("/student/{id}"), None).await;
            assert_eq!(res.status_code(), 404);
            assert_eq!(
                body(&res),
                json!({"error": "An error occurred.", "code": 404, "message": "Student doesn't exist."}),
            );
        }
    }

    #[tokio::test]
    async fn update_then_get_shows_patch() {
        let app = app();
        let id = create(&app).await;
        let res = send(&app, Method::Put, &format!("/student/{id}"), Some(json!({"gpa": 3.9}))).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(body(&res)["data"][0], format!("Student with ID: {id} updated successfully"));
        assert_eq!(body(&res)["message"], "Student record updated successfully.");

        let res = send(&app, Method::Get, &format!("/student/{id}"), None).await;
        assert_eq!(body(&res)["data"][0]["gpa"], 3.9);
        assert_eq!(body(&res)["data"][0]["fullname"], "John Doe");
    }

    #[tokio::test]
    async fn empty_update_is_404_like_missing() {
        let app = app();
        let id = create(&app).await;
        let empty = send(&app, Method::Put, &format!("/student/{id}"), Some(json!({}))).await;
        let missing = send(&app, Method::Put, "/student/507f1f77bcf86cd799439011", Some(json!({"year": 3}))).await;
        assert_eq!(empty.status_code(), 404);
        assert_eq!(body(&empty), body(&missing));
    }

    #[tokio::test]
    async fn update_validates_present_fields() {
        let app = app();
        let id = create(&app).await;
        let res = send(&app, Method::Put, &format!("/student/{id}"), Some(json!({"year": 0}))).await;
        assert_eq!(res.status_code(), 422);
    }

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let app = app();
        let id = create(&app).await;
        let res = send(&app, Method::Delete, &format!("/student/{id}"), None).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(body(&res)["message"], "Student deleted successfully");

        let res = send(&app, Method::Delete, &format!("/student/{id}"), None).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(body(&res)["message"], format!("Student with id {id} doesn't exist"));

        let res = send(&app, Method::Get, &format!("/student/{id}"), None).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn store_failure_is_500_envelope_on_every_route() {
        let app = router(AppState::new(std::sync::Arc::new(DownStore)));
        let id = "507f1f77bcf86cd799439011";
        let requests = [
            (Method::Get, "/student/".to_owned(), None),
            (Method::Post, "/student/".to_owned(), Some(john())),
            (Method::Get, format!("/student/{id}"), None),
            (Method::Put, format!("/student/{id}"), Some(json!({"gpa": 3.9}))),
            (Method::Delete, format!("/student/{id}"), None),
        ];
        for (method, path, payload) in requests {
            let res = send(&app, method, &path, payload).await;
            assert_eq!(res.status_code(), 500, "{method} {path}");
            assert_eq!(
                body(&res),
                json!({
                    "error": "Internal server error",
                    "code": 500,
                    "message": "The student store is unavailable."
                }),
                "{method} {path}",
            );
        }
    }
}
