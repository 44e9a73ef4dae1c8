use crate::{
    data::course::CourseId,
    routes::{
        courses::{get_course, get_courses, get_new_course, post_course, post_new_course},
        delete_course::post_delete_course,
        index::get_index_route,
    },
    state::CourseAdminState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer};

pub mod courses;
pub mod delete_course;
pub mod index;

pub const COURSES_PATH: &str = "/courses";
pub const NEW_COURSE_PATH: &str = "/courses/new";
const MAX_FORM_BYTES: usize = 64 * 1024;

pub fn course_path(id: CourseId) -> String {
    format!("{COURSES_PATH}/{id}")
}

pub fn delete_course_path(id: CourseId) -> String {
    format!("{COURSES_PATH}/{id}/delete")
}

pub fn router(state: CourseAdminState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(COURSES_PATH, get(get_courses))
        .route(NEW_COURSE_PATH, get(get_new_course).post(post_new_course))
        .route("/courses/{course_id}", get(get_course).post(post_course))
        .route("/courses/{course_id}/delete", post(post_delete_course))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{admin_api::AdminApi, state::CourseAdminState};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, Response, StatusCode, header},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    pub async fn send(api: Arc<dyn AdminApi>, request: Request<Body>) -> Response<Body> {
        super::router(CourseAdminState::new(api))
            .oneshot(request)
            .await
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    pub fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn assert_redirect(response: &Response<Body>, to: &str) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
            to
        );
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
