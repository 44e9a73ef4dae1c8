use crate::{
    data::course::CourseId, error::AdminResult, routes::COURSES_PATH, state::CourseAdminState,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
};

pub async fn post_delete_course(
    State(state): State<CourseAdminState>,
    Path(course_id): Path<String>,
) -> AdminResult<Redirect> {
    match course_id.parse::<CourseId>() {
        Ok(id) => {
            state.api().delete_course(id).await?;
            info!(%id, "Deleted course");
        }
        //can't be stored, so there's nothing to delete
        Err(_) => debug!(?course_id, "Tried to delete unparseable course id"),
    }

    Ok(Redirect::to(COURSES_PATH))
}

#[cfg(test)]
mod tests {
    use crate::{
        admin_api::memory::{FailingAdminApi, MemoryAdminApi},
        data::course::{Course, CourseId},
        routes::{
            delete_course_path,
            test_utils::{assert_redirect, post_form, send},
        },
    };
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn delete_removes_course_and_redirects() {
        let course = Course {
            id: CourseId::new_random(),
            name: "Rust 101".to_string(),
            description: "Ownership".to_string(),
        };
        let api = Arc::new(MemoryAdminApi::with_courses([course.clone()]));

        let response = send(api.clone(), post_form(&delete_course_path(course.id), "")).await;

        assert_redirect(&response, "/courses");
        assert!(api.snapshot().is_empty());
        assert_eq!(api.deletions(), vec![course.id]);
    }

    #[tokio::test]
    async fn deleting_missing_course_still_redirects() {
        let api = Arc::new(MemoryAdminApi::default());
        let missing = CourseId::new_random();

        let response = send(api.clone(), post_form(&delete_course_path(missing), "")).await;

        assert_redirect(&response, "/courses");
        assert_eq!(api.deletions(), vec![missing]);
    }

    #[tokio::test]
    async fn deleting_unparseable_id_redirects_without_calling_api() {
        let api = Arc::new(MemoryAdminApi::default());

        let response = send(api.clone(), post_form("/courses/nope/delete", "")).await;

        assert_redirect(&response, "/courses");
        assert!(api.deletions().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_is_an_error_page() {
        let response = send(
            Arc::new(FailingAdminApi),
            post_form(&delete_course_path(CourseId::new_random()), ""),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
