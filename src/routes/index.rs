use crate::routes::COURSES_PATH;
use axum::response::Redirect;

pub async fn get_index_route() -> Redirect {
    Redirect::to(COURSES_PATH)
}
