use crate::{data::course::CourseId, maud_conveniences::render_page};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AdminError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse max DB connections"))]
    ParseMaxConnections { source: ParseIntError },
    #[snafu(display("Unable to find course with ID: {}", id))]
    MissingCourse { id: CourseId },
}

impl AdminError {
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::ParseMaxConnections { .. } => {
                ISE
            }
            Self::MissingCourse { .. } => NF,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        error!(?self, %status_code, "Error!");

        let page = render_page(html! {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                strong class="font-bold" {"Course Admin Error: "}
                span {(self.to_string())}
            }
            a href="/courses" class="hover:text-blue-300 underline" {"Back to all courses"}
        });

        (status_code, Html(page)).into_response()
    }
}
