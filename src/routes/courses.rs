use crate::{
    admin_api::SaveCourse,
    data::course::{Course, CourseId},
    error::AdminResult,
    maud_conveniences::{
        errors_list, escape, field_error, form_element, form_submit_button, render_page,
        render_table, simple_form_element, title,
    },
    routes::{COURSES_PATH, NEW_COURSE_PATH, course_path, delete_course_path},
    state::CourseAdminState,
    validation::{CourseField, FieldErrors, ValidCourse, validate},
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use std::collections::HashMap;

/// Raw form values, kept as submitted so they can be shown again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
}

impl FormFields {
    pub fn from_submission(submission: &HashMap<String, String>) -> Self {
        let echo = |field: CourseField| submission.get(field.key()).cloned().unwrap_or_default();

        Self {
            name: echo(CourseField::Name),
            description: echo(CourseField::Description),
        }
    }

    fn value(&self, field: CourseField) -> &str {
        match field {
            CourseField::Name => &self.name,
            CourseField::Description => &self.description,
        }
    }
}

impl From<&Course> for FormFields {
    fn from(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            description: course.description.clone(),
        }
    }
}

/// What a failed submission needs to redraw the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionData {
    pub form_values: FormFields,
    pub form_errors: FieldErrors,
}

pub async fn get_courses(State(state): State<CourseAdminState>) -> AdminResult<Markup> {
    let rows = state
        .api()
        .list_courses()
        .await?
        .into_iter()
        .map(|course| {
            [
                html! {
                    a class="hover:text-blue-300 underline" href=(course_path(course.id)) {(course.name)}
                },
                escape(course.description),
            ]
        })
        .collect();

    Ok(render_page(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            (render_table("Courses", ["Name", "Description"], rows))
            a href=(NEW_COURSE_PATH) class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded text-center" {
                "Add new Course"
            }
        }
    }))
}

pub async fn get_new_course() -> Markup {
    render_page(course_form(
        "New Course",
        NEW_COURSE_PATH,
        None,
        &ActionData::default(),
    ))
}

pub async fn post_new_course(
    State(state): State<CourseAdminState>,
    Form(submission): Form<HashMap<String, String>>,
) -> AdminResult<Response> {
    run_form_action(
        &state,
        &submission,
        SaveCourse::Create,
        "New Course",
        NEW_COURSE_PATH,
        None,
    )
    .await
}

pub async fn get_course(
    State(state): State<CourseAdminState>,
    Path(course_id): Path<String>,
) -> AdminResult<Response> {
    let Ok(id) = course_id.parse::<CourseId>() else {
        debug!(?course_id, "Unparseable course id, redirecting to all courses");
        return Ok(Redirect::to(COURSES_PATH).into_response());
    };
    let Some(course) = state.api().get_course(id).await? else {
        debug!(%id, "No such course, redirecting to all courses");
        return Ok(Redirect::to(COURSES_PATH).into_response());
    };

    let action_data = ActionData {
        form_values: FormFields::from(&course),
        form_errors: FieldErrors::new(),
    };

    Ok(render_page(course_form(
        "Edit Course",
        &course_path(id),
        Some(id),
        &action_data,
    ))
    .into_response())
}

pub async fn post_course(
    State(state): State<CourseAdminState>,
    Path(course_id): Path<String>,
    Form(submission): Form<HashMap<String, String>>,
) -> AdminResult<Response> {
    let Ok(id) = course_id.parse::<CourseId>() else {
        debug!(?course_id, "Tried to update unparseable course id");
        return Ok(Redirect::to(COURSES_PATH).into_response());
    };

    run_form_action(
        &state,
        &submission,
        |fields| SaveCourse::Update { id, fields },
        "Edit Course",
        &course_path(id),
        Some(id),
    )
    .await
}

async fn run_form_action(
    state: &CourseAdminState,
    submission: &HashMap<String, String>,
    to_save: impl FnOnce(ValidCourse) -> SaveCourse,
    heading: &'static str,
    form_action: &str,
    delete_for: Option<CourseId>,
) -> AdminResult<Response> {
    match validate(submission) {
        Ok(fields) => {
            let course = state.api().save_course(to_save(fields)).await?;
            info!(id = %course.id, name = ?course.name, "Saved course");

            Ok(Redirect::to(&course_path(course.id)).into_response())
        }
        Err(validation_error) => {
            debug!(failing = ?validation_error.field_errors().keys().collect::<Vec<_>>(), "Course form failed validation");

            let action_data = ActionData {
                form_values: FormFields::from_submission(submission),
                form_errors: validation_error.into_field_errors(),
            };

            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render_page(course_form(heading, form_action, delete_for, &action_data)),
            )
                .into_response())
        }
    }
}

fn course_form(
    heading: &'static str,
    form_action: &str,
    delete_for: Option<CourseId>,
    ActionData {
        form_values,
        form_errors,
    }: &ActionData,
) -> Markup {
    let error_for = |field: CourseField| form_errors.get(&field).copied();

    html! {
        div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-md" {
            (title(heading))
            @if !form_errors.is_empty() {
                @let messages = form_errors
                    .iter()
                    .map(|(field, message)| format!("{}: {message}", field.label()))
                    .collect::<Vec<_>>();
                (errors_list(messages.iter().map(String::as_str)))
            }
            form method="post" action=(form_action) {
                (simple_form_element(
                    CourseField::Name.key(),
                    CourseField::Name.label(),
                    true,
                    None,
                    Some(form_values.value(CourseField::Name)),
                ))
                (field_error(error_for(CourseField::Name)))
                (form_element(CourseField::Description.key(), CourseField::Description.label(), html! {
                    textarea id=(CourseField::Description.key()) name=(CourseField::Description.key()) rows="4" required class="w-full bg-gray-700 text-gray-100 rounded px-4 py-2 border border-gray-600 focus:outline-none focus:ring focus:ring-blue-500 placeholder-gray-400 resize-y" {
                        (form_values.value(CourseField::Description))
                    }
                }))
                (field_error(error_for(CourseField::Description)))
                (form_submit_button(Some("Save Course")))
            }
            @if let Some(id) = delete_for {
                br;
                form method="post" action=(delete_course_path(id)) {
                    button type="submit" class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" {
                        "Delete course"
                    }
                }
            }
        }
    }
}
