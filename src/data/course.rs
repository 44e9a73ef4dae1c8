use crate::{
    error::{AdminResult, MakeQuerySnafu, MissingCourseSnafu},
    validation::ValidCourse,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use sqlx::{FromRow, PgConnection};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for CourseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for CourseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(Self)
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
}

impl Course {
    pub async fn get_from_db_by_id(
        id: CourseId,
        conn: &mut PgConnection,
    ) -> AdminResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, description FROM public.courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }

    pub async fn get_all(conn: &mut PgConnection) -> AdminResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, description FROM public.courses ORDER BY name, id",
        )
        .fetch(conn)
        .try_collect()
        .await
        .context(MakeQuerySnafu)
    }

    pub async fn insert_into_database(
        to_be_added: ValidCourse,
        conn: &mut PgConnection,
    ) -> AdminResult<Self> {
        let (name, description) = to_be_added.into_parts();

        sqlx::query_as::<_, Self>(
            "INSERT INTO public.courses (id, name, description) VALUES ($1, $2, $3) RETURNING id, name, description",
        )
        .bind(CourseId::new_random())
        .bind(name)
        .bind(description)
        .fetch_one(conn)
        .await
        .context(MakeQuerySnafu)
    }

    pub async fn update_in_database(
        id: CourseId,
        to_be_updated: ValidCourse,
        conn: &mut PgConnection,
    ) -> AdminResult<Self> {
        let (name, description) = to_be_updated.into_parts();

        sqlx::query_as::<_, Self>(
            "UPDATE public.courses SET name = $2, description = $3 WHERE id = $1 RETURNING id, name, description",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)?
        .context(MissingCourseSnafu { id })
    }

    //missing rows are fine - the end state is the same
    pub async fn remove_from_database(id: CourseId, conn: &mut PgConnection) -> AdminResult<()> {
        sqlx::query("DELETE FROM public.courses WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_ids_round_trip_through_paths() {
        let id = CourseId::new_random();
        let parsed: CourseId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn garbage_is_not_a_course_id() {
        assert!("not-a-course".parse::<CourseId>().is_err());
        assert!("".parse::<CourseId>().is_err());
    }
}
