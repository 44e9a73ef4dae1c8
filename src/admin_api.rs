use crate::{
    config::RuntimeConfiguration,
    data::course::{Course, CourseId},
    error::{AdminResult, GetDatabaseConnectionSnafu, MigrateSnafu, OpenDatabaseSnafu},
    validation::ValidCourse,
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveCourse {
    Create(ValidCourse),
    Update { id: CourseId, fields: ValidCourse },
}

/// Everything the course pages are allowed to do to stored courses.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn get_course(&self, id: CourseId) -> AdminResult<Option<Course>>;

    /// Updating a course that doesn't exist is a `MissingCourse` error.
    async fn save_course(&self, save: SaveCourse) -> AdminResult<Course>;

    /// Deleting a course that doesn't exist succeeds.
    async fn delete_course(&self, id: CourseId) -> AdminResult<()>;

    async fn list_courses(&self) -> AdminResult<Vec<Course>>;

    async fn close(&self) {}
}

#[derive(Clone, Debug)]
pub struct PostgresAdminApi {
    pool: Pool<Postgres>,
}

impl PostgresAdminApi {
    pub async fn connect(options: PgPoolOptions, config: &RuntimeConfiguration) -> AdminResult<Self> {
        let pool = options
            .connect(&config.db_config().get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> AdminResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl AdminApi for PostgresAdminApi {
    async fn get_course(&self, id: CourseId) -> AdminResult<Option<Course>> {
        Course::get_from_db_by_id(id, &mut *self.get_connection().await?).await
    }

    async fn save_course(&self, save: SaveCourse) -> AdminResult<Course> {
        let mut conn = self.get_connection().await?;

        match save {
            SaveCourse::Create(fields) => Course::insert_into_database(fields, &mut conn).await,
            SaveCourse::Update { id, fields } => {
                Course::update_in_database(id, fields, &mut conn).await
            }
        }
    }

    async fn delete_course(&self, id: CourseId) -> AdminResult<()> {
        Course::remove_from_database(id, &mut *self.get_connection().await?).await
    }

    async fn list_courses(&self) -> AdminResult<Vec<Course>> {
        Course::get_all(&mut *self.get_connection().await?).await
    }

    async fn close(&self) {
        info!("closing database pool");
        self.pool.close().await;
    }
}
