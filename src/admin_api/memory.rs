use super::{AdminApi, SaveCourse};
use crate::{
    data::course::{Course, CourseId},
    error::{AdminError, AdminResult},
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

/// In-memory courses, plus a log of which ids were asked to be deleted.
#[derive(Default)]
pub struct MemoryAdminApi {
    courses: Mutex<BTreeMap<CourseId, Course>>,
    deletions: Mutex<Vec<CourseId>>,
}

impl MemoryAdminApi {
    pub fn with_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        Self {
            courses: Mutex::new(courses.into_iter().map(|c| (c.id, c)).collect()),
            deletions: Mutex::default(),
        }
    }

    fn courses(&self) -> MutexGuard<'_, BTreeMap<CourseId, Course>> {
        self.courses.lock().unwrap()
    }

    pub fn snapshot(&self) -> Vec<Course> {
        self.courses().values().cloned().collect()
    }

    pub fn deletions(&self) -> Vec<CourseId> {
        self.deletions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminApi for MemoryAdminApi {
    async fn get_course(&self, id: CourseId) -> AdminResult<Option<Course>> {
        Ok(self.courses().get(&id).cloned())
    }

    async fn save_course(&self, save: SaveCourse) -> AdminResult<Course> {
        let mut courses = self.courses();

        let course = match save {
            SaveCourse::Create(fields) => {
                let (name, description) = fields.into_parts();
                Course {
                    id: CourseId::new_random(),
                    name,
                    description,
                }
            }
            SaveCourse::Update { id, fields } => {
                if !courses.contains_key(&id) {
                    return Err(AdminError::MissingCourse { id });
                }
                let (name, description) = fields.into_parts();
                Course {
                    id,
                    name,
                    description,
                }
            }
        };

        courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn delete_course(&self, id: CourseId) -> AdminResult<()> {
        self.deletions.lock().unwrap().push(id);
        self.courses().remove(&id);
        Ok(())
    }

    async fn list_courses(&self) -> AdminResult<Vec<Course>> {
        let mut courses = self.snapshot();
        courses.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(courses)
    }
}

/// Every call fails like a database that went away.
pub struct FailingAdminApi;

#[async_trait]
impl AdminApi for FailingAdminApi {
    async fn get_course(&self, _id: CourseId) -> AdminResult<Option<Course>> {
        Err(AdminError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        })
    }

    async fn save_course(&self, _save: SaveCourse) -> AdminResult<Course> {
        Err(AdminError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        })
    }

    async fn delete_course(&self, _id: CourseId) -> AdminResult<()> {
        Err(AdminError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        })
    }

    async fn list_courses(&self) -> AdminResult<Vec<Course>> {
        Err(AdminError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        })
    }
}
