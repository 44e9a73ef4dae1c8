use crate::admin_api::AdminApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct CourseAdminState {
    api: Arc<dyn AdminApi>,
}

impl CourseAdminState {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn AdminApi {
        self.api.as_ref()
    }

    pub async fn sensible_shutdown(&self) {
        self.api.close().await;
    }
}
