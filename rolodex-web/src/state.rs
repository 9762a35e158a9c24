use crate::error::{WebError, WebResult};
use rolodex::store::BoxedStore;
use rolodex_driver::{Driver, DriverResult};
use std::sync::Arc;

pub type SharedDriver = Driver<BoxedStore<'static>>;

#[derive(Clone)]
pub struct AppState {
    driver: Arc<SharedDriver>,
}

impl AppState {
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }

    /// Store calls block (SQLite), so they run off the async workers.
    pub async fn run<F, T>(&self, f: F) -> WebResult<T>
    where
        F: FnOnce(&SharedDriver) -> DriverResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let driver = self.driver.clone();
        let result = tokio::task::spawn_blocking(move || f(&driver)).await?;
        result.map_err(WebError::from)
    }
}
