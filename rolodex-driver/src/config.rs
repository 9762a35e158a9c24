//! Store selection shared by the command line tool and the web server.

use crate::{Driver, DriverError};
use rolodex::store::{BoxedStore, ContactStore};
use rolodex::MemoryStore;
use rolodex_sqlite::{SqliteError, SqliteStore};
use structopt::StructOpt;
use thiserror::Error;

#[derive(StructOpt, Debug, Clone)]
pub struct StoreOpt {
    /// SQLite database path
    #[structopt(long = "db", env = "ROLODEX_DB", default_value = "rolodex.sqlite3")]
    pub db_path: String,
    /// Keep contacts in memory only; nothing survives the process
    #[structopt(long)]
    pub memory: bool,
    /// Load sample contacts when the store is empty
    #[structopt(long)]
    pub seed: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("opening contact database: {0}")]
    Sqlite(#[from] SqliteError),
    #[error("seeding contacts: {0}")]
    Seed(#[from] DriverError),
}

impl StoreOpt {
    pub fn open(&self) -> Result<Driver<BoxedStore<'static>>, ConfigError> {
        let store = if self.memory {
            log::info!("using in-memory contact store");
            MemoryStore::new().boxed()
        } else {
            SqliteStore::connect(&self.db_path)?.boxed()
        };

        let driver = Driver::new(store);
        if self.seed {
            driver.seed()?;
        }
        Ok(driver)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn memory_store_with_seed() {
        let opt = StoreOpt::from_iter(&["rolodex", "--memory", "--seed"]);
        let driver = opt.open().unwrap();
        assert!(!driver.list_contacts(None).unwrap().is_empty());
    }

    #[test]
    fn defaults_to_sqlite_file() {
        let opt = StoreOpt::from_iter_safe(&["rolodex"]).unwrap();
        assert!(!opt.memory);
        assert!(!opt.seed);
        assert!(!opt.db_path.is_empty());
    }
}
