mod sqlite_store;

pub use sqlite_store::{connect, init_schema, SqliteKeyValueStore, SqliteLocalStore};
