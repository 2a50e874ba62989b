mod object_store;
mod record_store;

pub use object_store::{IObjectStore, StoredObject};
pub use record_store::{Filter, IRecordStore, Query, Row};
