mod manager;
mod snapshot;

pub use manager::SessionManager;
pub use snapshot::SessionSnapshot;
