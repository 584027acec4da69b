pub mod error;
pub mod user_repo;
pub mod user_store;

pub use user_repo::UserRecord;
pub use user_store::{InMemoryUserStore, PgUserStore, UserStore};
