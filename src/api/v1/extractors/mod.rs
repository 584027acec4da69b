mod current_user;

pub use current_user::{AccessOutcome, CurrentUser, CurrentUserExtractor};
