pub mod auth;
pub mod bulk;
pub mod issues;

pub use auth::handle_auth;
pub use bulk::{handle_bulk_delete, handle_bulk_spam};
pub use issues::handle_find;
