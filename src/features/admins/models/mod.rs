mod admin;

pub use admin::{Admin, ADMIN_COLUMNS};
