//! Data access: remote CRUD mirrored into the local stores.
//!
//! One handle per entity family. Each handle owns its remote client and
//! the shared store(s) it mirrors into; nothing here is an ambient
//! singleton. Store mutation happens strictly after remote confirmation,
//! so a failed call leaves the caches untouched.

mod finance;
mod projects;
mod tasks;
mod users;

pub use finance::FinanceDb;
pub use projects::ProjectDb;
pub use tasks::TaskDb;
pub use users::UserDb;
