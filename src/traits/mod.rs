//! Operations shared by several resource façades.
//!
//! Each façade implements the traits its endpoints support, so generic code
//! can fetch, list or update any resource kind the same way.

mod get;
mod list;
mod update;

pub use get::Get;
pub use list::{List, DEFAULT_LIST_ALL_PAGE_SIZE, DEFAULT_PAGE_SIZE};
pub use update::Update;
