//! `taller-app`: view state and the `taller` command-line front end.
//!
//! The stores here hold what a list screen shows (current page, totals, the
//! last error) and drive a [`taller_client::PagedSource`]; the CLI is one
//! consumer of them.

pub mod cli;
pub mod credentials;
pub mod guard;
pub mod list;
pub mod load_more;

pub use credentials::FileCredentialStore;
pub use guard::{GuardView, PermissionGuard, RESTRICTED_MESSAGE};
pub use list::PagedList;
pub use load_more::LoadMore;
