//! Request handlers bound by the route table.
//!
//! Message storage and token generation live outside this crate; the message
//! actions here only describe that fact to the client. Pages and the
//! not-found response are complete.

pub mod messages;
pub mod not_found;
pub mod pages;

pub use messages::{delete_message, new_message, show_message};
pub use not_found::not_found;
pub use pages::{index, styleguide};
