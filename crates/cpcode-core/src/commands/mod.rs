//! High-level commands for cpcode actions.
//!
//! These are the user-triggered actions: copy a code link (optionally with
//! a forced refresh) and clear cached resolutions. They are the only layer
//! that turns failures into user-facing errors; frontends decide how to
//! display them.

pub mod cache;
pub mod copy_link;
pub mod error;

pub use cache::{ClearCacheCommand, ClearCacheReport};
pub use copy_link::{Clipboard, CopyLinkCommand, CopyLinkOptions, CopyLinkReport};
pub use error::CopyLinkError;
