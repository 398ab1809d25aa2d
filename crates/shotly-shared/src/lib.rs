//! # shotly-shared
//!
//! Domain model shared by every Shotly crate: visitor identity, activity
//! records (reactions and comments), the reaction palette, and common
//! constants.  Everything here is plain data — no I/O, no async.

pub mod activity;
pub mod constants;
pub mod error;
pub mod identity;
pub mod palette;
pub mod types;

pub use activity::{ActivityKind, ActivityRecord, Actor};
pub use error::IdentityError;
pub use identity::Identity;
pub use types::{ActivityId, PhotoId, VisitorId};
