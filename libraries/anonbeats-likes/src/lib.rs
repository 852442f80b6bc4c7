//! Anonbeats Likes
//!
//! Optimistic synchronizer for the liked-tracks set.
//!
//! The liked set is the item list of the reserved liked playlist on the
//! server. Each view holds a [`LikesSync`]: liking flips the local entry
//! immediately, confirms against the backend, and rolls back on a definite
//! failure. Instances sharing a [`LikesChannel`] see each other's confirmed
//! changes through a broadcast event plus a monotonically increasing
//! version marker checked on focus.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod sync;

pub use backend::{HttpLikesBackend, LikesBackend};
pub use error::{LikesError, Result};
pub use sync::{LikeState, LikesChannel, LikesEvent, LikesSync};
