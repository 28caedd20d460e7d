//! Handler module - frame routing and dispatch.
//!
//! Provides [`FrameRouter`], which turns raw connection bytes into
//! dispatched method bodies for one protocol version.

mod router;

pub use router::{FrameRouter, RouteError, Routed};
