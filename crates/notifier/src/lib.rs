//! Push notification delivery for newly detected signals.
//!
//! Each signal gets exactly one delivery attempt.

pub mod onesignal;
