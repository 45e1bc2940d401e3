//! User-facing messages
//!
//! Ledger operations report their outcome to the user as a [`Notice`]
//! (a title plus a body, like a mobile alert dialog).

pub mod notice;
pub use notice::*;
