//! Request handlers.
//!
//! Handlers deserialize the request, delegate to the pure functions in
//! `intent_lens_core` and map errors via [`crate::error::AppError`].

pub mod intent_lens;
