//! Client controller for ticklist.
//!
//! Talks to a ticklist server over HTTP, or to the single-file JSON
//! store directly, and re-renders the full list after every mutation.

pub mod controller;
pub mod http;
pub mod render;
