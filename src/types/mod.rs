//! Core marker types

pub mod phase;
