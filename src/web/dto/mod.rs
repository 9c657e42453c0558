//! Data Transfer Objects for the HTTP surface.

pub mod response;

pub use response::*;
