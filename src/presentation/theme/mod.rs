//! Theme palette and detection.

mod service;

pub use service::{Theme, prefers_dark};
