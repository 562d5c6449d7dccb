//! Handler Layer
//!
//! Validates incoming requests at the service boundary.

pub mod request_validator;

pub use request_validator::RequestValidator;
