//! Ports Layer
//!
//! Defines the driving port for external callers. The engine has no driven
//! ports: it performs no I/O.

pub mod inbound;

pub use inbound::FilterApi;
