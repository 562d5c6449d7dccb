//! Events Layer - request and response message types

pub mod requests;
pub mod responses;

pub use requests::{AddItemRequest, MembershipQuery, UpdateSettingsRequest};
pub use responses::{
    error_codes, ErrorResponse, FilterState, MembershipResponse, MemorySizeResponse,
    MessageResponse,
};
