//! User registration

pub mod dto;
pub mod service;

pub use dto::{RegisterRequest, RegisteredUser};
pub use service::AuthService;
