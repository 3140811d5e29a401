// devdash-api: Async Rust client for the devdash auth service

pub mod client;
pub mod endpoint;
pub mod error;
pub mod groups;
pub mod models;
pub mod session;
pub mod transport;

pub use client::{AuthApiClient, Reply};
pub use endpoint::Endpoint;
pub use error::Error;
pub use models::{
    ApiGroup, ApiUser, CheckAuthResponse, GeneratePasswordResponse, GroupCheckResponse,
    LoginResponse, LogoutResponse,
};
pub use transport::{TlsMode, TransportConfig};
