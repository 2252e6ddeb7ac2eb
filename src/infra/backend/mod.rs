//! Client side of the to-do REST backend.

pub mod error;
pub mod http;
pub mod traits;

pub use error::ApiError;
pub use http::HttpBackend;
pub use traits::TodoBackend;
