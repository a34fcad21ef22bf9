pub mod request;
pub mod response;

pub use request::Page;
pub use response::{ApiResponse, ListResponse, RawResponse, RemoteError};
