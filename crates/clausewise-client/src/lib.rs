//! Client side of the upload endpoint.

pub mod http;

pub use http::{ClientError, UploadClient};
