//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): endpoint, resolution and configuration errors
//! - [`IoResultExt`](context::IoResultExt): io::Error to `NetError` conversion

pub mod context;
pub mod neterror;
