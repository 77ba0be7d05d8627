//! Build HTTP/1.1 responses in memory and render them to wire text.
//!
//! ```
//! use hreinn::http::{Response, header::Header, status::Status};
//!
//! let response = Response::from_parts(
//!     Status::with_reason("1.1", 200, "OK"),
//!     Header::from([("Content-Type", "text/plain")]),
//!     "hello",
//! );
//! assert_eq!(
//!     response.format(),
//!     "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello\r\n"
//! );
//! ```
pub mod http;

pub use http::Response;
pub use http::date::Date;
pub use http::error::{Error, Result};
pub use http::header::{Header, HeaderValue};
pub use http::status::{Field, Status, StatusArgs, Value};
