use std::fmt::Display;

use bytes::Bytes;

use date::Date;
use header::Header;
use status::Status;

pub mod date;
pub mod error;
pub mod header;
pub mod status;

pub const CRLF: &str = "\r\n";

/// A complete response: status line, header block and body.
///
/// Nothing ties the body to a `Content-Length` field unless
/// [`Response::set_content_length`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    header: Header,
    body: String,
}

impl Response {
    pub fn new(status: Status, header: Header) -> Response {
        Self::from_parts(status, header, String::new())
    }

    pub fn from_parts(status: Status, header: Header, body: impl Into<String>) -> Response {
        Response {
            status,
            header,
            body: body.into(),
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn into_parts(self) -> (Status, Header, String) {
        (self.status, self.header, self.body)
    }

    /// Sets `Content-Length` to the UTF-8 length of the current body.
    pub fn set_content_length(&mut self) {
        self.header.insert("Content-Length", self.body.len());
    }

    pub fn set_date(&mut self, date: Date) {
        self.header.insert("Date", date);
    }

    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn encode(&self) -> Bytes {
        let text = self.format();
        tracing::trace!(
            status_code = self.status.status_code(),
            fields = self.header.len(),
            length = text.len(),
            "encode response"
        );
        Bytes::from(text)
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{CRLF}{}{CRLF}{}{CRLF}",
            self.status, self.header, self.body
        )
    }
}

fn empty(status: Status) -> Response {
    Response::new(status, Header::new())
}

pub fn ok() -> Response {
    empty(Status::ok())
}

pub fn not_found() -> Response {
    empty(Status::not_found())
}

pub fn bad_request() -> Response {
    empty(Status::bad_request())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let response = Response::from_parts(
            Status::with_reason("1.1", 200, "OK"),
            Header::from([("Content-Type", "text/plain")]),
            "hello",
        );
        assert_eq!(
            response.format(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello\r\n"
        );
    }

    #[test]
    fn test_format_empty_body_and_header() {
        let response = Response::new(Status::new("1.1", 204), Header::new());
        assert_eq!(response.format(), "HTTP/1.1 204 \r\n\r\n\r\n\r\n");
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_encode_matches_format() {
        let response = Response::from_parts(
            Status::with_reason("1.1", 200, "OK"),
            Header::from([("Content-Type", "text/plain; charset=utf-8")]),
            "héllo",
        );
        assert_eq!(&response.encode()[..], response.format().as_bytes());
        assert!(logs_contain("encode response"));
    }

    #[test]
    fn test_into_parts() {
        let response = Response::from_parts(Status::created(), Header::from([("X-Id", "7")]), "made");
        let (status, header, body) = response.into_parts();

        assert_eq!(status, Status::created());
        assert_eq!(header.format(), "X-Id: 7\r\n");
        assert_eq!(body, "made");
    }

    #[test]
    fn test_content_length_is_opt_in() {
        let mut response = Response::from_parts(Status::ok(), Header::new(), "héllo");
        assert!(!response.header().contains_key("Content-Length"));

        response.set_content_length();
        assert_eq!(
            response.format(),
            "HTTP/1.1 200 OK\r\nContent-Length: 6\r\n\r\nhéllo\r\n"
        );
    }

    #[test]
    fn test_set_date() {
        let mut response = ok();
        response.set_date(Date::from_ymd_hms(2022, 9, 8, 21, 9, 59, 0).unwrap());
        assert_eq!(
            response.format(),
            "HTTP/1.1 200 OK\r\nDate: Thu, 08 Sep 2022 21:09:59 GMT\r\n\r\n\r\n"
        );
    }

    #[test]
    fn test_parts_are_mutable() {
        let mut response = not_found();
        response.status_mut().set("status-code", 200u16).unwrap();
        response.status_mut().set("reason-phrase", "OK").unwrap();
        response.header_mut().insert("X-Id", "1");
        response.set_body("done");

        assert_eq!(response.format(), "HTTP/1.1 200 OK\r\nX-Id: 1\r\n\r\ndone\r\n");
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(ok().format(), "HTTP/1.1 200 OK\r\n\r\n\r\n\r\n");
        assert_eq!(not_found().format(), "HTTP/1.1 404 Not Found\r\n\r\n\r\n\r\n");
        assert_eq!(bad_request().status().status_code(), 400);
    }
}
