//! The response status line.
//!
//! [`Status`] is a fixed record of three fields. Each field answers to a
//! snake_case key (`http_version`) and a kebab-case key (`http-version`);
//! both spellings name the same storage.
use std::fmt::Display;
use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::http::error::{Error, Result};

pub const HTTP_1_1: &str = "1.1";

#[derive(EnumString, IntoStaticStr, EnumIter, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Field {
    #[strum(to_string = "http_version", serialize = "http-version")]
    HttpVersion,
    #[strum(to_string = "status_code", serialize = "status-code")]
    StatusCode,
    #[strum(to_string = "reason_phrase", serialize = "reason-phrase")]
    ReasonPhrase,
}

impl Field {
    pub fn canonical(self) -> &'static str {
        self.into()
    }

    pub fn hyphenated(self) -> &'static str {
        match self {
            Field::HttpVersion => "http-version",
            Field::StatusCode => "status-code",
            Field::ReasonPhrase => "reason-phrase",
        }
    }

    /// Resolves either key spelling.
    pub fn lookup(key: &str) -> Option<Field> {
        Field::from_str(key).ok()
    }

    fn index(self) -> usize {
        self as usize
    }

    fn expected(self) -> &'static str {
        match self {
            Field::StatusCode => "an integer",
            Field::HttpVersion | Field::ReasonPhrase => "a string",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical())
    }
}

/// A status field value as seen through key-based access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Code(u16),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_code(&self) -> Option<u16> {
        if let Self::Code(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    fn fits(&self, field: Field) -> bool {
        matches!(
            (self, field),
            (Value::Code(_), Field::StatusCode)
                | (Value::Text(_), Field::HttpVersion | Field::ReasonPhrase)
        )
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::Code(v)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(v) => f.write_str(v),
            Value::Code(v) => write!(f, "{v}"),
        }
    }
}

/// Reason phrases from RFC 7231 section 6.1 plus a few later registrations.
pub fn reason_phrase_for(code: u16) -> Option<&'static str> {
    let phrase = match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        426 => "Upgrade Required",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => return None,
    };
    Some(phrase)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status {
    http_version: String,
    status_code: u16,
    reason_phrase: String,
}

impl Status {
    /// Status with an empty reason phrase.
    pub fn new(http_version: impl Into<String>, status_code: u16) -> Self {
        Self::with_reason(http_version, status_code, String::new())
    }

    pub fn with_reason(
        http_version: impl Into<String>,
        status_code: u16,
        reason_phrase: impl Into<String>,
    ) -> Self {
        let status = Self {
            http_version: http_version.into(),
            status_code,
            reason_phrase: reason_phrase.into(),
        };
        tracing::trace!(
            http_version = %status.http_version,
            status_code,
            reason_phrase = %status.reason_phrase,
            "new status"
        );
        status
    }

    /// Status whose reason phrase comes from [`reason_phrase_for`], empty for
    /// unregistered codes.
    pub fn from_code(http_version: impl Into<String>, status_code: u16) -> Self {
        Self::with_reason(
            http_version,
            status_code,
            reason_phrase_for(status_code).unwrap_or_default(),
        )
    }

    pub fn ok() -> Self {
        Self::from_code(HTTP_1_1, 200)
    }

    pub fn created() -> Self {
        Self::from_code(HTTP_1_1, 201)
    }

    pub fn no_content() -> Self {
        Self::from_code(HTTP_1_1, 204)
    }

    pub fn bad_request() -> Self {
        Self::from_code(HTTP_1_1, 400)
    }

    pub fn not_found() -> Self {
        Self::from_code(HTTP_1_1, 404)
    }

    pub fn internal_server_error() -> Self {
        Self::from_code(HTTP_1_1, 500)
    }

    /// Builds a status from two or three values in the order
    /// (version, code, reason).
    pub fn from_positional<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let args: Vec<Value> = args.into_iter().collect();

        if !(2..=3).contains(&args.len()) {
            tracing::debug!(count = args.len(), "rejected positional status arguments");
            return Err(Error::InvalidArgument(format!(
                "expected 2 or 3 positional arguments, got {}",
                args.len()
            )));
        }

        let mut slots: [Option<Value>; 3] = Default::default();
        for (field, value) in Field::iter().zip(args) {
            slots[field.index()] = Some(value);
        }

        Self::assemble(slots)
    }

    /// Builds a status from named arguments. Either key spelling is accepted,
    /// but each field may be supplied only once.
    pub fn from_named<I, K>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::assemble(Self::collect_keyed(args, "keyword argument")?)
    }

    /// Builds a status from a single mapping holding two or three of the
    /// recognized keys.
    pub fn from_mapping<I, K>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::assemble(Self::collect_keyed(mapping, "mapping key")?)
    }

    fn collect_keyed<I, K>(args: I, kind: &str) -> Result<[Option<Value>; 3]>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut slots: [Option<Value>; 3] = Default::default();

        for (key, value) in args {
            let key = key.as_ref();
            let field = Field::lookup(key).ok_or_else(|| {
                tracing::debug!(key, kind, "rejected unexpected status key");
                Error::InvalidArgument(format!("unexpected {kind} {key:?}"))
            })?;

            let slot = &mut slots[field.index()];
            if slot.is_some() {
                tracing::debug!(key, kind, "rejected duplicate status field");
                return Err(Error::InvalidArgument(format!(
                    "{field} supplied more than once"
                )));
            }
            *slot = Some(value);
        }

        Ok(slots)
    }

    fn assemble(slots: [Option<Value>; 3]) -> Result<Self> {
        let [http_version, status_code, reason_phrase] = slots;

        let http_version = Self::required(Field::HttpVersion, http_version)?;
        let status_code = Self::required(Field::StatusCode, status_code)?;

        let http_version = Self::typed_text(Field::HttpVersion, http_version)?;
        let status_code = status_code.as_code().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} must be {}",
                Field::StatusCode,
                Field::StatusCode.expected()
            ))
        })?;
        let reason_phrase = reason_phrase
            .map(|v| Self::typed_text(Field::ReasonPhrase, v))
            .transpose()?
            .unwrap_or_default();

        Ok(Self::with_reason(http_version, status_code, reason_phrase))
    }

    fn required(field: Field, value: Option<Value>) -> Result<Value> {
        value.ok_or_else(|| {
            tracing::debug!(%field, "rejected status without required field");
            Error::InvalidArgument(format!("missing required argument {field}"))
        })
    }

    fn typed_text(field: Field, value: Value) -> Result<String> {
        match value {
            Value::Text(v) => Ok(v),
            Value::Code(_) => Err(Error::InvalidArgument(format!(
                "{field} must be {}",
                field.expected()
            ))),
        }
    }

    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn set_http_version(&mut self, value: impl Into<String>) {
        self.http_version = value.into();
    }

    pub fn set_status_code(&mut self, value: u16) {
        self.status_code = value;
    }

    pub fn set_reason_phrase(&mut self, value: impl Into<String>) {
        self.reason_phrase = value.into();
    }

    pub fn get_field(&self, field: Field) -> Value {
        match field {
            Field::HttpVersion => Value::Text(self.http_version.clone()),
            Field::StatusCode => Value::Code(self.status_code),
            Field::ReasonPhrase => Value::Text(self.reason_phrase.clone()),
        }
    }

    /// Writes a field. The value must match the field's type.
    pub fn set_field(&mut self, field: Field, value: impl Into<Value>) -> Result<()> {
        match (field, value.into()) {
            (Field::StatusCode, Value::Code(v)) => self.status_code = v,
            (Field::HttpVersion, Value::Text(v)) => self.http_version = v,
            (Field::ReasonPhrase, Value::Text(v)) => self.reason_phrase = v,
            (field, value) => return Err(Self::mismatch(field, &value)),
        }
        Ok(())
    }

    fn check_type(field: Field, value: &Value) -> Result<()> {
        if value.fits(field) {
            Ok(())
        } else {
            Err(Self::mismatch(field, value))
        }
    }

    fn mismatch(field: Field, value: &Value) -> Error {
        tracing::debug!(%field, ?value, "rejected status value of wrong type");
        Error::TypeMismatch {
            field: field.canonical(),
            expected: field.expected(),
        }
    }

    pub fn get(&self, key: &str) -> Result<Value> {
        Field::lookup(key)
            .map(|field| self.get_field(field))
            .ok_or_else(|| {
                tracing::debug!(key, "status key not found");
                Error::KeyNotFound(key.to_string())
            })
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let field = Self::writable(key)?;
        self.set_field(field, value)
    }

    fn writable(key: &str) -> Result<Field> {
        Field::lookup(key).ok_or_else(|| {
            tracing::debug!(key, "rejected write to unknown status key");
            Error::InvalidKey(key.to_string())
        })
    }

    /// Writes several fields at once.
    ///
    /// An unrecognized key is an [`Error::InvalidArgument`], like an
    /// unrecognized constructor key. Every key and value is checked before
    /// anything is written, so a failed update leaves the status unchanged.
    pub fn update<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut staged = Vec::new();
        for (key, value) in entries {
            let key = key.as_ref();
            let field = Field::lookup(key).ok_or_else(|| {
                tracing::debug!(key, "rejected bulk update with unknown status key");
                Error::InvalidArgument(format!("unexpected update key {key:?}"))
            })?;
            let value = value.into();
            Self::check_type(field, &value)?;
            staged.push((field, value));
        }

        for (field, value) in staged {
            self.set_field(field, value)?;
        }
        Ok(())
    }

    /// Always fails: status fields cannot be removed.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        tracing::debug!(key, "rejected status field removal");
        Err(Error::InvalidOperation("status fields cannot be removed"))
    }

    /// Always fails: status fields cannot be removed.
    pub fn pop(&mut self, key: &str) -> Result<Value> {
        tracing::debug!(key, "rejected status field pop");
        Err(Error::InvalidOperation("status fields cannot be popped"))
    }

    /// Always fails: status fields cannot be removed.
    pub fn pop_item(&mut self) -> Result<(Field, Value)> {
        tracing::debug!("rejected status item pop");
        Err(Error::InvalidOperation("status fields cannot be popped"))
    }

    /// Fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Value)> + '_ {
        Field::iter().map(|field| (field, self.get_field(field)))
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HTTP/{} {} {}",
            self.http_version, self.status_code, self.reason_phrase
        )
    }
}

/// One argument given to a status constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Value(Value),
    Mapping(Vec<(String, Value)>),
}

impl Arg {
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(..))
    }

    pub fn into_value(self) -> Option<Value> {
        if let Self::Value(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

/// A description of a constructor call with free-form arguments.
///
/// Converting it into a [`Status`] dispatches to [`Status::from_positional`],
/// [`Status::from_named`] or [`Status::from_mapping`] after rejecting shapes
/// none of them accept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusArgs {
    positional: Vec<Arg>,
    named: Vec<(String, Value)>,
}

impl StatusArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(Arg::Value(value.into()));
        self
    }

    pub fn mapping<I, K>(mut self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mapping = mapping.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.positional.push(Arg::Mapping(mapping));
        self
    }

    pub fn named(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((key.into(), value.into()));
        self
    }
}

impl TryFrom<StatusArgs> for Status {
    type Error = Error;

    fn try_from(args: StatusArgs) -> Result<Self> {
        let StatusArgs {
            mut positional,
            named,
        } = args;

        match (positional.len(), named.len()) {
            (0, 0) => {
                tracing::debug!("rejected status without arguments");
                Err(Error::InvalidArgument("no arguments given".to_string()))
            }
            (1, 0) => match positional.pop() {
                Some(Arg::Mapping(mapping)) => Status::from_mapping(mapping),
                single => Status::from_positional(single.into_iter().filter_map(Arg::into_value)),
            },
            _ if positional.iter().any(Arg::is_mapping) => {
                tracing::debug!("rejected mapping mixed with other arguments");
                Err(Error::InvalidArgument(
                    "a mapping must be the only argument".to_string(),
                ))
            }
            (_, 0) => Status::from_positional(positional.into_iter().filter_map(Arg::into_value)),
            (0, _) => Status::from_named(named),
            _ => {
                tracing::debug!("rejected positional mixed with keyword arguments");
                Err(Error::InvalidArgument(
                    "positional and keyword arguments cannot be mixed".to_string(),
                ))
            }
        }
    }
}
