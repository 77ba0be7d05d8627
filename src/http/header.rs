//! Response header fields.
use std::fmt::Display;

use crate::http::CRLF;
use crate::http::date::Date;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderValue {
    Text(String),
    Date(Date),
}

impl HeaderValue {
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        if let Self::Date(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<String> for HeaderValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<Date> for HeaderValue {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HeaderValue {
                fn from(v: $t) -> Self {
                    Self::Text(v.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Text(v) => f.write_str(v),
            HeaderValue::Date(v) => Display::fmt(v, f),
        }
    }
}

/// Ordered header fields.
///
/// Names are compared exactly. Inserting under an existing name replaces the
/// value in place and keeps the field's position. No validation is performed
/// on whether the names or values are valid HTTP values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<(String, HeaderValue)>,
}

impl Header {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.position(name).map(|i| &self.fields[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut HeaderValue> {
        self.position(name).map(|i| &mut self.fields[i].1)
    }

    /// Sets a field, returning the value it replaced.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<HeaderValue>
    where
        N: Into<String>,
        V: Into<HeaderValue>,
    {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.fields[i].1, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Removes a field. The remaining fields keep their order.
    pub fn remove(&mut self, name: &str) -> Option<HeaderValue> {
        self.position(name).map(|i| self.fields.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(CRLF)?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str(CRLF)
    }
}

impl<N: Into<String>, V: Into<HeaderValue>> FromIterator<(N, V)> for Header {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut header = Header::new();
        header.extend(iter);
        header
    }
}

impl<N: Into<String>, V: Into<HeaderValue>> Extend<(N, V)> for Header {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<N: Into<String>, V: Into<HeaderValue>, const L: usize> From<[(N, V); L]> for Header {
    fn from(value: [(N, V); L]) -> Self {
        value.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = (&'a str, &'a HeaderValue);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
