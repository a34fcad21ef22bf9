use std::error::Error as StdError;
use std::fmt;

/// Coarse classification of a local failure.
///
/// Remote failures are not errors: whatever `code`/`msg` the service returns is
/// handed back inside the response envelope.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Invalid local input, such as a malformed host or a pre-epoch clock.
    Validation,
    /// A request record could not be encoded.
    Serialization,
    /// The HTTP round trip failed before a body was read.
    Transport,
    /// The service answered with an empty body.
    EmptyBody,
    /// A response body or nested payload could not be decoded.
    Decode,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl Error {
    #[must_use]
    pub fn with_source<S>(kind: Kind, source: S) -> Self
    where
        S: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }

    #[must_use]
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Validation {
            reason: reason.into(),
        }
        .into()
    }

    #[must_use]
    pub fn serialization<S>(source: S) -> Self
    where
        S: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::with_source(Kind::Serialization, source)
    }

    #[must_use]
    pub fn decode<S>(source: S) -> Self
    where
        S: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::with_source(Kind::Decode, source)
    }

    #[must_use]
    pub fn empty_body() -> Self {
        Self::with_source(Kind::EmptyBody, EmptyBody)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBody;

impl fmt::Display for EmptyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("body is empty")
    }
}

impl StdError for EmptyBody {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::with_source(Kind::Transport, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::validation(format!("invalid url: {err}"))
    }
}

impl From<serde_html_form::ser::Error> for Error {
    fn from(err: serde_html_form::ser::Error) -> Self {
        Error::serialization(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_message_is_stable() {
        let err = Error::empty_body();
        assert_eq!(err.kind(), Kind::EmptyBody);
        assert_eq!(err.to_string(), "body is empty");
    }

    #[test]
    fn validation_downcasts_to_reason() {
        let err = Error::validation("secret key must not be empty");
        assert_eq!(err.kind(), Kind::Validation);
        let inner = err.downcast_ref::<Validation>().expect("validation source");
        assert_eq!(inner.reason, "secret key must not be empty");
    }
}
