use std::error::Error as StdError;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::Result;
use crate::error::Error;

/// `code` reported by the service on success.
pub const SUCCESS: u64 = 200;
/// `code` of locally produced generic and list failures.
pub const LOCAL_FAILURE: u64 = 400;
/// `code` of raw failures, whatever their cause.
pub const RAW_FAILURE: u64 = 500;

/// The `{code, msg, data}` envelope every endpoint answers with.
///
/// `data` is opaque; list and range endpoints nest a second JSON document
/// in it. Missing and `null` fields decode as their empty value.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ApiResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub code: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub msg: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub data: String,
}

impl ApiResponse {
    #[must_use]
    pub fn ok<S: Into<String>>(data: S) -> Self {
        Self {
            code: SUCCESS,
            msg: String::new(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn failure<S: Into<String>>(msg: S) -> Self {
        Self {
            code: LOCAL_FAILURE,
            msg: msg.into(),
            data: String::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }

    /// Returns `data` on success, otherwise the code and message as an error.
    pub fn into_result(self) -> std::result::Result<String, RemoteError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(RemoteError {
                code: self.code,
                msg: self.msg,
            })
        }
    }

    /// Decodes `data` as a nested JSON document.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T> {
        crate::decode(self.data.as_bytes())
    }
}

impl From<Error> for ApiResponse {
    fn from(err: Error) -> Self {
        Self::failure(err.to_string())
    }
}

/// A non-success envelope turned into an error value.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteError {
    pub code: u64,
    pub msg: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote error {}: {}", self.code, self.msg)
    }
}

impl StdError for RemoteError {}

/// Binary payload decoded from base64.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RawResponse {
    pub code: u64,
    pub msg: String,
    /// Decoded length for `get_raw`; total object size for `get_range`.
    pub size: u64,
    pub raw: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn ok(size: u64, raw: Vec<u8>) -> Self {
        Self {
            code: SUCCESS,
            msg: String::new(),
            size,
            raw,
        }
    }

    #[must_use]
    pub fn failure<S: Into<String>>(msg: S) -> Self {
        Self {
            code: RAW_FAILURE,
            msg: msg.into(),
            size: 0,
            raw: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

impl From<Error> for RawResponse {
    fn from(err: Error) -> Self {
        Self::failure(err.to_string())
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListResponse {
    pub code: u64,
    pub msg: String,
    pub total: u64,
    pub list: Vec<String>,
}

impl ListResponse {
    #[must_use]
    pub fn ok(total: u64, list: Vec<String>) -> Self {
        Self {
            code: SUCCESS,
            msg: String::new(),
            total,
            list,
        }
    }

    #[must_use]
    pub fn failure<S: Into<String>>(msg: S) -> Self {
        Self {
            code: LOCAL_FAILURE,
            msg: msg.into(),
            total: 0,
            list: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

impl From<Error> for ListResponse {
    fn from(err: Error) -> Self {
        Self::failure(err.to_string())
    }
}

/// Nested `data` of list endpoints. An empty listing may arrive as
/// `"list": null`.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ListPayload {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub total: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub list: Vec<String>,
}

/// Nested `data` of `get_range`.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct RangePayload {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub all_size: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub data: String,
}
