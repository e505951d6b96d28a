// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error type shared by every converter, buffer and resolver.
//!
//! Error constructors sit on the encode/decode hot paths of every converter.
//! They are kept `#[cold]` and `#[track_caller]` so the successful paths stay
//! small, and so `TESSERA_PANIC_ON_ERROR` can report the exact creation site.

use std::borrow::Cow;

use thiserror::Error;

/// Set `TESSERA_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("TESSERA_PANIC_ON_ERROR").is_some();

/// Check if `TESSERA_PANIC_ON_ERROR` was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for tessera encoding, decoding and converter resolution.
///
/// Always build errors through the static constructor functions
/// ([`Error::invalid_data`], [`Error::missing_field`], ...), never with the
/// enum syntax directly. The constructors accept anything convertible into a
/// `Cow<'static, str>` and honor `TESSERA_PANIC_ON_ERROR`:
///
/// ```bash
/// RUST_BACKTRACE=1 TESSERA_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// ```rust
/// use tessera_core::error::Error;
///
/// let err = Error::invalid_data("bad option tag 7");
/// let err = Error::insufficient_data(8, 3);
/// let err = Error::missing_field("id", "Person");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The span ended before a value could be read.
    #[error("Insufficient data: required {0} bytes, {1} available")]
    InsufficientData(usize, usize),

    /// Corrupted or malformed input.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// The member key set of a keyed type is not a valid dictionary.
    #[error("Malformed key set: {0}")]
    MalformedKeySet(Cow<'static, str>),

    /// A required member of a keyed object was not present in the stream.
    #[error("Missing field `{0}` while decoding {1}")]
    MissingField(Cow<'static, str>, &'static str),

    /// The same member key appeared twice in one keyed object.
    #[error("Duplicate field `{0}` while decoding {1}")]
    DuplicateField(Cow<'static, str>, &'static str),

    /// No creator could build a converter for the type.
    #[error("{0}")]
    UnsupportedType(Cow<'static, str>),

    /// A `None` was given where the converter forbids null.
    #[error("Null value is not allowed for {0}")]
    NullForbidden(&'static str),

    /// The allocator would grow beyond its configured ceiling.
    #[error("Capacity exceeded: required {0} bytes, max capacity {1}")]
    CapacityExceeded(usize, usize),

    /// General type related failure, such as a downcast mismatch or a self type reference.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// A value could not be encoded, such as a length outside the prefix range.
    #[error("{0}")]
    EncodeError(Cow<'static, str>),

    /// Generic error.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::InsufficientData`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        let err = Error::InsufficientData(required, available);
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`] from a string or static message.
    ///
    /// # Example
    /// ```
    /// use tessera_core::error::Error;
    ///
    /// let err = Error::invalid_data("invalid bool value");
    /// let err = Error::invalid_data(format!("invalid bool value {}", 3));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::MalformedKeySet`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn malformed_key_set<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::MalformedKeySet(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::MissingField`] naming the member key and the owning type.
    ///
    /// # Example
    /// ```
    /// use tessera_core::error::Error;
    ///
    /// let err = Error::missing_field("id", "Person");
    /// assert_eq!(err.to_string(), "Missing field `id` while decoding Person");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn missing_field<S: Into<Cow<'static, str>>>(key: S, type_name: &'static str) -> Self {
        let err = Error::MissingField(key.into(), type_name);
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DuplicateField`] naming the member key and the owning type.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn duplicate_field<S: Into<Cow<'static, str>>>(key: S, type_name: &'static str) -> Self {
        let err = Error::DuplicateField(key.into(), type_name);
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnsupportedType`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnsupportedType(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::NullForbidden`] for the given type name.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn null_forbidden(type_name: &'static str) -> Self {
        let err = Error::NullForbidden(type_name);
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::CapacityExceeded`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn capacity_exceeded(required: usize, max_capacity: usize) -> Self {
        let err = Error::CapacityExceeded(required, max_capacity);
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeError`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::TypeError(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::EncodeError`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn encode_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::EncodeError(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unknown`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unknown(s.into());
        if PANIC_ON_ERROR {
            panic!("TESSERA_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Appends the name of `T` to a [`Error::TypeError`] or [`Error::UnsupportedType`] message.
    ///
    /// Other variants are returned unchanged.
    #[inline(never)]
    pub fn with_type_name<T: ?Sized + 'static>(err: Error) -> Error {
        match err {
            Error::TypeError(s) => {
                Error::type_error(format!("{} (type: {})", s, std::any::type_name::<T>()))
            }
            Error::UnsupportedType(s) => {
                Error::unsupported_type(format!("{} (type: {})", s, std::any::type_name::<T>()))
            }
            other => other,
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use tessera_core::ensure;
/// use tessera_core::error::Error;
///
/// fn check_stride(len: usize, stride: usize) -> Result<(), Error> {
///     ensure!(stride > 0, "stride must be positive");
///     ensure!(len % stride == 0, Error::invalid_data("span is not a multiple of the stride"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::InvalidData`].
///
/// # Examples
/// ```
/// use tessera_core::bail;
/// use tessera_core::error::Error;
///
/// fn read_tag(tag: u8) -> Result<bool, Error> {
///     match tag {
///         0 => Ok(false),
///         1 => Ok(true),
///         _ => bail!("invalid tag {}", tag),
///     }
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_data($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)))
    };
}
