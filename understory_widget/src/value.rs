// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values for the string-keyed property protocol.

use crate::error::Error;

/// Property names understood by every widget through the host chain.
pub mod names {
    /// Left edge of the widget frame.
    pub const X: &str = "x";
    /// Top edge of the widget frame.
    pub const Y: &str = "y";
    /// Frame width.
    pub const W: &str = "w";
    /// Frame height.
    pub const H: &str = "h";
}

/// A dynamically typed property value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer.
    Int(i32),
    /// Floating point.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// Coerce to an integer.
    ///
    /// Floats are truncated toward zero and must be finite and in range.
    /// Booleans map to `0` and `1`.
    pub fn to_int(&self) -> Result<i32, Error> {
        match *self {
            Self::Int(v) => Ok(v),
            Self::Float(v) => {
                if v.is_finite() && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
                    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
                    let truncated = v as i32;
                    Ok(truncated)
                } else {
                    Err(Error::InvalidArgument)
                }
            }
            Self::Bool(v) => Ok(i32::from(v)),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
