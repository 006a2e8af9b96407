use std::fmt::{self, Debug, Display};

use super::OptionNA;
use crate::object::{Kind, Obj};

/// Storage of a single vector or list element
///
/// Every element type knows its kind and the value used to fill slots that
/// are created by extending a container.
pub trait Element: Clone + Debug + PartialEq {
    const KIND: Kind;

    /// Value filling newly created slots
    fn na() -> Self;
}

pub type Double = OptionNA<f64>;
impl Element for Double {
    const KIND: Kind = Kind::Double;
    fn na() -> Self {
        OptionNA::NA
    }
}

pub type Integer = OptionNA<i32>;
impl Element for Integer {
    const KIND: Kind = Kind::Integer;
    fn na() -> Self {
        OptionNA::NA
    }
}

pub type Logical = OptionNA<bool>;
impl Element for Logical {
    const KIND: Kind = Kind::Logical;
    fn na() -> Self {
        OptionNA::NA
    }
}

pub type Character = OptionNA<String>;
impl Element for Character {
    const KIND: Kind = Kind::Character;
    fn na() -> Self {
        OptionNA::NA
    }
}

pub type Complex = OptionNA<Cplx>;
impl Element for Complex {
    const KIND: Kind = Kind::Complex;
    fn na() -> Self {
        OptionNA::NA
    }
}

/// Raw bytes have no missing value; new slots hold `00`.
pub type Raw = u8;
impl Element for Raw {
    const KIND: Kind = Kind::Raw;
    fn na() -> Self {
        0
    }
}

/// List elements; new slots hold `NULL`.
impl Element for Obj {
    const KIND: Kind = Kind::List;
    fn na() -> Self {
        Obj::Null
    }
}

/// A complex number
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cplx {
    pub re: f64,
    pub im: f64,
}

impl Cplx {
    pub fn new(re: f64, im: f64) -> Self {
        Cplx { re, im }
    }
}

impl From<f64> for Cplx {
    fn from(re: f64) -> Self {
        Cplx { re, im: 0.0 }
    }
}

impl Display for Cplx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            "-"
        } else {
            "+"
        };
        write!(
            f,
            "{}{}{}i",
            format_double(self.re),
            sign,
            format_double(self.im.abs())
        )
    }
}

/// Format a double the way `as.character()` does for common values
///
/// Whole numbers print without a decimal point and non-finite values use
/// R's spelling. Other values use the shortest representation that
/// round-trips.
pub fn format_double(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{:.0}", x)
    } else {
        format!("{}", x)
    }
}
