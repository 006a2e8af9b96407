use core::fmt;

use crate::error::Error;
use crate::object::Obj;

pub type EvalResult = Result<Obj, Error>;

/// Indexing strictness
///
/// `Subset` (`[`) tolerates NA and out-of-range positions, producing NA
/// slots on read and extension on write. `Subscript` (`[[`) demands that a
/// position resolves to exactly one element.
///
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum AccessMode {
    #[default]
    #[strum(serialize = "[")]
    Subset,
    #[strum(serialize = "[[")]
    Subscript,
}

/// Whether a position is resolved to read from or to write into a container.
///
/// Unmatched names and out-of-range positions extend a container only when
/// writing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Purpose {
    Read,
    Write,
}

/// Non-fatal conditions raised while indexing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Warning {
    NotMultipleReplacement,
    LengthMismatch,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotMultipleReplacement => write!(
                f,
                "number of items to replace is not a multiple of replacement length"
            ),
            Warning::LengthMismatch => write!(
                f,
                "longer object length is not a multiple of shorter object length"
            ),
        }
    }
}

/// Receiver of non-fatal warnings.
///
/// Returning an error aborts the operation that raised the warning, which is
/// how `options(warn = 2)` style escalation is implemented.
pub trait WarningSink {
    fn emit_warning(&mut self, warning: Warning) -> Result<(), Error>;
}

impl WarningSink for Vec<Warning> {
    fn emit_warning(&mut self, warning: Warning) -> Result<(), Error> {
        self.push(warning);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn access_mode_symbols() {
        assert_eq!(AccessMode::Subset.to_string(), "[");
        assert_eq!(AccessMode::Subscript.to_string(), "[[");
        assert_eq!(AccessMode::from_str("[["), Ok(AccessMode::Subscript));
    }

    #[test]
    fn vec_collects_warnings() {
        let mut sink: Vec<Warning> = vec![];
        assert_eq!(sink.emit_warning(Warning::LengthMismatch), Ok(()));
        assert_eq!(sink, vec![Warning::LengthMismatch]);
    }
}
