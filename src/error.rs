use core::fmt;

use crate::lang::Warning;
use crate::object::Kind;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(None, std::file!(), std::line!())
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal(Some($x.to_string()), std::file!(), std::line!())
    };
}

#[macro_export]
macro_rules! err {
    ( $x:expr ) => {
        $crate::error::Error::Other($x.to_string())
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // subscript arity
    IncorrectSubscripts,
    IncorrectSubscriptsMatrix,
    ImproperSubscript,

    // position validity
    NASubscripted,
    SelectLessThanOne,
    SelectMoreThanOne,
    InvalidNegativeIndex,
    SubscriptOutOfBounds,
    InvalidSubscriptType(Kind),

    // replacement lengths
    NotMultipleReplacement,
    ReplacementZero,
    MoreElementsSupplied,

    // coercion
    SubassignTypeFix(Kind, Kind),
    SubscriptTypes(Kind, Kind),

    // recursive indexing
    NoSuchIndexAtLevel(usize),
    RecursiveIndexingFailed(usize),

    // objects
    NoApplicableMethod,
    ObjectNotSubsettable(Kind),

    // attributes
    DimsDoNotMatchLength(usize, usize),
    NamesLengthMismatch(usize, usize),

    // options(warn = 2)
    ConvertedWarning(Warning),

    Other(String),

    // in-dev errors
    Internal(Option<String>, &'static str, u32),
}

impl Error {
    fn as_str(&self) -> String {
        match self {
            Error::IncorrectSubscripts => "incorrect number of subscripts".to_string(),
            Error::IncorrectSubscriptsMatrix => {
                "incorrect number of subscripts on matrix".to_string()
            }
            Error::ImproperSubscript => "[[ ]] improper number of subscripts".to_string(),
            Error::NASubscripted => "NAs are not allowed in subscripted assignments".to_string(),
            Error::SelectLessThanOne => "attempt to select less than one element".to_string(),
            Error::SelectMoreThanOne => "attempt to select more than one element".to_string(),
            Error::InvalidNegativeIndex => {
                "only 0's may be mixed with negative subscripts".to_string()
            }
            Error::SubscriptOutOfBounds => "subscript out of bounds".to_string(),
            Error::InvalidSubscriptType(kind) => format!("invalid subscript type '{kind}'"),
            Error::NotMultipleReplacement => {
                "number of items to replace is not a multiple of replacement length".to_string()
            }
            Error::ReplacementZero => "replacement has length zero".to_string(),
            Error::MoreElementsSupplied => {
                "more elements supplied than there are to replace".to_string()
            }
            Error::SubassignTypeFix(from, to) => {
                format!("incompatible types (from {from} to {to}) in subassignment type fix")
            }
            Error::SubscriptTypes(from, to) => {
                format!("incompatible types (from {from} to {to}) in [[ assignment")
            }
            Error::NoSuchIndexAtLevel(level) => format!("no such index at level {level}\n"),
            Error::RecursiveIndexingFailed(level) => {
                format!("recursive indexing failed at level {level}\n")
            }
            Error::NoApplicableMethod => {
                "no method for assigning subsets of this S4 class".to_string()
            }
            Error::ObjectNotSubsettable(kind) => {
                format!("object of type '{kind}' is not subsettable")
            }
            Error::DimsDoNotMatchLength(product, len) => {
                format!("dims [product {product}] do not match the length of object [{len}]")
            }
            Error::NamesLengthMismatch(names, len) => format!(
                "'names' attribute [{names}] must be the same length as the vector [{len}]"
            ),
            Error::ConvertedWarning(warning) => format!("(converted from warning) {warning}"),
            Error::Other(s) => s.clone(),
            Error::Internal(msg, file, line) => match msg {
                Some(msg) => format!("Internal Error ({file}:{line}): {msg}"),
                None => format!("Internal Error ({file}:{line})"),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.as_str())
    }
}

impl std::error::Error for Error {}
