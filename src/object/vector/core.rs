use std::fmt::Debug;
use std::fmt::Display;

use super::rep::Rep;
use super::types::*;
use crate::object::{Attributes, Kind};

#[derive(Default, Clone, PartialEq, Eq)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn as_ref(&self) -> OptionNA<&T> {
        match self {
            OptionNA::Some(x) => OptionNA::Some(x),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl<T> From<T> for OptionNA<T> {
    fn from(value: T) -> Self {
        OptionNA::Some(value)
    }
}

impl<T: Debug> Debug for OptionNA<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{:?}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for OptionNA<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

/// Atomic vectors
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Raw(Rep<Raw>),
    Logical(Rep<Logical>),
    Integer(Rep<Integer>),
    Double(Rep<Double>),
    Complex(Rep<Complex>),
    Character(Rep<Character>),
}

/// Apply the same expression to whichever `Rep` a vector holds
#[macro_export]
macro_rules! each_vector {
    ($v:expr, $x:ident => $e:expr) => {{
        use $crate::object::Vector;
        match $v {
            Vector::Raw($x) => $e,
            Vector::Logical($x) => $e,
            Vector::Integer($x) => $e,
            Vector::Double($x) => $e,
            Vector::Complex($x) => $e,
            Vector::Character($x) => $e,
        }
    }};
}

/// See [`Rep`] for the documentation on the methods.
impl Vector {
    pub fn kind(&self) -> Kind {
        use Vector::*;
        match self {
            Raw(_) => Kind::Raw,
            Logical(_) => Kind::Logical,
            Integer(_) => Kind::Integer,
            Double(_) => Kind::Double,
            Complex(_) => Kind::Complex,
            Character(_) => Kind::Character,
        }
    }

    /// An empty vector of an atomic kind
    pub fn empty(kind: Kind) -> Option<Vector> {
        Some(match kind {
            Kind::Raw => Vector::Raw(Rep::new()),
            Kind::Logical => Vector::Logical(Rep::new()),
            Kind::Integer => Vector::Integer(Rep::new()),
            Kind::Double => Vector::Double(Rep::new()),
            Kind::Complex => Vector::Complex(Rep::new()),
            Kind::Character => Vector::Character(Rep::new()),
            _ => return None,
        })
    }

    pub fn raw(x: Vec<u8>) -> Vector {
        Vector::Raw(Rep::from(x))
    }

    pub fn len(&self) -> usize {
        each_vector!(self, x => x.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attrs(&self) -> &Attributes {
        each_vector!(self, x => x.attrs())
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        each_vector!(self, x => x.attrs_mut())
    }

    pub fn is_shared(&self) -> bool {
        each_vector!(self, x => x.is_shared())
    }

    pub fn select(&self, offsets: &[Option<usize>]) -> Vector {
        each_vector!(self, x => x.select(offsets).into())
    }

    pub fn resize(&mut self, len: usize) {
        each_vector!(self, x => x.resize(len))
    }

    pub fn retain_mask(&mut self, remove: &[bool]) {
        each_vector!(self, x => x.retain_mask(remove))
    }

    pub fn names_mut(&mut self) -> &mut crate::object::CowObj<Vec<Character>> {
        each_vector!(self, x => x.names_mut())
    }
}

impl From<Rep<Raw>> for Vector {
    fn from(x: Rep<Raw>) -> Self {
        Vector::Raw(x)
    }
}

impl From<Rep<Logical>> for Vector {
    fn from(x: Rep<Logical>) -> Self {
        Vector::Logical(x)
    }
}

impl From<Rep<Integer>> for Vector {
    fn from(x: Rep<Integer>) -> Self {
        Vector::Integer(x)
    }
}

impl From<Rep<Double>> for Vector {
    fn from(x: Rep<Double>) -> Self {
        Vector::Double(x)
    }
}

impl From<Rep<Complex>> for Vector {
    fn from(x: Rep<Complex>) -> Self {
        Vector::Complex(x)
    }
}

impl From<Rep<Character>> for Vector {
    fn from(x: Rep<Character>) -> Self {
        Vector::Character(x)
    }
}

impl From<Vec<bool>> for Vector {
    fn from(x: Vec<bool>) -> Self {
        Vector::Logical(Rep::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>()))
    }
}

impl From<Vec<i32>> for Vector {
    fn from(x: Vec<i32>) -> Self {
        Vector::Integer(Rep::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>()))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(x: Vec<f64>) -> Self {
        Vector::Double(Rep::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>()))
    }
}

impl From<Vec<Cplx>> for Vector {
    fn from(x: Vec<Cplx>) -> Self {
        Vector::Complex(Rep::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>()))
    }
}

impl From<Vec<String>> for Vector {
    fn from(x: Vec<String>) -> Self {
        Vector::Character(Rep::from(x.into_iter().map(OptionNA::Some).collect::<Vec<_>>()))
    }
}

impl From<Vec<&str>> for Vector {
    fn from(x: Vec<&str>) -> Self {
        Vector::Character(Rep::from(
            x.into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect::<Vec<_>>(),
        ))
    }
}

impl From<Vec<Logical>> for Vector {
    fn from(x: Vec<Logical>) -> Self {
        Vector::Logical(Rep::from(x))
    }
}

impl From<Vec<Integer>> for Vector {
    fn from(x: Vec<Integer>) -> Self {
        Vector::Integer(Rep::from(x))
    }
}

impl From<Vec<Double>> for Vector {
    fn from(x: Vec<Double>) -> Self {
        Vector::Double(Rep::from(x))
    }
}

impl From<Vec<Complex>> for Vector {
    fn from(x: Vec<Complex>) -> Self {
        Vector::Complex(Rep::from(x))
    }
}

impl From<Vec<Character>> for Vector {
    fn from(x: Vec<Character>) -> Self {
        Vector::Character(Rep::from(x))
    }
}
