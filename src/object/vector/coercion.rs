use super::rep::Rep;
use super::types::*;
use super::{OptionNA, Vector};
use crate::error::Error;
use crate::object::{Kind, List, Obj};

/// Element conversion along the coercion lattice
///
/// Only conversions that move up the lattice are provided; containers are
/// never narrowed to fit a value.
pub trait CoercibleInto<T>: Sized {
    fn coerce_into(self) -> T;
}

impl CoercibleInto<bool> for bool {
    #[inline]
    fn coerce_into(self) -> bool {
        self
    }
}

impl CoercibleInto<i32> for bool {
    #[inline]
    fn coerce_into(self) -> i32 {
        self as i32
    }
}

impl CoercibleInto<f64> for bool {
    #[inline]
    fn coerce_into(self) -> f64 {
        self as i32 as f64
    }
}

impl CoercibleInto<Cplx> for bool {
    #[inline]
    fn coerce_into(self) -> Cplx {
        Cplx::from(self as i32 as f64)
    }
}

impl CoercibleInto<String> for bool {
    #[inline]
    fn coerce_into(self) -> String {
        if self { "TRUE" } else { "FALSE" }.to_string()
    }
}

impl CoercibleInto<i32> for i32 {
    #[inline]
    fn coerce_into(self) -> i32 {
        self
    }
}

impl CoercibleInto<f64> for i32 {
    #[inline]
    fn coerce_into(self) -> f64 {
        self as f64
    }
}

impl CoercibleInto<Cplx> for i32 {
    #[inline]
    fn coerce_into(self) -> Cplx {
        Cplx::from(self as f64)
    }
}

impl CoercibleInto<String> for i32 {
    #[inline]
    fn coerce_into(self) -> String {
        self.to_string()
    }
}

impl CoercibleInto<f64> for f64 {
    #[inline]
    fn coerce_into(self) -> f64 {
        self
    }
}

impl CoercibleInto<Cplx> for f64 {
    #[inline]
    fn coerce_into(self) -> Cplx {
        Cplx::from(self)
    }
}

impl CoercibleInto<String> for f64 {
    #[inline]
    fn coerce_into(self) -> String {
        format_double(self)
    }
}

impl CoercibleInto<Cplx> for Cplx {
    #[inline]
    fn coerce_into(self) -> Cplx {
        self
    }
}

impl CoercibleInto<String> for Cplx {
    #[inline]
    fn coerce_into(self) -> String {
        self.to_string()
    }
}

impl CoercibleInto<String> for String {
    #[inline]
    fn coerce_into(self) -> String {
        self
    }
}

impl<T, U> CoercibleInto<OptionNA<U>> for OptionNA<T>
where
    T: CoercibleInto<U>,
{
    #[inline]
    fn coerce_into(self) -> OptionNA<U> {
        self.map(|x| x.coerce_into())
    }
}

fn coerce_rep<T, U>(x: &Rep<T>) -> Rep<U>
where
    T: Element + CoercibleInto<U>,
    U: Element,
{
    x.map(|e| e.clone().coerce_into())
}

/// Box each element of an atomic vector as a length-one vector
fn box_rep<T>(x: &Rep<T>) -> List
where
    T: Element,
    Rep<T>: Into<Vector>,
{
    x.map(|e| Obj::Vector(Rep::from(vec![e.clone()]).into()))
}

impl Vector {
    /// Convert to an atomic kind at or above this vector's kind
    ///
    /// Conversions down the lattice, or into and out of raw, fail with a
    /// type fix error naming both kinds.
    pub fn as_kind(&self, kind: Kind) -> Result<Vector, Error> {
        use Vector::*;
        if self.kind() == kind {
            return Ok(self.clone());
        }

        tracing::debug!("coercing {} vector to {}", self.kind(), kind);
        let result = match (self, kind) {
            (Logical(x), Kind::Integer) => Integer(coerce_rep(x)),
            (Logical(x), Kind::Double) => Double(coerce_rep(x)),
            (Logical(x), Kind::Complex) => Complex(coerce_rep(x)),
            (Logical(x), Kind::Character) => Character(coerce_rep(x)),
            (Integer(x), Kind::Double) => Double(coerce_rep(x)),
            (Integer(x), Kind::Complex) => Complex(coerce_rep(x)),
            (Integer(x), Kind::Character) => Character(coerce_rep(x)),
            (Double(x), Kind::Complex) => Complex(coerce_rep(x)),
            (Double(x), Kind::Character) => Character(coerce_rep(x)),
            (Complex(x), Kind::Character) => Character(coerce_rep(x)),
            _ => return Err(Error::SubassignTypeFix(self.kind(), kind)),
        };
        Ok(result)
    }

    /// Convert into a list of length-one vectors, keeping attributes
    pub fn to_list(&self) -> List {
        tracing::debug!("coercing {} vector to list", self.kind());
        crate::each_vector!(self, x => box_rep(x))
    }
}

impl Obj {
    /// Coerce a container to `kind`
    ///
    /// `NULL` becomes an empty container of the requested kind, vectors move
    /// up the lattice and anything can become a list. Functions,
    /// environments and S4 objects only coerce to themselves.
    ///
    pub fn coerce_to(&self, kind: Kind) -> Result<Obj, Error> {
        if self.kind() == kind {
            return Ok(self.clone());
        }

        match (self, kind) {
            (Obj::Null, Kind::List) => Ok(Obj::List(List::new())),
            (Obj::Null, k) => Vector::empty(k)
                .map(Obj::Vector)
                .ok_or(Error::SubassignTypeFix(Kind::Null, k)),
            (Obj::Vector(v), Kind::List) => Ok(Obj::List(v.to_list())),
            (Obj::Vector(v), k) => Ok(Obj::Vector(v.as_kind(k)?)),
            (obj, k) => Err(Error::SubassignTypeFix(obj.kind(), k)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::vector::OptionNA::*;

    #[test]
    fn logical_to_character() {
        let x = Vector::from(vec![Some(true), NA, Some(false)]);
        assert_eq!(
            x.as_kind(Kind::Character),
            Ok(Vector::from(vec![
                Some("TRUE".to_string()),
                NA,
                Some("FALSE".to_string())
            ]))
        );
    }

    #[test]
    fn na_maps_to_na() {
        let x = Vector::from(vec![NA, Some(2)]);
        assert_eq!(
            x.as_kind(Kind::Double),
            Ok(Vector::from(vec![NA, Some(2.0)]))
        );
        assert_eq!(
            x.as_kind(Kind::Complex),
            Ok(Vector::from(vec![NA, Some(Cplx::new(2.0, 0.0))]))
        );
    }

    #[test]
    fn complex_to_character() {
        let x = Vector::from(vec![Cplx::new(1.0, -1.0)]);
        assert_eq!(
            x.as_kind(Kind::Character),
            Ok(Vector::from(vec!["1-1i"]))
        );
    }

    #[test]
    fn no_downward_coercion() {
        let x = Vector::from(vec![1.5]);
        assert_eq!(
            x.as_kind(Kind::Integer),
            Err(Error::SubassignTypeFix(Kind::Double, Kind::Integer))
        );
    }

    #[test]
    fn raw_is_isolated() {
        let x = Vector::raw(vec![1]);
        assert_eq!(
            x.as_kind(Kind::Integer),
            Err(Error::SubassignTypeFix(Kind::Raw, Kind::Integer))
        );
        assert!(Obj::Vector(x).coerce_to(Kind::List).is_ok());
    }

    #[test]
    fn boxing_keeps_kinds_and_names() {
        let mut x = Vector::from(vec![1, 2]);
        x.names_mut();
        let l = x.to_list();
        assert_eq!(l.len(), 2);
        assert_eq!(l.get(1), Option::Some(&Obj::from(vec![2])));
        assert_eq!(l.names().map(|n| n.len()), Option::Some(2));
    }

    #[test]
    fn null_coerces_to_empty_containers() {
        assert_eq!(
            Obj::Null.coerce_to(Kind::Integer),
            Ok(Obj::Vector(Vector::from(Vec::<i32>::new())))
        );
        assert_eq!(Obj::Null.coerce_to(Kind::List), Ok(Obj::List(List::new())));
    }
}
