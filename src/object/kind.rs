use crate::error::Error;

/// Element kinds
///
/// The vector kinds form the coercion lattice
/// `raw < logical < integer < double < complex < character < list`. The
/// remaining kinds only describe objects that can never be coerced into, or
/// out of, a vector.
///
/// Kinds display as R's `typeof()`.
///
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Kind {
    #[strum(serialize = "NULL")]
    Null,
    #[strum(serialize = "raw")]
    Raw,
    #[strum(serialize = "logical")]
    Logical,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "double")]
    Double,
    #[strum(serialize = "complex")]
    Complex,
    #[strum(serialize = "character")]
    Character,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "closure")]
    Function,
    #[strum(serialize = "environment")]
    Environment,
    #[strum(serialize = "S4")]
    S4,
    #[strum(serialize = "symbol")]
    Missing,
}

impl Kind {
    pub fn is_atomic(&self) -> bool {
        (Kind::Raw..=Kind::Character).contains(self)
    }

    pub fn is_vector(&self) -> bool {
        (Kind::Raw..=Kind::List).contains(self)
    }

    /// Least upper bound of two kinds
    ///
    /// `NULL` is the identity of the join. Raw values only mix with other
    /// raw values or with lists; every other pairing involving raw, a
    /// function, an environment or an S4 object has no upper bound.
    ///
    pub fn join(self, other: Kind) -> Option<Kind> {
        use Kind::*;
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Null, k) | (k, Null) if k.is_vector() => Some(k),
            (Raw, List) | (List, Raw) => Some(List),
            (Raw, _) | (_, Raw) => None,
            (a, b) if a.is_vector() && b.is_vector() => Some(a.max(b)),
            _ => None,
        }
    }

    /// Kind a container must become to receive a value of kind `value`
    pub fn subassign_target(container: Kind, value: Kind) -> Result<Kind, Error> {
        container
            .join(value)
            .ok_or(Error::SubassignTypeFix(value, container))
    }
}

#[cfg(test)]
mod tests {
    use super::Kind::{self, *};
    use crate::error::Error;
    use strum::IntoEnumIterator;

    #[test]
    fn kinds_display_as_typeof() {
        assert_eq!(Null.to_string(), "NULL");
        assert_eq!(Character.to_string(), "character");
        assert_eq!(Function.to_string(), "closure");
    }

    #[test]
    fn join_takes_lattice_maximum() {
        assert_eq!(Logical.join(Double), Some(Double));
        assert_eq!(Complex.join(Integer), Some(Complex));
        assert_eq!(Character.join(Complex), Some(Character));
        assert_eq!(List.join(Character), Some(List));
        assert_eq!(Null.join(Integer), Some(Integer));
        assert_eq!(Raw.join(Raw), Some(Raw));
        assert_eq!(Raw.join(List), Some(List));
    }

    #[test]
    fn join_is_commutative() {
        for a in Kind::iter() {
            for b in Kind::iter() {
                assert_eq!(a.join(b), b.join(a), "{a} and {b}");
            }
        }
    }

    #[test]
    fn join_is_monotone_over_atomics() {
        let lattice = [Logical, Integer, Double, Complex, Character, List];
        for (i, a) in lattice.iter().enumerate() {
            for b in &lattice[i..] {
                assert_eq!(a.join(*b), Some(*b));
            }
        }
    }

    #[test]
    fn raw_only_mixes_with_raw_and_list() {
        for k in [Logical, Integer, Double, Complex, Character] {
            assert_eq!(Raw.join(k), None);
        }
        assert_eq!(
            Kind::subassign_target(Raw, Integer),
            Err(Error::SubassignTypeFix(Integer, Raw))
        );
        assert_eq!(
            Kind::subassign_target(Double, Raw),
            Err(Error::SubassignTypeFix(Raw, Double))
        );
    }

    #[test]
    fn functions_do_not_join() {
        assert_eq!(Function.join(Function), Some(Function));
        assert_eq!(Function.join(List), None);
        assert_eq!(
            Kind::subassign_target(List, Function),
            Err(Error::SubassignTypeFix(Function, List))
        );
    }
}
