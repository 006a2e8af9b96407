use hashbrown::HashMap;

use super::types::*;
use super::{OptionNA, Vector};
use crate::error::Error;
use crate::lang::{Purpose, Warning, WarningSink};
use crate::object::{Kind, Obj};

/// Names vectors at least this long are hashed before a batch of lookups
const HASH_THRESHOLD: usize = 16;

/// Subsets
///
/// A single position argument, as supplied to one dimension of `[`, `[[`,
/// `[<-` or `[[<-`. Integer indices are 1-based and may be negative, zero
/// or `NA`.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Subset {
    Missing,
    Indices(Vec<Integer>, Option<Vec<Character>>),
    Mask(Vec<Logical>),
    Names(Vec<Character>),
}

/// Positions selected by a single position argument
///
/// Offsets are 0-based, with `None` marking an `NA` position. When the
/// position carries names they are aligned with the offsets.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub indices: Vec<Option<usize>>,
    pub names: Option<Vec<Character>>,
}

/// A position resolved for `[[`
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Single {
    At(usize),
    NA,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn has_na(&self) -> bool {
        self.indices.iter().any(|i| i.is_none())
    }

    /// Length a container needs to hold every selected position
    pub fn extent(&self) -> usize {
        self.indices
            .iter()
            .flatten()
            .map(|i| i + 1)
            .max()
            .unwrap_or(0)
    }

    fn all(len: usize) -> Self {
        Selection {
            indices: (0..len).map(Some).collect(),
            names: None,
        }
    }
}

/// Name lookup against a container's names
///
/// Lookups return the first matching element. Empty and `NA` names never
/// match.
pub struct NameIndex<'a> {
    names: &'a [Character],
    hashed: Option<HashMap<&'a str, usize>>,
}

impl<'a> NameIndex<'a> {
    pub fn new(names: Option<&'a [Character]>, queries: usize) -> Self {
        let names = names.unwrap_or(&[]);
        let hashed = (queries > 1 && names.len() >= HASH_THRESHOLD).then(|| {
            let mut map = HashMap::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                if let OptionNA::Some(name) = name {
                    map.entry(name.as_str()).or_insert(i);
                }
            }
            map
        });

        NameIndex { names, hashed }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }

        match &self.hashed {
            Some(map) => map.get(name).copied(),
            None => self
                .names
                .iter()
                .position(|n| matches!(n, OptionNA::Some(n) if n == name)),
        }
    }
}

impl Subset {
    /// Number of elements in the argument itself, `None` when missing
    pub fn len(&self) -> Option<usize> {
        match self {
            Subset::Missing => None,
            Subset::Indices(i, _) => Some(i.len()),
            Subset::Mask(m) => Some(m.len()),
            Subset::Names(n) => Some(n.len()),
        }
    }

    /// Split a position vector into one position per element, as used to
    /// descend through nested lists.
    pub fn components(&self) -> Vec<Subset> {
        match self {
            Subset::Missing => vec![Subset::Missing],
            Subset::Indices(i, _) => i
                .iter()
                .map(|i| Subset::Indices(vec![i.clone()], None))
                .collect(),
            Subset::Mask(m) => m.iter().map(|m| Subset::Mask(vec![m.clone()])).collect(),
            Subset::Names(n) => n.iter().map(|n| Subset::Names(vec![n.clone()])).collect(),
        }
    }

    /// Normalize into the container positions selected by `[` or `[<-`
    ///
    /// Negative indices select the complement of the excluded positions
    /// and zeros select nothing. Masks are recycled over the container. For
    /// writes, names that do not match any element select new trailing
    /// positions and the position names are returned so they can be stored.
    ///
    pub fn normalize(
        &self,
        len: usize,
        names: Option<&[Character]>,
        purpose: Purpose,
        warnings: &mut dyn WarningSink,
    ) -> Result<Selection, Error> {
        match self {
            Subset::Missing => Ok(Selection::all(len)),
            Subset::Indices(values, pnames) => normalize_indices(values, pnames.as_deref(), len),
            Subset::Mask(mask) => normalize_mask(mask, len, warnings),
            Subset::Names(queries) => Ok(normalize_names(queries, len, names, purpose)),
        }
    }

    /// Resolve the single position selected by `[[` or `[[<-`
    ///
    /// Positions beyond the container, including names that match no
    /// element, are an error when reading and select a new trailing
    /// position when writing.
    ///
    pub fn resolve_one(
        &self,
        len: usize,
        names: Option<&[Character]>,
        purpose: Purpose,
    ) -> Result<Single, Error> {
        use OptionNA::*;
        let beyond = |i: usize| match purpose {
            Purpose::Read => Err(Error::SubscriptOutOfBounds),
            Purpose::Write => Ok(Single::At(i)),
        };

        match self {
            Subset::Missing => Err(Error::InvalidSubscriptType(Kind::Missing)),
            _ if self.len() == Option::Some(0) => Err(Error::SelectLessThanOne),
            Subset::Indices(i, _) if i.len() > 1 => Err(Error::SelectMoreThanOne),
            Subset::Indices(i, _) => match i[0] {
                NA => Ok(Single::NA),
                Some(0) => Err(Error::SelectLessThanOne),
                Some(p) if p < 0 => {
                    let excluded = (-(p as i64) - 1) as usize;
                    let remaining = (0..len).filter(|&i| i != excluded).collect::<Vec<_>>();
                    match remaining.as_slice() {
                        [i] => Ok(Single::At(*i)),
                        [] => Err(Error::SelectLessThanOne),
                        _ => Err(Error::SelectMoreThanOne),
                    }
                }
                Some(p) => {
                    let i = (p - 1) as usize;
                    if i < len {
                        Ok(Single::At(i))
                    } else {
                        beyond(i)
                    }
                }
            },
            Subset::Names(n) if n.len() > 1 => Err(Error::SelectMoreThanOne),
            Subset::Names(n) => {
                let found = match &n[0] {
                    Some(name) => NameIndex::new(names, 1).get(name),
                    NA => None,
                };
                match found {
                    Option::Some(i) => Ok(Single::At(i)),
                    Option::None => beyond(len),
                }
            }
            Subset::Mask(mask) => {
                let n = len.max(mask.len());
                let selected = (0..n)
                    .filter_map(|i| match mask[i % mask.len()] {
                        Some(true) => Option::Some(Option::Some(i)),
                        NA => Option::Some(Option::None),
                        Some(false) => Option::None,
                    })
                    .collect::<Vec<_>>();
                match selected.as_slice() {
                    [Option::Some(i)] if *i < len => Ok(Single::At(*i)),
                    [Option::Some(i)] => beyond(*i),
                    [Option::None] => Ok(Single::NA),
                    [] => Err(Error::SelectLessThanOne),
                    _ => Err(Error::SelectMoreThanOne),
                }
            }
        }
    }

    /// The name a `[[<-` position assigns to a newly created element
    pub fn new_name(&self) -> Option<Character> {
        match self {
            Subset::Names(n) => n.first().cloned(),
            Subset::Indices(_, Some(n)) => n.first().cloned(),
            _ => None,
        }
    }
}

fn normalize_indices(
    values: &[Integer],
    pnames: Option<&[Character]>,
    len: usize,
) -> Result<Selection, Error> {
    use OptionNA::*;
    let negative = values.iter().any(|v| matches!(v, Some(i) if *i < 0));
    let positive = values.iter().any(|v| matches!(v, Some(i) if *i > 0));
    let missing = values.iter().any(|v| v.is_na());

    if negative && (positive || missing) {
        return Err(Error::InvalidNegativeIndex);
    }

    if negative {
        let mut excluded = vec![false; len];
        for v in values {
            if let Some(i) = v {
                let i = (-(*i as i64) - 1) as usize;
                if i < len {
                    excluded[i] = true;
                }
            }
        }

        let indices = (0..len).filter(|&i| !excluded[i]).map(Option::Some).collect();
        return Ok(Selection {
            indices,
            names: None,
        });
    }

    let mut indices = Vec::with_capacity(values.len());
    let mut names = pnames.map(|_| Vec::with_capacity(values.len()));
    for (k, v) in values.iter().enumerate() {
        match v {
            Some(0) => continue,
            Some(i) => indices.push(Option::Some((*i - 1) as usize)),
            NA => indices.push(Option::None),
        }
        if let (Option::Some(names), Option::Some(pnames)) = (names.as_mut(), pnames) {
            names.push(pnames.get(k).cloned().unwrap_or(NA));
        }
    }

    Ok(Selection { indices, names })
}

fn normalize_mask(
    mask: &[Logical],
    len: usize,
    warnings: &mut dyn WarningSink,
) -> Result<Selection, Error> {
    use OptionNA::*;
    if mask.is_empty() {
        return Ok(Selection::default());
    }

    if len > mask.len() && len % mask.len() != 0 {
        warnings.emit_warning(Warning::LengthMismatch)?;
    }

    let n = len.max(mask.len());
    let indices = (0..n)
        .filter_map(|i| match mask[i % mask.len()] {
            Some(true) => Option::Some(Option::Some(i)),
            NA => Option::Some(Option::None),
            Some(false) => Option::None,
        })
        .collect();

    Ok(Selection {
        indices,
        names: None,
    })
}

fn normalize_names(
    queries: &[Character],
    len: usize,
    names: Option<&[Character]>,
    purpose: Purpose,
) -> Selection {
    use OptionNA::*;
    let index = NameIndex::new(names, queries.len());

    match purpose {
        Purpose::Read => Selection {
            indices: queries
                .iter()
                .map(|q| match q {
                    Some(q) => index.get(q),
                    NA => Option::None,
                })
                .collect(),
            names: None,
        },
        Purpose::Write => {
            let mut created: HashMap<&str, usize> = HashMap::new();
            let mut next = len;
            let mut fresh = || {
                next += 1;
                next - 1
            };

            let indices = queries
                .iter()
                .map(|q| {
                    let found = match q {
                        Some(q) => index.get(q),
                        NA => Option::None,
                    };
                    let i = match (found, q) {
                        (Option::Some(i), _) => i,
                        (Option::None, Some(q)) if !q.is_empty() => {
                            *created.entry(q.as_str()).or_insert_with(&mut fresh)
                        }
                        _ => fresh(),
                    };
                    Option::Some(i)
                })
                .collect();

            Selection {
                indices,
                names: Option::Some(queries.to_vec()),
            }
        }
    }
}

impl TryFrom<Obj> for Subset {
    type Error = Error;

    fn try_from(value: Obj) -> Result<Self, Self::Error> {
        match value {
            Obj::Null => Ok(Subset::Indices(vec![], None)),
            Obj::Vector(v) => Subset::try_from(v),
            other => Err(Error::InvalidSubscriptType(other.kind())),
        }
    }
}

impl TryFrom<Vector> for Subset {
    type Error = Error;

    fn try_from(value: Vector) -> Result<Self, Self::Error> {
        let names = value.attrs().names.as_ref().map(|n| n.to_vec());
        match value {
            Vector::Integer(x) => Ok(Subset::Indices(x.into_values(), names)),
            Vector::Double(x) => {
                let indices = x
                    .iter()
                    .map(|d| match d {
                        OptionNA::Some(d) if d.is_finite() => {
                            let d = d.trunc();
                            if d.abs() > i32::MAX as f64 {
                                return Err(Error::SubscriptOutOfBounds);
                            }
                            Ok(OptionNA::Some(d as i32))
                        }
                        _ => Ok(OptionNA::NA),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Subset::Indices(indices, names))
            }
            Vector::Logical(x) => Ok(Subset::Mask(x.into_values())),
            Vector::Character(x) => Ok(Subset::Names(x.into_values())),
            other => Err(Error::InvalidSubscriptType(other.kind())),
        }
    }
}

impl From<i32> for Subset {
    fn from(value: i32) -> Self {
        Subset::Indices(vec![OptionNA::Some(value)], None)
    }
}

impl From<Vec<i32>> for Subset {
    fn from(value: Vec<i32>) -> Self {
        Subset::Indices(value.into_iter().map(OptionNA::Some).collect(), None)
    }
}

impl From<Vec<Integer>> for Subset {
    fn from(value: Vec<Integer>) -> Self {
        Subset::Indices(value, None)
    }
}

impl From<&str> for Subset {
    fn from(value: &str) -> Self {
        Subset::Names(vec![OptionNA::Some(value.to_string())])
    }
}

impl From<Vec<&str>> for Subset {
    fn from(value: Vec<&str>) -> Self {
        Subset::Names(
            value
                .into_iter()
                .map(|s| OptionNA::Some(s.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<bool>> for Subset {
    fn from(value: Vec<bool>) -> Self {
        Subset::Mask(value.into_iter().map(OptionNA::Some).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn na() -> Subset {
        Subset::Indices(vec![OptionNA::NA], None)
    }

    fn read(s: Subset, len: usize) -> Result<Vec<Option<usize>>, Error> {
        s.normalize(len, None, Purpose::Read, &mut Vec::<Warning>::new())
            .map(|s| s.indices)
    }

    #[test]
    fn missing_selects_everything() {
        assert_eq!(read(Subset::Missing, 3), Ok(vec![Some(0), Some(1), Some(2)]));
    }

    #[test]
    fn zeros_select_nothing() {
        assert_eq!(read(Subset::from(vec![0, 2, 0]), 3), Ok(vec![Some(1)]));
        assert_eq!(read(Subset::from(vec![0, 0]), 3), Ok(vec![]));
    }

    #[test]
    fn negatives_select_the_complement() {
        assert_eq!(read(Subset::from(vec![-1, -3]), 4), Ok(vec![Some(1), Some(3)]));
        assert_eq!(read(Subset::from(vec![-9, 0]), 2), Ok(vec![Some(0), Some(1)]));
    }

    #[test]
    fn negatives_cannot_mix() {
        assert_eq!(
            read(Subset::from(vec![-1, 2]), 4),
            Err(Error::InvalidNegativeIndex)
        );
        assert_eq!(
            read(
                Subset::Indices(vec![OptionNA::Some(-1), OptionNA::NA], None),
                4
            ),
            Err(Error::InvalidNegativeIndex)
        );
    }

    #[test]
    fn na_and_out_of_range_indices_are_kept() {
        assert_eq!(
            read(
                Subset::Indices(vec![OptionNA::NA, OptionNA::Some(5)], None),
                2
            ),
            Ok(vec![None, Some(4)])
        );
    }

    #[test]
    fn masks_are_recycled() {
        let mut warnings = vec![];
        let s = Subset::from(vec![true, false])
            .normalize(5, None, Purpose::Read, &mut warnings)
            .unwrap();
        assert_eq!(s.indices, vec![Some(0), Some(2), Some(4)]);
        assert_eq!(warnings, vec![Warning::LengthMismatch]);

        let mut warnings = vec![];
        let s = Subset::from(vec![false, true])
            .normalize(4, None, Purpose::Read, &mut warnings)
            .unwrap();
        assert_eq!(s.indices, vec![Some(1), Some(3)]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn masks_longer_than_container() {
        assert_eq!(
            read(Subset::from(vec![false, false, true]), 1),
            Ok(vec![Some(2)])
        );
    }

    #[test]
    fn names_resolve_against_container_names() {
        let names: Vec<Character> = vec!["a".to_string().into(), "b".to_string().into()];
        let s = Subset::from(vec!["b", "z"])
            .normalize(2, Some(names.as_slice()), Purpose::Read, &mut Vec::<Warning>::new())
            .unwrap();
        assert_eq!(s.indices, vec![Some(1), None]);

        let s = Subset::from(vec!["z", "b", "z", "y"])
            .normalize(2, Some(names.as_slice()), Purpose::Write, &mut Vec::<Warning>::new())
            .unwrap();
        assert_eq!(s.indices, vec![Some(2), Some(1), Some(2), Some(3)]);
        assert_eq!(s.extent(), 4);
        assert_eq!(s.names.map(|n| n.len()), Some(4));
    }

    #[test]
    fn hashed_name_lookup_finds_first_match() {
        let names: Vec<Character> = (0..40)
            .map(|i| OptionNA::Some(format!("n{}", i % 20)))
            .collect();
        let index = NameIndex::new(Some(names.as_slice()), 3);
        assert!(index.hashed.is_some());
        assert_eq!(index.get("n5"), Some(5));
        assert_eq!(index.get("zz"), None);
        assert_eq!(index.get(""), None);
    }

    #[test]
    fn position_names_follow_indices() {
        let s = Subset::Indices(
            vec![OptionNA::Some(0), OptionNA::Some(3)],
            Some(vec!["zero".to_string().into(), "three".to_string().into()]),
        )
        .normalize(2, None, Purpose::Write, &mut Vec::<Warning>::new())
        .unwrap();
        assert_eq!(s.indices, vec![Some(2)]);
        assert_eq!(s.names, Some(vec![OptionNA::Some("three".to_string())]));
    }

    #[test]
    fn single_positions() {
        assert_eq!(
            Subset::from(2).resolve_one(3, None, Purpose::Read),
            Ok(Single::At(1))
        );
        assert_eq!(
            Subset::from(5).resolve_one(3, None, Purpose::Read),
            Err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(
            Subset::from(5).resolve_one(3, None, Purpose::Write),
            Ok(Single::At(4))
        );
        assert_eq!(
            Subset::from(0).resolve_one(3, None, Purpose::Read),
            Err(Error::SelectLessThanOne)
        );
        assert_eq!(na().resolve_one(3, None, Purpose::Read), Ok(Single::NA));
        assert_eq!(
            Subset::from(vec![1, 2]).resolve_one(3, None, Purpose::Read),
            Err(Error::SelectMoreThanOne)
        );
        assert_eq!(
            Subset::from(Vec::<i32>::new()).resolve_one(3, None, Purpose::Read),
            Err(Error::SelectLessThanOne)
        );
        assert_eq!(
            Subset::Missing.resolve_one(3, None, Purpose::Read),
            Err(Error::InvalidSubscriptType(Kind::Missing))
        );
    }

    #[test]
    fn single_negative_positions() {
        assert_eq!(
            Subset::from(-1).resolve_one(2, None, Purpose::Read),
            Ok(Single::At(1))
        );
        assert_eq!(
            Subset::from(-1).resolve_one(3, None, Purpose::Read),
            Err(Error::SelectMoreThanOne)
        );
        assert_eq!(
            Subset::from(-1).resolve_one(1, None, Purpose::Read),
            Err(Error::SelectLessThanOne)
        );
    }

    #[test]
    fn single_names() {
        let names: Vec<Character> = vec!["a".to_string().into()];
        assert_eq!(
            Subset::from("a").resolve_one(1, Some(names.as_slice()), Purpose::Read),
            Ok(Single::At(0))
        );
        assert_eq!(
            Subset::from("b").resolve_one(1, Some(names.as_slice()), Purpose::Read),
            Err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(
            Subset::from("b").resolve_one(1, Some(names.as_slice()), Purpose::Write),
            Ok(Single::At(1))
        );
    }

    #[test]
    fn subsets_from_values() {
        assert_eq!(
            Subset::try_from(Obj::from(vec![1.9, -2.5])),
            Ok(Subset::from(vec![1, -2]))
        );
        assert_eq!(
            Subset::try_from(Obj::from(vec![f64::NAN])),
            Ok(Subset::Indices(vec![OptionNA::NA], None))
        );
        assert_eq!(Subset::try_from(Obj::from(true)), Ok(Subset::from(vec![true])));
        assert_eq!(
            Subset::try_from(Obj::Vector(Vector::raw(vec![1]))),
            Err(Error::InvalidSubscriptType(Kind::Raw))
        );
        assert_eq!(
            Subset::try_from(Obj::from(vec![Obj::Null])),
            Err(Error::InvalidSubscriptType(Kind::List))
        );
    }

    #[test]
    fn doubles_beyond_integer_range_are_rejected() {
        assert_eq!(
            Subset::try_from(Obj::from(vec![1.0, 1e10])),
            Err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(
            Subset::try_from(Obj::from(-1e10)),
            Err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(
            Subset::try_from(Obj::from(2147483647.5)),
            Ok(Subset::from(vec![i32::MAX]))
        );
    }
}
