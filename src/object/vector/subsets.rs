use super::subset::{NameIndex, Selection, Single, Subset};
use super::types::Character;
use super::OptionNA;
use crate::error::Error;
use crate::lang::{AccessMode, Purpose, WarningSink};
use crate::object::Obj;

/// The full set of position arguments of one indexing call, one per
/// dimension (or a single one for linear indexing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subsets(pub Vec<Subset>);

/// Storage offsets resolved from a set of position arguments
///
/// Offsets are 0-based positions into the container's column-major
/// storage, with `None` for `NA` positions. Offsets at or beyond the
/// container's length only arise when writing with linear positions and
/// call for the container to be extended.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexPlan {
    pub offsets: Vec<Option<usize>>,
    /// Names carried by a linear position, aligned with `offsets`
    pub names: Option<Vec<Character>>,
    /// Per-dimension selections of an array index
    pub dims: Option<Vec<Selection>>,
}

impl IndexPlan {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn has_na(&self) -> bool {
        self.offsets.iter().any(|o| o.is_none())
    }

    /// Length a container needs to hold every resolved offset
    pub fn extent(&self) -> usize {
        self.offsets
            .iter()
            .flatten()
            .map(|i| i + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Subsets {
    /// Resolve positions against a container
    ///
    /// A single position indexes the container's storage linearly. Several
    /// positions must match the container's dimensions; offsets are then
    /// enumerated with the first dimension varying fastest, matching the
    /// storage order.
    ///
    pub fn resolve(
        &self,
        container: &Obj,
        mode: AccessMode,
        purpose: Purpose,
        warnings: &mut dyn WarningSink,
    ) -> Result<IndexPlan, Error> {
        match self.0.as_slice() {
            [] => resolve_linear(&Subset::Missing, container, mode, purpose, warnings),
            [subset] => resolve_linear(subset, container, mode, purpose, warnings),
            subsets => {
                let dim = container.dim().unwrap_or(&[]);
                if dim.len() == subsets.len() {
                    return resolve_array(subsets, dim, container, mode, warnings);
                }

                Err(match (mode, subsets.len(), dim.len()) {
                    (AccessMode::Subscript, ..) => Error::ImproperSubscript,
                    (AccessMode::Subset, 2, 0) => Error::IncorrectSubscriptsMatrix,
                    (AccessMode::Subset, ..) => Error::IncorrectSubscripts,
                })
            }
        }
    }
}

/// Resolve positions to storage offsets
///
/// See [`Subsets::resolve`].
pub fn resolve(
    container: &Obj,
    positions: &[Subset],
    mode: AccessMode,
    purpose: Purpose,
    warnings: &mut dyn WarningSink,
) -> Result<IndexPlan, Error> {
    Subsets(positions.to_vec()).resolve(container, mode, purpose, warnings)
}

fn resolve_linear(
    subset: &Subset,
    container: &Obj,
    mode: AccessMode,
    purpose: Purpose,
    warnings: &mut dyn WarningSink,
) -> Result<IndexPlan, Error> {
    let len = container.len();
    let names = container.names();

    match mode {
        AccessMode::Subset => {
            let selection = subset.normalize(len, names, purpose, warnings)?;
            Ok(IndexPlan {
                offsets: selection.indices,
                names: selection.names,
                dims: None,
            })
        }
        AccessMode::Subscript => match subset.resolve_one(len, names, purpose)? {
            Single::NA => Ok(IndexPlan {
                offsets: vec![None],
                ..Default::default()
            }),
            Single::At(i) => Ok(IndexPlan {
                offsets: vec![Some(i)],
                names: match subset {
                    Subset::Names(_) if i >= len => subset.new_name().map(|n| vec![n]),
                    _ => None,
                },
                dims: None,
            }),
        },
    }
}

fn resolve_array(
    subsets: &[Subset],
    dim: &[usize],
    container: &Obj,
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> Result<IndexPlan, Error> {
    let dimnames = container.dimnames();

    let mut selections = Vec::with_capacity(subsets.len());
    for (k, (subset, &extent)) in subsets.iter().zip(dim.iter()).enumerate() {
        let names = dimnames
            .and_then(|dn| dn.get(k))
            .and_then(|n| n.as_deref());

        let selection = match mode {
            AccessMode::Subset => normalize_extent(subset, extent, names, warnings)?,
            AccessMode::Subscript => match subset.resolve_one(extent, names, Purpose::Read)? {
                Single::At(i) => Selection {
                    indices: vec![Some(i)],
                    names: None,
                },
                Single::NA => return Err(Error::NASubscripted),
            },
        };
        selections.push(selection);
    }

    let offsets = column_major_offsets(&selections, dim);
    Ok(IndexPlan {
        offsets,
        names: None,
        dims: Some(selections),
    })
}

/// Normalize one dimension of an array index, which may never reach
/// beyond the dimension's extent.
fn normalize_extent(
    subset: &Subset,
    extent: usize,
    dimnames: Option<&[Character]>,
    warnings: &mut dyn WarningSink,
) -> Result<Selection, Error> {
    if let Subset::Names(queries) = subset {
        let index = NameIndex::new(dimnames, queries.len());
        let indices = queries
            .iter()
            .map(|q| match q {
                OptionNA::Some(q) => index.get(q).map(Some).ok_or(Error::SubscriptOutOfBounds),
                OptionNA::NA => Err(Error::SubscriptOutOfBounds),
            })
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Selection {
            indices,
            names: None,
        });
    }

    let selection = subset.normalize(extent, None, Purpose::Read, warnings)?;
    if selection.extent() > extent {
        return Err(Error::SubscriptOutOfBounds);
    }

    Ok(Selection {
        names: None,
        ..selection
    })
}

/// Enumerate the offsets of every combination of per-dimension positions,
/// first dimension fastest.
fn column_major_offsets(selections: &[Selection], dim: &[usize]) -> Vec<Option<usize>> {
    let total: usize = selections.iter().map(|s| s.len()).product();
    if total == 0 {
        return vec![];
    }

    let strides = dim
        .iter()
        .scan(1, |stride, &extent| {
            let current = *stride;
            *stride *= extent;
            Some(current)
        })
        .collect::<Vec<usize>>();

    let mut offsets = Vec::with_capacity(total);
    let mut counter = vec![0; selections.len()];

    'outer: loop {
        let offset = selections
            .iter()
            .zip(counter.iter())
            .zip(strides.iter())
            .try_fold(0, |acc, ((selection, &c), &stride)| {
                selection.indices[c].map(|i| acc + i * stride)
            });
        offsets.push(offset);

        for (k, c) in counter.iter_mut().enumerate() {
            *c += 1;
            if *c < selections[k].len() {
                continue 'outer;
            }
            *c = 0;
        }
        break;
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Warning;
    use crate::object::Vector;

    fn matrix(nrow: i32, ncol: i32) -> Obj {
        let mut x = Obj::from((1..=nrow * ncol).collect::<Vec<i32>>());
        x.set_attr("dim", Obj::from(vec![nrow, ncol])).unwrap();
        x
    }

    fn offsets(x: &Obj, s: Vec<Subset>, mode: AccessMode) -> Result<Vec<Option<usize>>, Error> {
        resolve(x, &s, mode, Purpose::Read, &mut Vec::<Warning>::new()).map(|p| p.offsets)
    }

    #[test]
    fn linear_positions() {
        let x = Obj::from(vec![1, 2, 3]);
        assert_eq!(
            offsets(&x, vec![Subset::from(vec![3, 1])], AccessMode::Subset),
            Ok(vec![Some(2), Some(0)])
        );
        assert_eq!(
            offsets(&x, vec![], AccessMode::Subset),
            Ok(vec![Some(0), Some(1), Some(2)])
        );
    }

    #[test]
    fn column_selection() {
        let x = matrix(2, 3);
        assert_eq!(
            offsets(&x, vec![Subset::Missing, Subset::from(2)], AccessMode::Subset),
            Ok(vec![Some(2), Some(3)])
        );
    }

    #[test]
    fn first_dimension_varies_fastest() {
        let x = matrix(2, 3);
        assert_eq!(
            offsets(
                &x,
                vec![Subset::from(vec![2, 1]), Subset::from(vec![1, 3])],
                AccessMode::Subset
            ),
            Ok(vec![Some(1), Some(0), Some(5), Some(4)])
        );
    }

    #[test]
    fn array_offsets() {
        let mut x = Obj::from((1..=24).collect::<Vec<i32>>());
        x.set_attr("dim", Obj::from(vec![2, 3, 4])).unwrap();
        assert_eq!(
            offsets(
                &x,
                vec![Subset::from(2), Subset::from(3), Subset::from(4)],
                AccessMode::Subscript
            ),
            Ok(vec![Some(1 + 2 * 2 + 3 * 6)])
        );
    }

    #[test]
    fn na_positions_propagate() {
        let x = matrix(2, 2);
        assert_eq!(
            offsets(
                &x,
                vec![
                    Subset::Indices(vec![OptionNA::NA, OptionNA::Some(1)], None),
                    Subset::from(2)
                ],
                AccessMode::Subset
            ),
            Ok(vec![None, Some(2)])
        );
        assert_eq!(
            offsets(
                &x,
                vec![Subset::Indices(vec![OptionNA::NA], None), Subset::from(2)],
                AccessMode::Subscript
            ),
            Err(Error::NASubscripted)
        );
    }

    #[test]
    fn empty_dimension_selects_nothing() {
        let x = matrix(2, 2);
        assert_eq!(
            offsets(&x, vec![Subset::from(0), Subset::Missing], AccessMode::Subset),
            Ok(vec![])
        );
    }

    #[test]
    fn dimension_bounds() {
        let x = matrix(2, 2);
        assert_eq!(
            offsets(&x, vec![Subset::from(3), Subset::from(1)], AccessMode::Subset),
            Err(Error::SubscriptOutOfBounds)
        );
        assert_eq!(
            offsets(&x, vec![Subset::from(3), Subset::from(1)], AccessMode::Subscript),
            Err(Error::SubscriptOutOfBounds)
        );
    }

    #[test]
    fn dimnames_resolve_positions() {
        let mut x = matrix(2, 2);
        x.set_attr(
            "dimnames",
            Obj::from(vec![Obj::from(vec!["a", "b"]), Obj::Null]),
        )
        .unwrap();

        assert_eq!(
            offsets(&x, vec![Subset::from("b"), Subset::from(2)], AccessMode::Subset),
            Ok(vec![Some(3)])
        );
        assert_eq!(
            offsets(&x, vec![Subset::from("z"), Subset::from(2)], AccessMode::Subset),
            Err(Error::SubscriptOutOfBounds)
        );
    }

    #[test]
    fn wrong_number_of_subscripts() {
        let v = Obj::from(vec![1, 2]);
        let two = vec![Subset::from(1), Subset::from(1)];
        let three = vec![Subset::from(1), Subset::from(1), Subset::from(1)];

        assert_eq!(
            offsets(&v, two.clone(), AccessMode::Subset),
            Err(Error::IncorrectSubscriptsMatrix)
        );
        assert_eq!(
            offsets(&v, two, AccessMode::Subscript),
            Err(Error::ImproperSubscript)
        );
        assert_eq!(
            offsets(&matrix(1, 1), three.clone(), AccessMode::Subset),
            Err(Error::IncorrectSubscripts)
        );
        assert_eq!(
            offsets(&v, three, AccessMode::Subset),
            Err(Error::IncorrectSubscripts)
        );
    }

    #[test]
    fn subscript_names_beyond_length() {
        let mut x = Obj::Vector(Vector::from(vec![1]));
        x.set_attr("names", Obj::from(vec!["a"])).unwrap();
        let plan = resolve(
            &x,
            &[Subset::from("b")],
            AccessMode::Subscript,
            Purpose::Write,
            &mut Vec::<Warning>::new(),
        )
        .unwrap();
        assert_eq!(plan.offsets, vec![Some(1)]);
        assert_eq!(plan.names, Some(vec![OptionNA::Some("b".to_string())]));
        assert_eq!(plan.extent(), 2);
    }
}
