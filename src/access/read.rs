use super::recursive::{get_binding, get_recursive};
use crate::error::Error;
use crate::lang::{AccessMode, EvalResult, Purpose, WarningSink};
use crate::object::{Attributes, Character, IndexPlan, Kind, Obj, OptionNA, Selection, Subset};
use crate::object::{resolve, CowObj};

/// Read the elements of a container selected by a resolved index plan
///
/// `[` gathers every planned offset, producing `NA` (or `NULL` in lists) for
/// `NA` and out-of-range positions. `[[` extracts exactly one element.
///
pub fn read(container: &Obj, plan: &IndexPlan, mode: AccessMode) -> EvalResult {
    match (container, mode) {
        (Obj::Null, _) => Ok(Obj::Null),
        (Obj::Vector(v), AccessMode::Subset) => {
            let mut result = v.select(&plan.offsets);
            shape(result.attrs_mut(), v.attrs(), plan);
            Ok(Obj::Vector(result))
        }
        (Obj::Vector(v), AccessMode::Subscript) => {
            let i = single_offset(plan, v.len())?;
            let mut result = v.select(&[Some(i)]);
            *result.attrs_mut() = Attributes::default();
            Ok(Obj::Vector(result))
        }
        (Obj::List(l), AccessMode::Subset) => {
            let mut result = l.select(&plan.offsets);
            shape(result.attrs_mut(), l.attrs(), plan);
            Ok(Obj::List(result))
        }
        (Obj::List(l), AccessMode::Subscript) => {
            let i = single_offset(plan, l.len())?;
            Ok(l.get(i).cloned().unwrap_or_default())
        }
        (other, _) => Err(Error::ObjectNotSubsettable(other.kind())),
    }
}

fn single_offset(plan: &IndexPlan, len: usize) -> Result<usize, Error> {
    match plan.offsets.as_slice() {
        [Some(i)] if *i < len => Ok(*i),
        [Some(_)] => Err(Error::SubscriptOutOfBounds),
        [None] => Err(Error::NASubscripted),
        [] => Err(Error::SelectLessThanOne),
        _ => Err(Error::SelectMoreThanOne),
    }
}

/// Shape the result of an array read
///
/// Dimensions with a single selected position are dropped. A single
/// remaining dimension turns its dimnames into names.
fn shape(result: &mut Attributes, source: &Attributes, plan: &IndexPlan) {
    let Some(selections) = plan.dims.as_ref() else {
        return;
    };

    result.names = None;
    let kept: Vec<usize> = (0..selections.len())
        .filter(|&k| selections[k].len() != 1)
        .collect();

    let names_of = |k: usize| -> Option<Vec<Character>> {
        let names = source.dimnames.as_ref()?.get(k)?.as_ref()?;
        Some(select_names(names, &selections[k]))
    };

    match kept.as_slice() {
        [] => (),
        [k] => result.names = names_of(*k).map(CowObj::from),
        kept => {
            result.dim = Some(kept.iter().map(|&k| selections[k].len()).collect());
            if source.dimnames.is_some() {
                result.dimnames = Some(kept.iter().map(|&k| names_of(k)).collect());
            }
        }
    }
}

fn select_names(names: &[Character], selection: &Selection) -> Vec<Character> {
    selection
        .indices
        .iter()
        .map(|i| i.and_then(|i| names.get(i).cloned()).unwrap_or(OptionNA::NA))
        .collect()
}

impl Obj {
    /// Index into an object with `[` or `[[`
    ///
    /// Lists indexed by `[[` with a position vector longer than one are
    /// indexed recursively, environments are indexed by binding name and S4
    /// objects forward to their data slot.
    ///
    pub fn try_get(
        &self,
        positions: &[Subset],
        mode: AccessMode,
        warnings: &mut dyn WarningSink,
    ) -> EvalResult {
        match (self, mode, positions) {
            (Obj::Function(_), ..) => Err(Error::ObjectNotSubsettable(Kind::Function)),
            (Obj::Environment(env), ..) => get_binding(env, positions, mode),
            (Obj::S4(s4), ..) => match s4.data_slot() {
                Some(data) => Obj::Environment(data.clone()).try_get(positions, mode, warnings),
                None => Err(Error::ObjectNotSubsettable(Kind::S4)),
            },
            (Obj::List(_), AccessMode::Subscript, [subset])
                if subset.len().is_some_and(|n| n > 1) =>
            {
                get_recursive(self, subset, warnings)
            }
            _ => {
                let plan = resolve(self, positions, mode, Purpose::Read, warnings)?;
                read(self, &plan, mode)
            }
        }
    }
}
