use super::recursive::{assign_binding, assign_recursive, assign_s4};
use crate::error::Error;
use crate::internal_err;
use crate::lang::{AccessMode, EvalResult, Purpose, Warning, WarningSink};
use crate::object::{
    resolve, Character, IndexPlan, Kind, List, Obj, OptionNA, Single, Subset, Vector,
};

/// Assign `value` into `container` at `positions`, `x[...] <- value` or
/// `x[[...]] <- value`
///
/// The container is taken by value. Its storage is written in place when
/// nothing else refers to it and copied first otherwise. All validation,
/// including escalation of warnings to errors, happens before the first
/// write, so a failed assignment never leaves a partially modified value
/// visible through another reference.
///
/// Assigning `NULL` deletes list elements. Environments bind names in
/// place and S4 objects forward to their data slot.
///
pub fn assign(
    container: Obj,
    positions: &[Subset],
    value: Obj,
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> EvalResult {
    match container {
        Obj::Function(_) => Err(Error::ObjectNotSubsettable(Kind::Function)),
        Obj::Environment(env) => assign_binding(env, positions, value, mode),
        Obj::S4(s4) => assign_s4(s4, positions, value, mode),
        Obj::List(_) if is_recursive(positions, mode) => {
            assign_recursive(container, &positions[0].components(), value, 0, warnings)
        }
        container => match value {
            Obj::Null => delete(container, positions, mode, warnings),
            value => replace(container, positions, value, mode, warnings),
        },
    }
}

fn is_recursive(positions: &[Subset], mode: AccessMode) -> bool {
    matches!((mode, positions), (AccessMode::Subscript, [p]) if p.len().is_some_and(|n| n > 1))
}

/// Whether `[[<-` stores the value whole, as a single list element
///
/// List values are always stored whole, turning an atomic container into a
/// list first.
fn stores_whole(container: &Obj, value: &Obj, mode: AccessMode) -> bool {
    mode == AccessMode::Subscript
        && match (container, value) {
            (Obj::List(_), _) | (_, Obj::List(_)) => true,
            (Obj::Null, value) => !matches!(value, Obj::Vector(v) if v.len() == 1),
            _ => false,
        }
}

fn replace(
    container: Obj,
    positions: &[Subset],
    value: Obj,
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> EvalResult {
    let whole = stores_whole(&container, &value, mode);

    let target = if whole {
        Kind::List
    } else {
        Kind::subassign_target(container.kind(), value.kind())?
    };

    if mode == AccessMode::Subscript && !whole {
        match value.len() {
            0 => return Err(Error::ReplacementZero),
            1 => (),
            _ => return Err(Error::MoreElementsSupplied),
        }
    }

    let plan = resolve(&container, positions, mode, Purpose::Write, warnings)?;

    let values = if whole {
        Obj::List(List::from(vec![value]))
    } else {
        value.coerce_to(target)?
    };

    check_lengths(&plan, values.len(), mode, warnings)?;
    if plan.is_empty() || values.is_empty() {
        return container.coerce_to(target);
    }

    let mut result = container.coerce_to(target)?;
    drop(container);

    let extent = plan.extent();
    if extent > result.len() {
        match &mut result {
            Obj::Vector(v) => v.resize(extent),
            Obj::List(l) => l.resize(extent),
            _ => return Err(internal_err!("container is not a vector")),
        }
    }

    write_values(&mut result, &plan, &values)?;
    write_names(&mut result, &plan);
    Ok(result)
}

/// Reject or warn about mismatched lengths before anything is written
fn check_lengths(
    plan: &IndexPlan,
    len: usize,
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> Result<(), Error> {
    if mode == AccessMode::Subscript {
        return match plan.offsets.as_slice() {
            [Some(_)] => Ok(()),
            _ => Err(Error::NASubscripted),
        };
    }

    let n = plan.len();
    if n == 0 {
        return Ok(());
    }

    if len == 0 {
        return Err(Error::ReplacementZero);
    }

    if len > 1 && plan.has_na() {
        return Err(Error::NASubscripted);
    }

    if n % len != 0 {
        warnings.emit_warning(Warning::NotMultipleReplacement)?;
    }

    Ok(())
}

macro_rules! write_same_kind {
    ($target:expr, $plan:expr, $values:expr; $($variant:ident),*) => {
        match ($target, $values) {
            $(
                (Obj::Vector(Vector::$variant(t)), Obj::Vector(Vector::$variant(v))) => {
                    t.write(&$plan.offsets, v.values())
                }
            )*
            (Obj::List(t), Obj::List(v)) => t.write(&$plan.offsets, v.values()),
            _ => return Err(internal_err!("values were not coerced to the container kind")),
        }
    };
}

fn write_values(target: &mut Obj, plan: &IndexPlan, values: &Obj) -> Result<(), Error> {
    tracing::debug!(
        kind = %target.kind(),
        positions = plan.len(),
        shared = target.is_shared(),
        "writing elements"
    );
    write_same_kind!(target, plan, values; Raw, Logical, Integer, Double, Complex, Character);
    Ok(())
}

/// Store names carried by the positions at the written offsets
fn write_names(target: &mut Obj, plan: &IndexPlan) {
    let Some(names) = plan.names.as_ref() else {
        return;
    };

    let mut write = |slots: &mut Vec<Character>| {
        for (offset, name) in plan.offsets.iter().zip(names.iter()) {
            if let Some(slot) = offset.and_then(|o| slots.get_mut(o)) {
                *slot = name.clone();
            }
        }
    };

    match target {
        Obj::Vector(v) => v.names_mut().with_inner_mut(&mut write),
        Obj::List(l) => l.names_mut().with_inner_mut(&mut write),
        _ => (),
    }
}

/// Assign `NULL`, deleting list elements
fn delete(
    container: Obj,
    positions: &[Subset],
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> EvalResult {
    match container {
        Obj::Null => Ok(Obj::Null),
        Obj::List(list) => delete_elements(list, positions, mode, warnings),
        _ if mode == AccessMode::Subscript => match positions {
            [Subset::Indices(i, _)] if matches!(i.as_slice(), [OptionNA::Some(0)]) => {
                Err(Error::ReplacementZero)
            }
            _ => Err(Error::MoreElementsSupplied),
        },
        container => {
            let plan = resolve(&container, positions, mode, Purpose::Write, warnings)?;
            if plan.is_empty() {
                Ok(container)
            } else {
                Err(Error::ReplacementZero)
            }
        }
    }
}

fn delete_elements(
    mut list: List,
    positions: &[Subset],
    mode: AccessMode,
    warnings: &mut dyn WarningSink,
) -> EvalResult {
    if positions.len() > 1 {
        let container = Obj::List(list);
        resolve(&container, positions, mode, Purpose::Write, warnings)?;
        return Err(match mode {
            AccessMode::Subset => Error::NotMultipleReplacement,
            AccessMode::Subscript => Error::SubscriptTypes(Kind::Null, Kind::List),
        });
    }

    let len = list.len();
    let missing = Subset::Missing;
    let subset = positions.first().unwrap_or(&missing);

    let offsets: Vec<usize> = match mode {
        AccessMode::Subscript => match subset.resolve_one(len, list.names(), Purpose::Write)? {
            Single::At(i) if i < len => vec![i],
            _ => vec![],
        },
        AccessMode::Subset => subset
            .normalize(len, list.names(), Purpose::Write, warnings)?
            .indices
            .into_iter()
            .flatten()
            .collect(),
    };

    if offsets.is_empty() {
        return Ok(Obj::List(list));
    }

    let extent = offsets.iter().map(|i| i + 1).max().unwrap_or(0).max(len);
    list.resize(extent);

    let mut remove = vec![false; extent];
    for i in offsets {
        remove[i] = true;
    }

    tracing::debug!(
        deleted = remove.iter().filter(|&&r| r).count(),
        "deleting list elements"
    );
    list.retain_mask(&remove);
    Ok(Obj::List(list))
}
