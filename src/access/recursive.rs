use std::rc::Rc;

use super::assign::assign;
use crate::err;
use crate::error::Error;
use crate::lang::{AccessMode, EvalResult, Purpose, WarningSink};
use crate::object::{Environment, Obj, OptionNA, S4Object, Single, Subset};

/// Read `x[[c(i, j, ...)]]`, descending one list level per component
///
/// Every component but the last must select an existing list element. The
/// last component is an ordinary `[[` read of whatever was reached.
///
pub fn get_recursive(x: &Obj, subset: &Subset, warnings: &mut dyn WarningSink) -> EvalResult {
    let components = subset.components();
    let Some((last, path)) = components.split_last() else {
        return Err(Error::SelectLessThanOne);
    };

    let mut current = x;
    for (level, component) in path.iter().enumerate() {
        current = match current {
            Obj::List(l) => {
                let i = descend(component, l.len(), l.names(), level)?;
                l.get(i).ok_or(Error::NoSuchIndexAtLevel(level + 1))?
            }
            _ => return Err(Error::RecursiveIndexingFailed(level + 1)),
        };
    }

    tracing::debug!(depth = path.len(), "recursive [[ read");
    current.try_get(std::slice::from_ref(last), AccessMode::Subscript, warnings)
}

/// Assign `x[[c(i, j, ...)]] <- value`
///
/// The element on the path is taken out of its parent, assigned into and
/// put back, so that only the levels actually shared with another value
/// get copied.
///
pub fn assign_recursive(
    x: Obj,
    components: &[Subset],
    value: Obj,
    level: usize,
    warnings: &mut dyn WarningSink,
) -> EvalResult {
    let [head, rest @ ..] = components else {
        return Err(Error::SelectLessThanOne);
    };

    if rest.is_empty() {
        return assign(
            x,
            std::slice::from_ref(head),
            value,
            AccessMode::Subscript,
            warnings,
        );
    }

    let Obj::List(mut list) = x else {
        return Err(Error::RecursiveIndexingFailed(level + 1));
    };

    let i = descend(head, list.len(), list.names(), level)?;
    tracing::debug!(level = level + 1, index = i, "recursive [[ assignment");

    let child = list.with_values_mut(|v| std::mem::take(&mut v[i]));
    let child = assign_recursive(child, rest, value, level + 1, warnings)?;
    list.with_values_mut(|v| v[i] = child);

    Ok(Obj::List(list))
}

/// Select the existing element a non-final component of a recursive index
/// refers to.
fn descend(
    component: &Subset,
    len: usize,
    names: Option<&[crate::object::Character]>,
    level: usize,
) -> Result<usize, Error> {
    match component.resolve_one(len, names, Purpose::Read) {
        Ok(Single::At(i)) => Ok(i),
        Ok(Single::NA) | Err(Error::SubscriptOutOfBounds) | Err(Error::SelectLessThanOne) => {
            Err(Error::NoSuchIndexAtLevel(level + 1))
        }
        Err(e) => Err(e),
    }
}

/// The binding name of an environment index, `e[["name"]]`
fn binding_name(positions: &[Subset], mode: AccessMode) -> Result<&str, Error> {
    match (mode, positions) {
        (AccessMode::Subset, _) => Err(Error::ObjectNotSubsettable(crate::object::Kind::Environment)),
        (AccessMode::Subscript, [Subset::Names(n)]) => match n.as_slice() {
            [OptionNA::Some(name)] => Ok(name.as_str()),
            _ => Err(err!("wrong args for environment subassignment")),
        },
        (AccessMode::Subscript, _) => Err(err!("wrong args for environment subassignment")),
    }
}

/// Look up a binding, `NULL` when it does not exist
pub fn get_binding(env: &Rc<Environment>, positions: &[Subset], mode: AccessMode) -> EvalResult {
    let name = binding_name(positions, mode)?;
    Ok(env.get(name).unwrap_or_default())
}

/// Bind `value` in an environment
///
/// Environments are mutated in place and the same environment is returned.
pub fn assign_binding(
    env: Rc<Environment>,
    positions: &[Subset],
    value: Obj,
    mode: AccessMode,
) -> EvalResult {
    let name = binding_name(positions, mode)?;
    env.insert(name.to_string(), value);
    Ok(Obj::Environment(env))
}

/// Forward an assignment to the environment data slot of an S4 object
///
/// The object itself is returned unchanged; only its data slot is
/// modified.
pub fn assign_s4(
    s4: Rc<S4Object>,
    positions: &[Subset],
    value: Obj,
    mode: AccessMode,
) -> EvalResult {
    let Some(data) = s4.data_slot() else {
        return Err(Error::NoApplicableMethod);
    };

    tracing::debug!(class = %s4.class, "forwarding assignment to S4 data slot");
    assign_binding(data.clone(), positions, value, mode)?;
    Ok(Obj::S4(s4))
}
