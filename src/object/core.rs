use std::rc::Rc;

use hashbrown::HashMap;

use super::vector::{Character, Cplx, OptionNA, Vector};
use super::{Attributes, CowObj, Environment, Kind, List, S4Object};
use crate::err;
use crate::error::Error;

/// A function value
///
/// Calling functions is the evaluator's business. Here they only exist as
/// values that can be stored in lists and that refuse to be indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub formals: Vec<String>,
    pub body: String,
}

#[derive(Debug, Default, Clone)]
pub enum Obj {
    #[default]
    Null,
    Vector(Vector),
    List(List),
    Function(Rc<Closure>),
    Environment(Rc<Environment>),
    S4(Rc<S4Object>),
}

impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Obj::Null, Obj::Null) => true,
            (Obj::Vector(l), Obj::Vector(r)) => l == r,
            (Obj::List(l), Obj::List(r)) => l == r,
            (Obj::Function(l), Obj::Function(r)) => Rc::ptr_eq(l, r),
            (Obj::Environment(l), Obj::Environment(r)) => Rc::ptr_eq(l, r),
            (Obj::S4(l), Obj::S4(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl Obj {
    pub fn kind(&self) -> Kind {
        match self {
            Obj::Null => Kind::Null,
            Obj::Vector(v) => v.kind(),
            Obj::List(_) => Kind::List,
            Obj::Function(_) => Kind::Function,
            Obj::Environment(_) => Kind::Environment,
            Obj::S4(_) => Kind::S4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Obj::Null => 0,
            Obj::Vector(v) => v.len(),
            Obj::List(l) => l.len(),
            Obj::Environment(e) => e.len(),
            Obj::Function(_) | Obj::S4(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether modifying this value requires a copy
    pub fn is_shared(&self) -> bool {
        match self {
            Obj::Vector(v) => v.is_shared(),
            Obj::List(l) => l.is_shared(),
            _ => false,
        }
    }

    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            Obj::Vector(v) => Some(v.attrs()),
            Obj::List(l) => Some(l.attrs()),
            _ => None,
        }
    }

    pub fn attrs_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Obj::Vector(v) => Some(v.attrs_mut()),
            Obj::List(l) => Some(l.attrs_mut()),
            _ => None,
        }
    }

    pub fn names(&self) -> Option<&[Character]> {
        self.attrs()?.names.as_ref().map(|n| n.as_slice())
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.attrs()?.dim.as_deref()
    }

    pub fn dimnames(&self) -> Option<&[Option<Vec<Character>>]> {
        self.attrs()?.dimnames.as_deref()
    }

    /// Position of the first element named `name`
    pub fn lookup_name(&self, name: &str) -> Option<usize> {
        self.names()?
            .iter()
            .position(|n| matches!(n, OptionNA::Some(n) if n == name))
    }

    /// Read an attribute
    pub fn get_attr(&self, key: &str) -> Option<Obj> {
        let attrs = self.attrs()?;
        match key {
            "names" => attrs
                .names
                .as_ref()
                .map(|n| Obj::Vector(Vector::from(n.to_vec()))),
            "dim" => attrs.dim.as_ref().map(|d| {
                Obj::Vector(Vector::from(
                    d.iter().map(|&i| i as i32).collect::<Vec<i32>>(),
                ))
            }),
            "dimnames" => attrs.dimnames.as_ref().map(|dn| {
                Obj::List(List::from(
                    dn.iter()
                        .map(|n| match n {
                            Some(n) => Obj::Vector(Vector::from(n.clone())),
                            None => Obj::Null,
                        })
                        .collect::<Vec<Obj>>(),
                ))
            }),
            key => attrs.get_other(key).cloned(),
        }
    }

    /// Set an attribute, or remove it when `value` is `NULL`
    ///
    /// `names` shorter than the object are padded with `NA`. Setting `dim`
    /// clears `names` and `dimnames`.
    ///
    pub fn set_attr(&mut self, key: &str, value: Obj) -> Result<(), Error> {
        let len = self.len();
        let Some(attrs) = self.attrs_mut() else {
            return Err(err!("attempt to set an attribute on a non-vector object"));
        };

        match (key, value) {
            ("names", Obj::Null) => attrs.names = None,
            ("names", value) => {
                let mut names = character_values(&value)?;
                if names.len() > len {
                    return Err(Error::NamesLengthMismatch(names.len(), len));
                }
                names.resize(len, OptionNA::NA);
                attrs.names = Some(CowObj::from(names));
            }
            ("dim", Obj::Null) => attrs.drop_dims(),
            ("dim", value) => {
                let dim = dim_values(&value)?;
                let product: usize = dim.iter().product();
                if product != len {
                    return Err(Error::DimsDoNotMatchLength(product, len));
                }
                attrs.names = None;
                attrs.dimnames = None;
                attrs.dim = Some(dim);
            }
            ("dimnames", Obj::Null) => attrs.dimnames = None,
            ("dimnames", Obj::List(l)) => {
                let Some(dim) = attrs.dim.as_ref() else {
                    return Err(err!("'dimnames' applied to non-array"));
                };
                if l.len() != dim.len() {
                    return Err(err!(format!(
                        "length of 'dimnames' [{}] must match that of 'dims' [{}]",
                        l.len(),
                        dim.len()
                    )));
                }

                let mut dimnames = Vec::with_capacity(dim.len());
                for (k, (names, &extent)) in l.iter().zip(dim.iter()).enumerate() {
                    match names {
                        Obj::Null => dimnames.push(None),
                        names => {
                            let names = character_values(names)?;
                            if names.len() != extent {
                                return Err(err!(format!(
                                    "length of 'dimnames' [{}] not equal to array extent",
                                    k + 1
                                )));
                            }
                            dimnames.push(Some(names));
                        }
                    }
                }
                attrs.dimnames = Some(dimnames);
            }
            ("dimnames", _) => return Err(err!("'dimnames' must be a list")),
            (key, Obj::Null) => attrs.set_other(key, None),
            (key, value) => attrs.set_other(key, Some(value)),
        }

        Ok(())
    }
}

fn character_values(value: &Obj) -> Result<Vec<Character>, Error> {
    match value {
        Obj::Vector(v) => match v.as_kind(Kind::Character) {
            Ok(Vector::Character(x)) => Ok(x.values().to_vec()),
            _ => Err(err!(format!(
                "cannot use a {} vector as names",
                value.kind()
            ))),
        },
        _ => Err(err!(format!(
            "cannot use an object of type '{}' as names",
            value.kind()
        ))),
    }
}

fn dim_values(value: &Obj) -> Result<Vec<usize>, Error> {
    let dims: Vec<Option<i64>> = match value {
        Obj::Vector(Vector::Integer(x)) => {
            x.iter().map(|i| i.clone().as_option().map(i64::from)).collect()
        }
        Obj::Vector(Vector::Double(x)) => x
            .iter()
            .map(|i| i.clone().as_option().map(|f| f as i64))
            .collect(),
        _ => return Err(err!("invalid second argument, must be vector or NULL")),
    };

    if dims.is_empty() {
        return Err(err!("length-0 dimension vector is invalid"));
    }

    dims.into_iter()
        .map(|d| match d {
            Some(d) if d >= 0 => Ok(d as usize),
            None => Err(err!("the dims contain missing or infinite values")),
            _ => Err(err!("the dims contain negative values")),
        })
        .collect()
}

impl From<Vector> for Obj {
    fn from(value: Vector) -> Self {
        Obj::Vector(value)
    }
}

impl From<List> for Obj {
    fn from(value: List) -> Self {
        Obj::List(value)
    }
}

impl From<Rc<Environment>> for Obj {
    fn from(value: Rc<Environment>) -> Self {
        Obj::Environment(value)
    }
}

impl From<S4Object> for Obj {
    fn from(value: S4Object) -> Self {
        Obj::S4(Rc::new(value))
    }
}

impl From<Closure> for Obj {
    fn from(value: Closure) -> Self {
        Obj::Function(Rc::new(value))
    }
}

macro_rules! obj_from_values {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Obj {
                fn from(value: Vec<$t>) -> Self {
                    Obj::Vector(Vector::from(value))
                }
            }
        )*
    };
}

obj_from_values!(bool, i32, f64, Cplx, String, &str);
obj_from_values!(
    OptionNA<bool>,
    OptionNA<i32>,
    OptionNA<f64>,
    OptionNA<Cplx>,
    OptionNA<String>
);

impl From<Vec<Obj>> for Obj {
    fn from(value: Vec<Obj>) -> Self {
        Obj::List(List::from(value))
    }
}

macro_rules! obj_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Obj {
                fn from(value: $t) -> Self {
                    Obj::Vector(Vector::from(vec![value]))
                }
            }
        )*
    };
}

obj_from_scalar!(bool, i32, f64, Cplx, String, &str);

impl<K: Into<String>> From<HashMap<K, Obj>> for Obj {
    fn from(value: HashMap<K, Obj>) -> Self {
        let env = Environment::default();
        for (k, v) in value {
            env.insert(k.into(), v);
        }
        Obj::Environment(Rc::new(env))
    }
}
