use hashbrown::HashMap;

use super::cow::CowObj;
use super::vector::Character;
use super::Obj;

/// Attributes attached to a vector or list
///
/// `names`, `dim` and `dimnames` are stored in their typed forms because the
/// indexing engines consult them constantly. Any other attribute is kept as
/// an opaque value.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub names: Option<CowObj<Vec<Character>>>,
    pub dim: Option<Vec<usize>>,
    /// One entry per dimension, `None` where a dimension is unnamed
    pub dimnames: Option<Vec<Option<Vec<Character>>>>,
    pub other: Option<CowObj<HashMap<String, Obj>>>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.names.is_none() && self.dim.is_none() && self.dimnames.is_none() && self.other.is_none()
    }

    /// Forget the array shape, as happens when a container changes length.
    pub fn drop_dims(&mut self) {
        if self.dim.is_some() {
            tracing::debug!("dropping dim and dimnames attributes");
        }
        self.dim = None;
        self.dimnames = None;
    }

    pub fn get_other(&self, key: &str) -> Option<&Obj> {
        self.other.as_ref()?.get(key)
    }

    /// Set an opaque attribute, or remove it when `value` is `None`.
    pub fn set_other(&mut self, key: &str, value: Option<Obj>) {
        match value {
            Some(value) => {
                let other = self.other.get_or_insert_with(Default::default);
                other.with_inner_mut(|map| map.insert(key.to_string(), value));
            }
            None => {
                if let Some(other) = self.other.as_mut() {
                    other.with_inner_mut(|map| map.remove(key));
                    if other.is_empty() {
                        self.other = None;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_attributes() {
        let mut a = Attributes::default();
        assert!(a.is_empty());

        a.set_other("class", Some(Obj::from(vec!["foo".to_string()])));
        assert_eq!(
            a.get_other("class"),
            Some(&Obj::from(vec!["foo".to_string()]))
        );

        a.set_other("class", None);
        assert!(a.is_empty());
    }

    #[test]
    fn dropping_dims_keeps_names() {
        let mut a = Attributes {
            names: Some(CowObj::from(vec![Character::Some("a".to_string())])),
            dim: Some(vec![1, 1]),
            dimnames: Some(vec![None, None]),
            other: None,
        };
        a.drop_dims();
        assert!(a.dim.is_none() && a.dimnames.is_none());
        assert!(a.names.is_some());
    }
}
