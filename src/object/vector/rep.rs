use super::types::{Character, Element};
use super::OptionNA;
use crate::object::{Attributes, CowObj};

/// Vector storage
///
/// A `Rep` pairs copy-on-write element storage with the container's
/// attributes. The same representation backs every atomic vector kind and
/// lists (`Rep<Obj>`).
///
#[derive(Debug, Clone, PartialEq)]
pub struct Rep<T: Clone> {
    values: CowObj<Vec<T>>,
    attrs: Attributes,
}

impl<T: Clone> Default for Rep<T> {
    fn default() -> Self {
        Rep {
            values: CowObj::from(Vec::new()),
            attrs: Attributes::default(),
        }
    }
}

impl<T: Clone> From<Vec<T>> for Rep<T> {
    fn from(values: Vec<T>) -> Self {
        Rep {
            values: CowObj::from(values),
            attrs: Attributes::default(),
        }
    }
}

impl<T: Element> Rep<T> {
    /// Create an empty vector
    pub fn new() -> Self {
        Rep::default()
    }

    /// Create a vector of `len` fill values
    pub fn filled(len: usize) -> Self {
        Rep::from(vec![T::na(); len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[T] {
        self.values.borrow()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Whether the element storage is referenced from elsewhere
    pub fn is_shared(&self) -> bool {
        self.values.is_shared()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.values.ptr_eq(&other.values)
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    pub fn names(&self) -> Option<&[Character]> {
        self.attrs.names.as_ref().map(|n| n.as_slice())
    }

    pub fn set_names(&mut self, names: Option<Vec<Character>>) {
        self.attrs.names = names.map(CowObj::from);
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.attrs.dim.as_deref()
    }

    /// Mutate the elements, copying them first if they are shared.
    pub fn with_values_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        self.values.with_inner_mut(f)
    }

    /// Take the elements, copying them only if they are shared.
    pub fn into_values(self) -> Vec<T> {
        self.values.into_inner()
    }

    /// Convert every element, keeping attributes
    pub fn map<U, F>(&self, f: F) -> Rep<U>
    where
        U: Element,
        F: Fn(&T) -> U,
    {
        Rep {
            values: CowObj::from(self.iter().map(f).collect::<Vec<U>>()),
            attrs: self.attrs.clone(),
        }
    }

    /// Gather elements at storage offsets
    ///
    /// NA offsets and offsets beyond the end produce fill values. When the
    /// vector is named the result carries the corresponding names, with NA
    /// names for the slots that did not exist.
    ///
    pub fn select(&self, offsets: &[Option<usize>]) -> Rep<T> {
        let values = offsets
            .iter()
            .map(|o| o.and_then(|o| self.get(o).cloned()).unwrap_or_else(T::na))
            .collect::<Vec<T>>();

        let mut result = Rep::from(values);
        if let Some(names) = self.names() {
            let names = offsets
                .iter()
                .map(|o| o.and_then(|o| names.get(o).cloned()).unwrap_or(OptionNA::NA))
                .collect();
            result.set_names(Some(names));
        }
        result
    }

    /// Grow to `len` elements
    ///
    /// New slots hold the element fill value and, when the vector is named,
    /// empty names. A resized vector loses its array shape.
    ///
    pub fn resize(&mut self, len: usize) {
        if len <= self.len() {
            return;
        }

        tracing::debug!(from = self.len(), to = len, "extending {} vector", T::KIND);
        self.with_values_mut(|v| v.resize(len, T::na()));
        if let Some(names) = self.attrs.names.as_mut() {
            names.with_inner_mut(|n| n.resize(len, OptionNA::Some(String::new())));
        }
        self.attrs.drop_dims();
    }

    /// Names, created as empty strings where the vector has none
    pub fn names_mut(&mut self) -> &mut CowObj<Vec<Character>> {
        let len = self.len();
        self.attrs
            .names
            .get_or_insert_with(|| CowObj::from(vec![OptionNA::Some(String::new()); len]))
    }

    /// Write `values` at `offsets`, recycling values
    ///
    /// NA offsets are skipped. Offsets must already lie within the vector.
    pub fn write(&mut self, offsets: &[Option<usize>], values: &[T]) {
        if values.is_empty() {
            return;
        }

        self.with_values_mut(|v| {
            for (i, offset) in offsets.iter().enumerate() {
                if let Some(slot) = offset.and_then(|o| v.get_mut(o)) {
                    *slot = values[i % values.len()].clone();
                }
            }
        })
    }

    /// Drop the elements flagged in `remove`, and their names
    pub fn retain_mask(&mut self, remove: &[bool]) {
        let keep = |i: usize| !remove.get(i).copied().unwrap_or(false);

        self.with_values_mut(|v| {
            let mut i = 0;
            v.retain(|_| {
                i += 1;
                keep(i - 1)
            });
        });

        if let Some(names) = self.attrs.names.as_mut() {
            names.with_inner_mut(|n| {
                let mut i = 0;
                n.retain(|_| {
                    i += 1;
                    keep(i - 1)
                });
            });
        }

        self.attrs.drop_dims();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::vector::types::*;

    fn names(x: &[&str]) -> Vec<Character> {
        x.iter().map(|s| OptionNA::Some(s.to_string())).collect()
    }

    #[test]
    fn select_fills_missing_slots() {
        let x = Rep::<Integer>::from(vec![OptionNA::Some(1), OptionNA::Some(2)]);
        let y = x.select(&[Some(1), None, Some(5)]);
        assert_eq!(
            y.values(),
            &[OptionNA::Some(2), OptionNA::NA, OptionNA::NA]
        );
        assert_eq!(y.names(), None);
    }

    #[test]
    fn select_carries_names() {
        let mut x = Rep::<Raw>::from(vec![1, 2]);
        x.set_names(Some(names(&["a", "b"])));
        let y = x.select(&[Some(1), Some(2)]);
        assert_eq!(y.values(), &[2, 0]);
        assert_eq!(
            y.names(),
            Some(&[OptionNA::Some("b".to_string()), OptionNA::NA][..])
        );
    }

    #[test]
    fn resize_extends_names_and_drops_dims() {
        let mut x = Rep::<Double>::from(vec![OptionNA::Some(1.0)]);
        x.set_names(Some(names(&["a"])));
        x.attrs_mut().dim = Some(vec![1, 1]);

        x.resize(3);
        assert_eq!(x.len(), 3);
        assert_eq!(x.get(2), Some(&OptionNA::NA));
        assert_eq!(x.names(), Some(&names(&["a", "", ""])[..]));
        assert_eq!(x.dim(), None);
    }

    #[test]
    fn write_recycles() {
        let mut x = Rep::<Integer>::filled(4);
        x.write(
            &[Some(0), Some(1), None, Some(3)],
            &[OptionNA::Some(7), OptionNA::Some(8)],
        );
        assert_eq!(
            x.values(),
            &[
                OptionNA::Some(7),
                OptionNA::Some(8),
                OptionNA::NA,
                OptionNA::Some(8)
            ]
        );
    }

    #[test]
    fn write_copies_shared_storage() {
        let x = Rep::<Logical>::from(vec![OptionNA::Some(true)]);
        let mut y = x.clone();
        y.write(&[Some(0)], &[OptionNA::Some(false)]);
        assert_eq!(x.values(), &[OptionNA::Some(true)]);
        assert_eq!(y.values(), &[OptionNA::Some(false)]);
    }

    #[test]
    fn retain_mask_compacts_names() {
        let mut x = Rep::<Raw>::from(vec![1, 2, 3]);
        x.set_names(Some(names(&["a", "b", "c"])));
        x.retain_mask(&[false, true, false]);
        assert_eq!(x.values(), &[1, 3]);
        assert_eq!(x.names(), Some(&names(&["a", "c"])[..]));
    }
}
