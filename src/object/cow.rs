use std::ops::Deref;
use std::rc::Rc;

/// Internal data representation for copy-on-write semantics.
///
/// Cloning a `CowObj` shares the underlying data. Data reachable through
/// more than one handle is shared and is copied before the first mutation
/// through any one of them; data with a single handle is mutated in place.
///
#[derive(Debug, PartialEq, Default)]
pub struct CowObj<T: Clone>(Rc<T>);

impl<T: Clone> Clone for CowObj<T> {
    fn clone(&self) -> Self {
        CowObj(Rc::clone(&self.0))
    }
}

impl<T: Clone> From<T> for CowObj<T> {
    fn from(x: T) -> Self {
        CowObj(Rc::new(x))
    }
}

impl<T: Clone> Deref for CowObj<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone> CowObj<T> {
    /// Whether any other handle refers to the same data
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.0) > 1
    }

    /// Get mutable access to the internal data.
    /// In case more than one reference to the internal data exists,
    /// the data is cloned first.
    pub fn with_inner_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        if self.is_shared() {
            tracing::debug!("copying shared data before modification");
        }
        f(Rc::make_mut(&mut self.0))
    }

    /// Borrow the internal data immutably.
    pub fn borrow(&self) -> &T {
        &self.0
    }

    /// Take the data, cloning it only if it is shared.
    pub fn into_inner(self) -> T {
        Rc::try_unwrap(self.0).unwrap_or_else(|rc| (*rc).clone())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> CowObj<Vec<T>> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::CowObj;

    #[test]
    fn with_inner_mut() {
        let mut x = CowObj::from(vec![]);
        x.with_inner_mut(|v| v.push(1));
        assert_eq!(x.first().cloned(), Some(1));
    }

    #[test]
    fn unique_data_is_modified_in_place() {
        let mut x = CowObj::from(vec![1, 2, 3]);
        let before = x.as_ptr();
        x.with_inner_mut(|v| v[0] = 10);
        assert_eq!(x.as_ptr(), before);
        assert_eq!(*x.borrow(), vec![10, 2, 3]);
    }

    #[test]
    fn shared_data_is_copied_on_write() {
        let x = CowObj::from(vec![1, 2, 3]);
        let mut y = x.clone();
        assert!(x.is_shared());
        assert!(y.ptr_eq(&x));

        y.with_inner_mut(|v| v[0] = 10);
        assert!(!y.ptr_eq(&x));
        assert!(!x.is_shared());
        assert_eq!(*x.borrow(), vec![1, 2, 3]);
        assert_eq!(*y.borrow(), vec![10, 2, 3]);
    }

    #[test]
    fn into_inner_avoids_copies_when_unique() {
        let x = CowObj::from(vec![1]);
        let y = x.clone();
        assert_eq!(x.into_inner(), vec![1]);
        assert!(!y.is_shared());
    }
}
