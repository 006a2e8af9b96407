use core::fmt;
use std::cell::RefCell;
use std::fmt::Display;

use hashbrown::HashMap;

use super::Obj;

/// A mutable binding frame
///
/// Environments have reference semantics: every handle observes the same
/// bindings, so assignment through `[[<-` modifies them in place.
#[derive(Debug, Default)]
pub struct Environment {
    pub values: RefCell<HashMap<String, Obj>>,
}

impl Environment {
    pub fn get(&self, name: &str) -> Option<Obj> {
        self.values.borrow().get(name).cloned()
    }

    pub fn insert(&self, name: String, value: Obj) {
        tracing::debug!("binding '{}' in environment", name);
        self.values.borrow_mut().insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<environment {:?}>", self.values.as_ptr())
    }
}
