use std::rc::Rc;

use super::Environment;

/// An S4 instance
///
/// Only the parts needed for indexing are modelled: the class name and the
/// optional environment data slot (`.xData`) that subset operations are
/// forwarded to.
#[derive(Debug)]
pub struct S4Object {
    pub class: String,
    data: Option<Rc<Environment>>,
}

impl S4Object {
    pub fn new(class: &str) -> Self {
        S4Object {
            class: class.to_string(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Rc<Environment>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn data_slot(&self) -> Option<&Rc<Environment>> {
        self.data.as_ref()
    }
}
