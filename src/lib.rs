pub mod access;
pub mod error;
pub mod lang;
pub mod object;
pub mod session;

pub use access::{assign, read};
pub use error::Error;
pub use lang::{AccessMode, EvalResult, Purpose, Warning, WarningSink};
pub use object::{resolve, Kind, Obj, Subset};
pub use session::{Session, WarnLevel};
