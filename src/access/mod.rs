//! Reading and assigning through `[`, `[[`, `[<-` and `[[<-`
//!
//! Positions are first resolved against a container into storage offsets
//! (see [`crate::object::resolve`]), which are then read from or written to.
//!
mod assign;
mod read;
mod recursive;

pub use assign::assign;
pub use read::read;
pub use recursive::{assign_recursive, get_recursive};
