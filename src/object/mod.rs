mod core;
pub use self::core::*;

mod attributes;
pub use attributes::*;

mod cow;
pub use cow::*;

mod environment;
pub use environment::*;

mod kind;
pub use kind::*;

mod list;
pub use list::*;

mod s4;
pub use s4::*;

pub mod vector;
pub use vector::*;
