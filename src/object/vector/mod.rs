/// R Vectors module
///
/// Atomic vectors and the element types they hold. Coercion between element
/// types is handled within rust's type system, following R's coercion
/// lattice. Positions used to index vectors are normalized in `subset` and
/// combined across array dimensions in `subsets`.
///
pub mod coercion;
pub mod rep;
pub mod types;

mod subsets;
pub use subsets::*;

mod subset;
pub use subset::*;

mod core;
pub use self::core::*;

pub use rep::Rep;
pub use types::*;
