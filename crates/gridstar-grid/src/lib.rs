//! Grid maps, distance strategies and neighbor strategies for `gridstar`.

mod direction;
mod distance;
mod error;
mod grid;
mod map;
mod neighbors;
mod ray_cast;

pub use self::direction::*;
pub use self::distance::*;
pub use self::error::*;
pub use self::grid::*;
pub use self::map::*;
pub use self::neighbors::*;
pub use self::ray_cast::*;
