pub mod counter;
pub mod theater;

pub use counter::{Counter, Payment};
pub use theater::{Performance, Place, PlaceListing};
