//! Domain types.

mod sample;
mod series;
mod unit;

pub use sample::Sample;
pub use series::Series;
pub use unit::UnitOfMeasure;
