//! Value Objects - Immutable, identity-less domain primitives

mod aqi;
mod coordinates;

pub use aqi::{Aqi, AqiCategory, InvalidAqi};
pub use coordinates::Coordinates;
