//! Domain entities - Objects with identity and lifecycle

mod city;
mod weather_card;

pub use city::City;
pub use weather_card::WeatherCard;
