pub mod ease;
pub mod interpolate;
pub mod spring;
