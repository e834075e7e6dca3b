//! Domain layer - core monitoring logic

pub mod price;
