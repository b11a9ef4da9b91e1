//! Инфраструктура вокруг движка: реализации `RandomSource` поверх `rand`.

pub mod rng;

pub use rng::*;
