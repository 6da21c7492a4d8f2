// src/utils/mod.rs

pub mod numeric;
pub mod text;
