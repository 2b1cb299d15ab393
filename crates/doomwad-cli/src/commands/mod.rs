//! Command handlers

pub mod level;
pub mod lumps;
pub mod maps;
