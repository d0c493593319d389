// src/core/mod.rs

pub mod html;
pub mod sanitize;
pub mod xml;

#[cfg(feature = "fetch")]
pub mod net;
