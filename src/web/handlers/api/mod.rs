//! API 处理器

pub mod check;

pub use check::*;
