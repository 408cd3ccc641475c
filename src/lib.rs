#![allow(missing_docs)]

pub mod block;
pub mod error;
pub mod function;
pub mod heatmap;
pub mod preset;
