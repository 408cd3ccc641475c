pub mod backend;
pub mod heatmap;
