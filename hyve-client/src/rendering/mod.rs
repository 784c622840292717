pub mod svg;

pub use svg::{render_rent_scatter, render_score_chart};
