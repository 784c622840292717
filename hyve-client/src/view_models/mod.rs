//! View models for turning a record list and a budget into charts and cards

pub mod cards;
pub mod charts;
pub mod images;
pub mod recommendation_view;

pub use cards::{CityCard, build_cards, format_currency};
pub use charts::{
    BudgetLine, ChartFrame, RentScatter, Rgba, ScatterPoint, ScoreBar,
    ScoreChart, YAxis, bubble_radius, score_color,
};
pub use images::{ImageCatalog, StaticImageCatalog};
pub use recommendation_view::{ChartSection, RecommendationView};
