//! Client side of the HYVE location recommender.
//!
//! [`domains::search`] owns the request lifecycle: one bounded call to the
//! recommendation service, classified into success or one of four failure
//! kinds, with the fixed fallback dataset substituted on every failure.
//! [`view_models`] turns a record list and a budget into chart and card
//! models, and [`rendering`] serializes those charts as SVG.

pub mod domains;
pub mod infra;
pub mod prelude;
pub mod rendering;
pub mod view_models;
