use hyve_model::RecommendationRecord;

use super::cards::{CityCard, build_cards};
use super::charts::{ChartFrame, RentScatter, ScoreChart};
use super::images::ImageCatalog;

/// Everything the results area shows for one record list and budget.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationView {
    pub rent_budget: f64,
    pub score_chart: ScoreChart,
    pub rent_scatter: RentScatter,
    pub cards: Vec<CityCard>,
}

impl RecommendationView {
    /// `None` for an empty record list: nothing is rendered.
    pub fn build(
        records: &[RecommendationRecord],
        rent_budget: f64,
        images: &dyn ImageCatalog,
    ) -> Option<Self> {
        Self::build_with_frame(records, rent_budget, images, ChartFrame::default())
    }

    pub fn build_with_frame(
        records: &[RecommendationRecord],
        rent_budget: f64,
        images: &dyn ImageCatalog,
        frame: ChartFrame,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            rent_budget,
            score_chart: ScoreChart::build(records, frame),
            rent_scatter: RentScatter::build(records, rent_budget, frame),
            cards: build_cards(records, images),
        })
    }
}

/// Owns the charts currently on screen.
///
/// Any change to the records or the budget discards both charts and builds
/// them again; nothing is patched in place.
#[derive(Debug, Default)]
pub struct ChartSection {
    frame: ChartFrame,
    inputs: Option<(Vec<RecommendationRecord>, f64)>,
    view: Option<RecommendationView>,
    generation: u64,
}

impl ChartSection {
    pub fn new(frame: ChartFrame) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// Rebuilds when `records` or `rent_budget` differ from the last call.
    /// Returns the view to display, if any.
    pub fn update(
        &mut self,
        records: &[RecommendationRecord],
        rent_budget: f64,
        images: &dyn ImageCatalog,
    ) -> Option<&RecommendationView> {
        let unchanged = self.inputs.as_ref().is_some_and(|(prev, budget)| {
            prev.as_slice() == records && *budget == rent_budget
        });

        if !unchanged {
            self.teardown();
            self.view = RecommendationView::build_with_frame(
                records,
                rent_budget,
                images,
                self.frame,
            );
            self.inputs = Some((records.to_vec(), rent_budget));
            if self.view.is_some() {
                self.generation += 1;
            }
            log::debug!(
                "Chart section rebuilt (generation {}, {} records)",
                self.generation,
                records.len()
            );
        }

        self.view.as_ref()
    }

    pub fn view(&self) -> Option<&RecommendationView> {
        self.view.as_ref()
    }

    /// Number of times charts have been built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops the current charts.
    pub fn teardown(&mut self) {
        self.view = None;
        self.inputs = None;
    }
}
