//! Per-recommendation card models.

use hyve_model::RecommendationRecord;

use super::images::ImageCatalog;

#[derive(Debug, Clone, PartialEq)]
pub struct CityCard {
    /// 1-based position in the result list.
    pub rank: usize,
    pub title: String,
    pub average_rent: String,
    pub job_count: u64,
    pub score_percentage: String,
    pub reason: String,
    pub image_url: Option<String>,
}

impl CityCard {
    pub fn from_record(
        record: &RecommendationRecord,
        rank: usize,
        images: &dyn ImageCatalog,
    ) -> Self {
        let title = record.location_label();
        let image_url = images.image_for(&title, rank);
        Self {
            rank,
            title,
            average_rent: format_currency(record.avg_rent),
            job_count: record.job_count,
            score_percentage: record.score_percentage.clone(),
            reason: record.reason.clone(),
            image_url,
        }
    }
}

/// One card per record, in record order.
pub fn build_cards(
    records: &[RecommendationRecord],
    images: &dyn ImageCatalog,
) -> Vec<CityCard> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| CityCard::from_record(record, index + 1, images))
        .collect()
}

/// `$` amount with thousands separators and at most two decimals,
/// trailing zeros dropped: `1943.12` is `$1,943.12`, `2450.0` is `$2,450`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}
