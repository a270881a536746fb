//! Dataset exploration page.

use crate::app::charts;
use crate::app::render::{self, RawTable, VisualizationView};
use crate::app::state::SharedState;
use crate::core::dataset::{Dataset, TARGET_COLUMN};
use crate::core::stats::{gaussian_kde, Histogram};
use crate::utils::error::Result;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

const DEFAULT_ROWS: usize = 10;
const MIN_ROWS: usize = 5;
const KDE_POINTS: usize = 200;

#[derive(Debug, Default, Deserialize)]
pub struct VisualizationParams {
    pub show_raw: Option<String>,
    pub rows: Option<usize>,
    pub feature: Option<String>,
}

impl VisualizationParams {
    fn show_raw(&self) -> bool {
        matches!(self.show_raw.as_deref(), Some("1" | "true" | "on"))
    }
}

/// Rows to show in the raw table: default 10, clamped to `5..=total`
/// (or to `total` when the dataset has fewer than five rows).
pub fn clamp_rows(requested: Option<usize>, total: usize) -> usize {
    let requested = requested.unwrap_or(DEFAULT_ROWS);
    if total < MIN_ROWS {
        total
    } else {
        requested.clamp(MIN_ROWS, total)
    }
}

/// Histogram with density overlay for numeric columns, category counts
/// otherwise.
pub fn feature_chart(dataset: &Dataset, feature: &str) -> String {
    let title = format!("Distribution of {}", feature);

    if let Some(values) = dataset.numeric_column(feature) {
        if let Some(hist) = Histogram::auto(&values) {
            let kde = gaussian_kde(&values, KDE_POINTS);
            return charts::histogram_svg(&title, feature, &hist, kde.as_deref());
        }
    }

    let bars: Vec<(String, f64)> = dataset
        .value_counts(feature)
        .unwrap_or_default()
        .into_iter()
        .map(|(value, count)| (value, count as f64))
        .collect();
    charts::bar_chart_svg(&title, feature, &bars)
}

pub async fn visualization_page(
    State(state): State<SharedState>,
    Query(params): Query<VisualizationParams>,
) -> Result<Html<String>> {
    let dataset = Dataset::from_path(&state.dataset_path)?;

    let selected = params
        .feature
        .as_deref()
        .filter(|f| dataset.has_column(f))
        .or_else(|| dataset.columns().first().map(String::as_str))
        .unwrap_or_default()
        .to_string();

    let raw = if params.show_raw() {
        let shown = clamp_rows(params.rows, dataset.len());
        Some(RawTable {
            rows: dataset.head(shown),
            shown,
            total: dataset.len(),
        })
    } else {
        None
    };

    let target = dataset.class_distribution().map(|shares| {
        let bars: Vec<(String, f64)> = shares
            .iter()
            .map(|share| (share.class.clone(), share.count as f64))
            .collect();
        let chart = charts::bar_chart_svg("Target Class Distribution", TARGET_COLUMN, &bars);
        (chart, shares)
    });

    let view = VisualizationView {
        columns: dataset.columns(),
        raw,
        selected_feature: &selected,
        feature_chart: feature_chart(&dataset, &selected),
        target,
    };
    Ok(Html(render::visualization_page(&view)))
}
