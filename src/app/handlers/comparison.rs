//! Model comparison page, computed from the held-out label and probability
//! arrays.

use crate::app::charts::{self, Series};
use crate::app::render;
use crate::app::state::SharedState;
use crate::core::artifacts::{ArtifactStore, TEST_LABELS_ARTIFACT};
use crate::core::metrics::{roc_curve, ClassificationReport};
use crate::domain::model::ModelSelector;
use crate::domain::ports::ArtifactSource;
use crate::utils::error::Result;
use axum::extract::State;
use axum::response::Html;

/// Probability above which a held-out sample counts as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

pub struct ModelComparison {
    pub reports: Vec<(ModelSelector, ClassificationReport)>,
    pub curves: Vec<Series>,
}

/// Metrics and ROC curve for every model, in selector order.
pub fn compare_models<S: ArtifactSource>(store: &ArtifactStore<S>) -> Result<ModelComparison> {
    let y_test = store.load_array(TEST_LABELS_ARTIFACT)?;

    let mut reports = Vec::with_capacity(ModelSelector::ALL.len());
    let mut curves = Vec::with_capacity(ModelSelector::ALL.len());
    for selector in ModelSelector::ALL {
        let y_prob = store.load_array(selector.probability_artifact())?;
        let roc = roc_curve(&y_test, &y_prob)?;
        let report = ClassificationReport::from_scores(&y_test, &y_prob, DECISION_THRESHOLD)?;
        tracing::debug!(model = %selector, auc = report.auc, "Model evaluated");

        curves.push(Series {
            label: format!("{} (AUC = {:.2})", selector.label(), roc.auc()),
            points: roc.points(),
        });
        reports.push((selector, report));
    }
    Ok(ModelComparison { reports, curves })
}

pub async fn comparison_page(State(state): State<SharedState>) -> Result<Html<String>> {
    let comparison = compare_models(state.pipeline.store())?;
    let chart = charts::line_chart_svg(
        "ROC Curve Comparison",
        "False Positive Rate",
        "True Positive Rate",
        &comparison.curves,
        true,
    );
    Ok(Html(render::comparison_page(&comparison.reports, &chart)))
}
