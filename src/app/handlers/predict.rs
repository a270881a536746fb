//! Predict form handlers.

use crate::app::form::PredictForm;
use crate::app::render;
use crate::app::state::SharedState;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Response};

pub async fn predict_form() -> Html<String> {
    Html(render::predict_page(&PredictForm::default(), None))
}

/// Validate the submission, run the pipeline and show the banner under the
/// refilled form. Failures keep the form and show the error instead.
pub async fn predict_submit(
    State(state): State<SharedState>,
    Form(form): Form<PredictForm>,
) -> Response {
    let outcome = form
        .parse()
        .and_then(|(selector, record)| state.pipeline.predict(selector, &record));

    match outcome {
        Ok(result) => {
            let banner = render::risk_banner(&result);
            Html(render::predict_page(&form, Some(&banner))).into_response()
        }
        Err(err) => {
            if err.is_client_error() {
                tracing::warn!("Rejected prediction input: {}", err);
            } else {
                tracing::error!(category = ?err.category(), "Prediction failed: {}", err);
            }
            let banner = render::error_banner(&err);
            (
                err.status_code(),
                Html(render::predict_page(&form, Some(&banner))),
            )
                .into_response()
        }
    }
}
