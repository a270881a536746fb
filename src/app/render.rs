//! HTML page rendering.

use crate::app::form::{FormField, PredictForm, Widget, FIELDS};
use crate::core::dataset::ClassShare;
use crate::core::metrics::ClassificationReport;
use crate::domain::model::{ModelSelector, PredictionResult, RiskLevel};
use crate::utils::error::AppError;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; color: #000; background: #f7f7f9; }
nav { background: #b22222; padding: 10px 24px; }
nav a { color: #fff; margin-right: 18px; text-decoration: none; font-weight: bold; }
main { max-width: 760px; margin: 24px auto; padding: 0 16px; }
h1.center, h3.center, .center { text-align: center; }
.field { margin: 10px auto; max-width: 420px; }
.field label { display: block; font-weight: bold; margin-bottom: 4px; }
.field input, .field select { width: 100%; padding: 6px; }
.actions { text-align: center; margin: 18px 0; }
button { padding: 8px 20px; font-size: 16px; }
.banner { padding: 20px; border-radius: 10px; margin-top: 16px; }
.warning { background: #fff3cd; padding: 12px; border-radius: 6px; }
.error { background: #f8d7da; padding: 12px; border-radius: 6px; }
table { border-collapse: collapse; margin: 12px 0; }
th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: right; }
th { background: #eee; }
"#;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell and navigation bar.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} | Heart Disease Prediction</title>
    <style>{}</style>
</head>
<body>
<nav>
    <a href="/">Home</a>
    <a href="/visualization">Dataset Visualization</a>
    <a href="/comparison">Model Comparison</a>
</nav>
<main>
{}
</main>
</body>
</html>"#,
        escape_html(title),
        STYLE,
        body
    )
}

pub fn home_page() -> String {
    layout(
        "Home",
        r#"<h1 class="center">&#10084;&#65039; Welcome to the Heart Disease Prediction App</h1>
<h3 class="center">A Machine Learning Project to Assess Cardiac Risk</h3>
<div class="center" style="font-size:18px">
    This tool helps estimate your risk of heart disease using key health indicators.
    <br><br>
    Click the button below to start the prediction.
</div>
<form method="post" action="/start" class="actions">
    <button type="submit">&#128269; Start Prediction</button>
</form>"#,
    )
}

/// Colour-coded result banner.
pub fn risk_banner(result: &PredictionResult) -> String {
    let level = result.risk_level();
    let icon = match level {
        RiskLevel::High => "&#128680;",
        RiskLevel::Low => "&#9989;",
    };
    format!(
        r#"<hr><div class="banner" style="background-color:{}">
    <h4>{} <b>{}</b></h4>
    <p>Risk Score: <b>{}</b></p>
</div>"#,
        level.background(),
        icon,
        level.headline(),
        result.risk_score_percent()
    )
}

pub fn error_banner(err: &AppError) -> String {
    format!(
        r#"<div class="error"><b>{}</b><br><small>{}</small></div>"#,
        escape_html(&err.user_friendly_message()),
        escape_html(err.recovery_suggestion())
    )
}

fn field_html(field: &FormField, value: &str) -> String {
    let control = match field.widget {
        Widget::Integer { min, max } => format!(
            r#"<input type="number" id="{n}" name="{n}" min="{}" max="{}" step="1" value="{}" required>"#,
            min,
            max,
            escape_html(value),
            n = field.name
        ),
        Widget::Float { min, max, step } => format!(
            r#"<input type="number" id="{n}" name="{n}" min="{:.1}" max="{:.1}" step="{}" value="{}" required>"#,
            min,
            max,
            step,
            escape_html(value),
            n = field.name
        ),
        Widget::Choice { options } => {
            let mut opts = String::new();
            for option in options {
                let option = option.to_string();
                let selected = if option == value.trim() { " selected" } else { "" };
                let _ = write!(opts, r#"<option value="{o}"{}>{o}</option>"#, selected, o = option);
            }
            format!(r#"<select id="{n}" name="{n}">{}</select>"#, opts, n = field.name)
        }
    };
    format!(
        r#"<div class="field"><label for="{}">{}</label>{}</div>"#,
        field.name,
        escape_html(field.label),
        control
    )
}

/// Predict page. `outcome` is the banner (result or error) shown under
/// the form after a submission.
pub fn predict_page(form: &PredictForm, outcome: Option<&str>) -> String {
    let mut body = String::from(r#"<h1 class="center">&#10084;&#65039; Heart Disease Prediction</h1>"#);
    body.push_str(r#"<form method="post" action="/predict">"#);

    let chosen = form.model.parse::<ModelSelector>().ok();
    let mut options = String::new();
    for selector in ModelSelector::ALL {
        let selected = if chosen == Some(selector) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{l}"{}>{l}</option>"#,
            selected,
            l = selector.label()
        );
    }
    let _ = write!(
        body,
        r#"<div class="field"><label for="model">Choose Prediction Algorithm</label><select id="model" name="model">{}</select></div>"#,
        options
    );

    for field in FIELDS.iter() {
        body.push_str(&field_html(field, form.value_of(field.name).unwrap_or("")));
    }
    body.push_str(r#"<div class="actions"><button type="submit">&#129504; Predict</button></div></form>"#);

    if let Some(banner) = outcome {
        body.push_str(banner);
    }
    layout("Predict", &body)
}

/// Raw table section of the visualization page.
pub struct RawTable<'a> {
    pub rows: &'a [Vec<String>],
    pub shown: usize,
    pub total: usize,
}

/// Everything the visualization page shows, already computed.
pub struct VisualizationView<'a> {
    pub columns: &'a [String],
    pub raw: Option<RawTable<'a>>,
    pub selected_feature: &'a str,
    pub feature_chart: String,
    /// Bar chart plus percentage table; `None` if there is no target column.
    pub target: Option<(String, Vec<ClassShare>)>,
}

fn data_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table><thead><tr>");
    for column in columns {
        let _ = write!(out, "<th>{}</th>", escape_html(column));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_html(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

pub fn visualization_page(view: &VisualizationView<'_>) -> String {
    let mut body = String::from(
        r#"<h1>&#128202; Dataset Visualization</h1>
<p>This page provides insights into the dataset used for heart disease prediction.
Below are some basic visualizations to help understand the distribution and importance of features.</p>"#,
    );

    let _ = write!(
        body,
        r#"<form method="get" action="/visualization">
<label><input type="checkbox" name="show_raw" value="1"{}> Show Raw Dataset</label>"#,
        if view.raw.is_some() { " checked" } else { "" }
    );
    if let Some(raw) = &view.raw {
        let _ = write!(
            body,
            r#"<div class="field"><label for="rows">Select number of rows to view:</label><input type="range" id="rows" name="rows" min="{}" max="{}" value="{}"> {}</div>"#,
            raw.total.min(5),
            raw.total,
            raw.shown,
            raw.shown
        );
    }

    let mut features = String::new();
    for column in view.columns {
        let selected = if column == view.selected_feature { " selected" } else { "" };
        let _ = write!(
            features,
            r#"<option value="{c}"{}>{c}</option>"#,
            selected,
            c = escape_html(column)
        );
    }
    let _ = write!(
        body,
        r#"<div class="field"><label for="feature">Select a feature to visualize</label><select id="feature" name="feature">{}</select></div>
<div class="actions"><button type="submit">Update</button></div></form>"#,
        features
    );

    if let Some(raw) = &view.raw {
        body.push_str(&data_table(view.columns, raw.rows));
    }

    body.push_str(&view.feature_chart);

    match &view.target {
        Some((chart, shares)) => {
            body.push_str("<h3>Target Class Distribution</h3>");
            body.push_str(chart);
            body.push_str("<p>Class distribution (%):</p><table><thead><tr><th>target</th><th>%</th></tr></thead><tbody>");
            for share in shares {
                let _ = write!(
                    body,
                    "<tr><td>{}</td><td>{:.2}</td></tr>",
                    escape_html(&share.class),
                    share.percent
                );
            }
            body.push_str("</tbody></table>");
        }
        None => body.push_str(
            r#"<div class="warning">No 'target' column found in the dataset.</div>"#,
        ),
    }

    layout("Dataset Visualization", &body)
}

pub fn comparison_page(
    reports: &[(ModelSelector, ClassificationReport)],
    roc_chart: &str,
) -> String {
    let mut body = String::from(
        r#"<h1>&#128202; Model Comparison</h1>
<h3>&#128200; Performance Metrics</h3>
<table><thead><tr><th>Model</th><th>Accuracy</th><th>AUC Score</th><th>Precision</th><th>Recall</th><th>F1 Score</th></tr></thead><tbody>"#,
    );
    for (selector, report) in reports {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            selector.label(),
            report.accuracy,
            report.auc,
            report.precision,
            report.recall,
            report.f1
        );
    }
    body.push_str("</tbody></table><h3>&#128201; ROC Curve Comparison</h3>");
    body.push_str(roc_chart);
    layout("Model Comparison", &body)
}

pub fn error_page(err: &AppError) -> String {
    layout("Error", &format!("<h1>Something went wrong</h1>{}", error_banner(err)))
}
