//! Density plots for parameter distributions.
//!
//! [`PdfPlot`] samples a continuous [`Distribution`] over its plot range and
//! marks its mean; [`ChoicePlot`] turns a [`WeightedChoice`] into a bar
//! chart. Both render to self-contained HTML files with embedded
//! [Plotly.js](https://plotly.com/javascript/) charts. No feature flag is
//! required.
//!
//! Plotting never fails loudly: a distribution whose plot range can't be
//! sampled (infinite or empty) produces no plot instead of an error.
//!
//! # Usage
//!
//! ```no_run
//! use autoopt::distribution::Normal;
//! use autoopt::visualization::PdfPlot;
//!
//! let normal = Normal::new(0.0, 1.0).unwrap();
//! if let Some(plot) = PdfPlot::new(&normal) {
//!     plot.write_html("normal.html").unwrap();
//! }
//! ```
//!
//! An internet connection is needed on first load to fetch `Plotly.js`
//! from a CDN.

use core::fmt::{Display, Write as _};
use std::path::Path;

use crate::distribution::{Categorical, Distribution, WeightedChoice};
use crate::error::{Error, Result};
use crate::space::ParamDistribution;

/// Sampled density curve of a continuous distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct PdfPlot {
    label: String,
    xs: Vec<f64>,
    ys: Vec<f64>,
    mean: f64,
    mean_density: f64,
}

impl PdfPlot {
    /// The fewest points a curve is sampled at.
    pub const MIN_POINTS: usize = 1_000;
    /// The most points a curve is sampled at.
    pub const MAX_POINTS: usize = 10_000;

    /// Samples `dist` over its plot range.
    ///
    /// The number of points is the width of the range, clamped to
    /// [`MIN_POINTS`](Self::MIN_POINTS)..=[`MAX_POINTS`](Self::MAX_POINTS).
    /// Returns `None` if the range can't be sampled.
    #[must_use]
    pub fn new<D: Distribution + ?Sized>(dist: &D) -> Option<Self> {
        Self::degrade(Self::try_new(dist))
    }

    /// Samples `dist` at `n_points` points, clamped to the allowed window.
    #[must_use]
    pub fn with_points<D: Distribution + ?Sized>(dist: &D, n_points: usize) -> Option<Self> {
        Self::degrade(Self::sample(
            dist,
            n_points.clamp(Self::MIN_POINTS, Self::MAX_POINTS),
        ))
    }

    /// Samples `dist` over its plot range, reporting why it can't be plotted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCapability`] if the plot range is not a
    /// finite, non-empty interval.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn try_new<D: Distribution + ?Sized>(dist: &D) -> Result<Self> {
        let width = dist.plot_max_value() - dist.plot_min_value();
        let n_points = width.clamp(Self::MIN_POINTS as f64, Self::MAX_POINTS as f64);
        if n_points.is_nan() {
            return Err(Error::UnsupportedCapability("plot range is not finite"));
        }
        Self::sample(dist, n_points as usize)
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample<D: Distribution + ?Sized>(dist: &D, n_points: usize) -> Result<Self> {
        let start = dist.plot_min_value();
        let stop = dist.plot_max_value();
        if !start.is_finite() || !stop.is_finite() {
            return Err(Error::UnsupportedCapability("plot range is not finite"));
        }
        if start >= stop {
            return Err(Error::UnsupportedCapability("plot range is empty"));
        }

        let step = (stop - start) / (n_points - 1) as f64;
        let mut xs: Vec<f64> = (0..n_points).map(|i| start + i as f64 * step).collect();
        if let Some(last) = xs.last_mut() {
            *last = stop;
        }
        let ys = dist.pdf_many(&xs);
        let mean = dist.mean();

        Ok(Self {
            label: dist.plot_label(),
            xs,
            ys,
            mean,
            mean_density: dist.pdf(mean),
        })
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn degrade(result: Result<Self>) -> Option<Self> {
        match result {
            Ok(plot) => Some(plot),
            Err(err) => {
                trace_warn!(error = %err, "distribution can't be plotted");
                None
            }
        }
    }

    /// The legend label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The sampled x coordinates, evenly spaced and ascending.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The density at each x coordinate.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// The mean of the distribution, marked with a vertical line.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The density at the mean, i.e. the height of the mean marker.
    #[must_use]
    pub fn mean_density(&self) -> f64 {
        self.mean_density
    }

    /// Renders the plot as a self-contained HTML page.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut script = String::with_capacity(self.xs.len() * 48);
        let _ = write!(
            script,
            r##"Plotly.newPlot("pdf", [
  {{ x: {xs:?}, y: {ys:?}, mode: "lines", type: "scatter", name: "{label}",
     line: {{ color: "#3498db", width: 2 }} }},
  {{ x: [{mean:?}, {mean:?}], y: [0, {height:?}], mode: "lines", type: "scatter",
     name: "Mean: {mean}", line: {{ color: "#3498db", dash: "dash" }} }}
], {{ xaxis: {{ title: "X" }}, yaxis: {{ title: "PDF(X)" }},
     margin: {{ t: 10 }}, legend: {{ x: 1, xanchor: "right", y: 1 }} }},
   {{ responsive: true }});"##,
            xs = self.xs,
            ys = self.ys,
            label = escape_js(&self.label),
            mean = self.mean,
            height = self.mean_density,
        );
        build_page("Probability Density", "pdf", &script)
    }

    /// Writes [`to_html`](Self::to_html) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn write_html(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_html())
    }
}

/// Probability mass of each value of a choice distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoicePlot {
    labels: Vec<String>,
    masses: Vec<f64>,
    mean_label: String,
}

impl ChoicePlot {
    /// Collects the mass of every choice, in insertion order.
    #[must_use]
    pub fn new<T: Display>(dist: &WeightedChoice<T>) -> Self {
        Self::with_labels(dist, ToString::to_string)
    }

    /// Like [`new`](Self::new), labelling each bar with its variant name.
    #[must_use]
    pub fn of_variants<T: Categorical>(dist: &WeightedChoice<T>) -> Self {
        Self::with_labels(dist, |value| value.variant_name().to_owned())
    }

    fn with_labels<T>(dist: &WeightedChoice<T>, label: impl Fn(&T) -> String) -> Self {
        let (labels, masses) = dist
            .probabilities()
            .map(|(value, probability)| (label(value), probability))
            .unzip();
        Self {
            labels,
            masses,
            mean_label: label(dist.mean()),
        }
    }

    /// The bar labels, one per choice.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The bar heights, one per choice.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Renders the bar chart as a self-contained HTML page.
    #[must_use]
    pub fn to_html(&self) -> String {
        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|label| format!("\"{}\"", escape_js(label)))
            .collect();
        let mut script = String::new();
        let _ = write!(
            script,
            r##"Plotly.newPlot("pdf", [
  {{ x: [{labels}], y: {masses:?}, type: "bar", name: "Mean: {mean}",
     marker: {{ color: "#3498db" }} }}
], {{ xaxis: {{ title: "X", type: "category" }}, yaxis: {{ title: "PDF(X)" }},
     margin: {{ t: 10 }}, showlegend: true }},
   {{ responsive: true }});"##,
            labels = labels.join(", "),
            masses = self.masses,
            mean = escape_js(&self.mean_label),
        );
        build_page("Probability Mass", "pdf", &script)
    }

    /// Writes [`to_html`](Self::to_html) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn write_html(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_html())
    }
}

impl ParamDistribution {
    /// Renders this distribution as an HTML page.
    ///
    /// Choices become bar charts, continuous distributions density curves.
    /// Returns `None` if the distribution can't be plotted.
    #[must_use]
    pub fn plot(&self) -> Option<String> {
        match self.as_choice() {
            Some(choice) => Some(ChoicePlot::new(choice).to_html()),
            None => self
                .as_continuous()
                .and_then(PdfPlot::new)
                .as_ref()
                .map(PdfPlot::to_html),
        }
    }
}

fn build_page(title: &str, chart_id: &str, script: &str) -> String {
    let mut html = String::with_capacity(script.len() + 1024);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f6fa; color: #2c3e50; padding: 24px; }}
  .chart {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
            padding: 16px; }}
</style>
</head>
<body>
<div class="chart"><div id="{chart_id}"></div></div>
<script>
{script}
</script>
</body>
</html>
"#,
    );
    html
}

/// Escapes `s` for a double-quoted JS string inside an inline `<script>`.
fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('<', "\\u003c")
}
