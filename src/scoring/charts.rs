// src/scoring/charts.rs

use std::collections::BTreeMap;

use serde::Serialize;

use super::engine::{BFI10_TRAITS, MAS12_SUBSCALES};

/// Ordered label/value lists handed to the chart-rendering client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Radar series for a BFI-10 report: all five traits in fixed order, with
/// 0.0 substituted for traits that were not scored.
pub fn bfi10_radar_series(scores: &BTreeMap<String, Option<f64>>) -> ChartSeries {
    let labels = BFI10_TRAITS
        .iter()
        .map(|(_, name)| name.to_string())
        .collect();
    let values = BFI10_TRAITS
        .iter()
        .map(|(_, name)| scores.get(*name).copied().flatten().unwrap_or(0.0))
        .collect();
    ChartSeries { labels, values }
}

/// Pie series for a MAS-12 report.
///
/// Only subscales with a present score are included; values are expressed
/// as percentages of their sum. An all-zero series stays all-zero rather
/// than dividing by zero, and the series is empty when nothing was scored.
pub fn mas12_pie_series(scores: &BTreeMap<String, Option<f64>>) -> ChartSeries {
    let mut labels = Vec::new();
    let mut raw_values = Vec::new();
    for (_, name) in MAS12_SUBSCALES {
        if let Some(score) = scores.get(name).copied().flatten() {
            labels.push(name.to_string());
            raw_values.push(score);
        }
    }

    let total: f64 = raw_values.iter().sum();
    let values = if total > 0.0 {
        raw_values.iter().map(|v| (v / total) * 100.0).collect()
    } else {
        vec![0.0; raw_values.len()]
    };

    ChartSeries { labels, values }
}
