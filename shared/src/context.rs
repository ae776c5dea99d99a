//! Assembles per-series bullets into the grounding context block.

use tracing::debug;

use crate::budget::{estimate_tokens, truncate_to_budget};
use crate::series::SeriesSet;
use crate::summary::{describe_blood_pressure, describe_series, Windows};

pub const GLUCOSE: &str = "glucose";
pub const WEIGHT: &str = "weight";
pub const BP_SYSTOLIC: &str = "bp_sys";
pub const BP_DIASTOLIC: &str = "bp_dia";

/// Series the assistant knows units for, in the order they are looked up.
pub const CORE_VITALS: [&str; 4] = [GLUCOSE, WEIGHT, BP_SYSTOLIC, BP_DIASTOLIC];

/// Default token budget for the context block.
pub const DEFAULT_CONTEXT_TOKENS: usize = 700;

const NO_VITALS: &str = "No vitals data supplied.";

/// Display settings for a single-valued vital.
struct Section {
    key: &'static str,
    heading: &'static str,
    units: &'static str,
}

const SECTIONS: [Section; 2] = [
    Section {
        key: GLUCOSE,
        heading: "Glucose",
        units: " mg/dL",
    },
    Section {
        key: WEIGHT,
        heading: "Weight",
        units: " kg",
    },
];

/// Render every supplied series, one line each.
///
/// Order is glucose, weight, blood pressure, then anything else in the order
/// it was supplied. Series missing from `series` contribute nothing; present
/// but empty series get an explicit "no data" line.
pub fn summarize_vitals(series: &SeriesSet) -> String {
    let windows = Windows::default();
    let mut lines = Vec::new();

    for section in &SECTIONS {
        if let Some(values) = series.get(section.key) {
            lines.push(format!(
                "{}: {}",
                section.heading,
                describe_series(values, section.key, section.units, windows)
            ));
        }
    }

    let systolic = series.get(BP_SYSTOLIC);
    let diastolic = series.get(BP_DIASTOLIC);
    if systolic.is_some() || diastolic.is_some() {
        lines.push(describe_blood_pressure(systolic, diastolic));
    }

    for (name, values) in series.iter().filter(|(name, _)| !CORE_VITALS.contains(name)) {
        lines.push(format!("{}: {}", name, describe_series(values, name, "", windows)));
    }

    if lines.is_empty() {
        NO_VITALS.to_string()
    } else {
        lines.join("\n")
    }
}

/// Summarize `series` and bound the result to `max_context_tokens`.
pub fn build_context(series: &SeriesSet, max_context_tokens: usize) -> String {
    let context = summarize_vitals(series);
    let estimated = estimate_tokens(&context);
    if estimated <= max_context_tokens {
        return context;
    }

    debug!(estimated, max_context_tokens, "Truncating vitals context");
    truncate_to_budget(&context, max_context_tokens)
}
