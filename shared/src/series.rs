//! Numeric series coercion and the cleaned per-request series set.

use indexmap::IndexMap;
use serde_json::Value;

/// Most recent points kept per series.
pub const MAX_INPUT_POINTS: usize = 10_000;

/// Chronologically ordered finite readings.
pub type NumericSeries = Vec<f64>;

/// Convert one untrusted element into a finite reading.
///
/// Numbers and numeric strings convert; everything else, including NaN and
/// infinities, is rejected.
pub fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_reading(s),
        _ => None,
    }
}

/// Parse a textual reading, rejecting NaN and infinities.
pub fn parse_reading(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Clean a loosely-typed sequence, dropping anything that is not a finite number.
pub fn coerce_series(values: &[Value]) -> NumericSeries {
    values.iter().filter_map(coerce_value).collect()
}

/// Keep only the most recent `max_points` readings.
pub fn cap_series(mut series: NumericSeries, max_points: usize) -> NumericSeries {
    if series.len() > max_points {
        series.drain(..series.len() - max_points);
    }
    series
}

/// Named series in encounter order.
///
/// A name that is present with an empty series is distinct from an absent name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    entries: IndexMap<String, NumericSeries>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, replacing an existing one of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, series: NumericSeries) {
        self.entries.insert(name.into(), series);
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total readings across all series.
    pub fn point_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<N: Into<String>> FromIterator<(N, NumericSeries)> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = (N, NumericSeries)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(name, series)| (name.into(), series)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_mixed_values() {
        let raw = json!([1, "2.5", " 3 ", null, "abc", true, [4], {"v": 5}, "1e2", -7.25]);
        let cleaned = coerce_series(raw.as_array().unwrap());
        assert_eq!(cleaned, vec![1.0, 2.5, 3.0, 100.0, -7.25]);
    }

    #[test]
    fn test_coerce_drops_non_finite_strings() {
        let raw = json!(["nan", "NaN", "inf", "-infinity", "1e999", 42]);
        let cleaned = coerce_series(raw.as_array().unwrap());
        assert_eq!(cleaned, vec![42.0]);
        assert!(cleaned.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_coerce_empty() {
        assert!(coerce_series(&[]).is_empty());
    }

    #[test]
    fn test_cap_keeps_suffix() {
        let series: NumericSeries = (0..MAX_INPUT_POINTS + 25).map(|i| i as f64).collect();
        let capped = cap_series(series.clone(), MAX_INPUT_POINTS);
        assert_eq!(capped.len(), MAX_INPUT_POINTS);
        assert_eq!(capped[..], series[25..]);
    }

    #[test]
    fn test_cap_under_limit_untouched() {
        let capped = cap_series(vec![1.0, 2.0], MAX_INPUT_POINTS);
        assert_eq!(capped, vec![1.0, 2.0]);
    }

    #[test]
    fn test_series_set_order_and_replace() {
        let mut set = SeriesSet::new();
        set.insert("weight", vec![80.0]);
        set.insert("glucose", vec![]);
        set.insert("weight", vec![81.0, 82.0]);

        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["weight", "glucose"]);
        assert_eq!(set.get("weight"), Some(&[81.0, 82.0][..]));
        assert_eq!(set.get("glucose"), Some(&[][..]));
        assert!(!set.contains("bp_sys"));
        assert_eq!(set.point_count(), 2);
    }
}
