//! Descriptive statistics for a single series, rendered as one compact bullet.
//!
//! Windows count points, not calendar time. Callers wanting "7-day" semantics
//! must aggregate to daily values first.

/// Default short window, in points.
pub const SHORT_WINDOW: usize = 7;
/// Default long window, in points.
pub const LONG_WINDOW: usize = 30;

const SEPARATOR: &str = " | ";

/// Point-count windows used by [`SeriesStats::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub short: usize,
    pub long: usize,
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            short: SHORT_WINDOW,
            long: LONG_WINDOW,
        }
    }
}

/// Statistics for one series. Each field is present only when enough history exists.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesStats {
    pub latest: Option<f64>,
    pub short_mean: Option<f64>,
    pub long_mean: Option<f64>,
    pub long_delta: Option<f64>,
    pub long_pct_change: Option<f64>,
}

impl SeriesStats {
    pub fn compute(x: &[f64], windows: Windows) -> Self {
        let reference = x
            .len()
            .checked_sub(windows.long)
            .filter(|_| windows.long > 0)
            .map(|i| x[i]);
        let latest = x.last().copied();
        let long_delta = reference.zip(latest).map(|(r, l)| l - r);

        Self {
            latest,
            short_mean: tail_mean(x, windows.short),
            long_mean: tail_mean(x, windows.long),
            long_delta,
            long_pct_change: reference
                .zip(long_delta)
                .filter(|(r, _)| *r != 0.0)
                .map(|(r, d)| d * 100.0 / r.abs()),
        }
    }
}

/// Mean of the last `min(n, len)` points.
pub fn tail_mean(x: &[f64], n: usize) -> Option<f64> {
    let tail = &x[x.len().saturating_sub(n)..];
    if tail.is_empty() {
        return None;
    }
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

/// Render one series as a bullet such as
/// `latest glucose: 104.0 mg/dL | 7pt avg: 101.3 mg/dL | 30pt avg: 99.8 mg/dL`.
///
/// `units` is appended verbatim, so include any leading space. An empty
/// series says so explicitly.
pub fn describe_series(x: &[f64], label: &str, units: &str, windows: Windows) -> String {
    if x.is_empty() {
        return format!("No {} data available.", label);
    }

    let stats = SeriesStats::compute(x, windows);
    let mut parts = Vec::with_capacity(5);
    if let Some(v) = stats.latest {
        parts.push(format!("latest {}: {:.1}{}", label, v, units));
    }
    if let Some(v) = stats.short_mean {
        parts.push(format!("{}pt avg: {:.1}{}", windows.short, v, units));
    }
    if let Some(v) = stats.long_mean {
        parts.push(format!("{}pt avg: {:.1}{}", windows.long, v, units));
    }
    if let Some(v) = stats.long_delta {
        parts.push(format!("Δ{}: {:+.1}{}", windows.long, v, units));
    }
    if let Some(v) = stats.long_pct_change {
        parts.push(format!("({:+.1}%)", v));
    }
    parts.join(SEPARATOR)
}

/// Render the paired systolic/diastolic line.
///
/// Both sides must have readings; otherwise the line states the gap instead
/// of inventing the missing side. The 7-point average follows whenever both
/// means are non-zero, even for a single reading.
pub fn describe_blood_pressure(systolic: Option<&[f64]>, diastolic: Option<&[f64]>) -> String {
    match (systolic, diastolic) {
        (Some(sys), Some(dia)) if !sys.is_empty() && !dia.is_empty() => {
            let mut line = format!(
                "Blood pressure: latest {:.0}/{:.0} mmHg",
                sys[sys.len() - 1],
                dia[dia.len() - 1]
            );
            let nonzero_mean = |x: &[f64]| tail_mean(x, SHORT_WINDOW).filter(|m| *m != 0.0);
            if let (Some(s), Some(d)) = (nonzero_mean(sys), nonzero_mean(dia)) {
                line.push_str(&format!("{}{}pt avg: {:.0}/{:.0} mmHg", SEPARATOR, SHORT_WINDOW, s, d));
            }
            line
        }
        (Some(sys), Some(dia)) if sys.is_empty() && dia.is_empty() => {
            "Blood pressure: No blood pressure data available.".to_string()
        }
        _ => "Blood pressure: incomplete series supplied.".to_string(),
    }
}
