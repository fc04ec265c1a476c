//! Axis and tooltip label lookups for grade-valued charts.
//!
//! Grades are plotted as indices into a label table (`0 => "4a"`, ...). For
//! stacked charts a point's plotted value is relative to the series below it,
//! so the tooltip has to add the lower series back before looking the grade up.

/// Label for an integral index into `labels`.
pub fn grade_label(labels: &[String], value: f64) -> Option<&str> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    labels.get(value as usize).map(String::as_str)
}

/// `"{value}%"`, printing whole numbers without a fraction.
pub fn percent_label(value: f64) -> String {
    format!("{}%", value)
}

/// Value of the stacked series below `series_index` at `point`.
///
/// With `gap_offset` set (over-time charts), missing lower values are skipped
/// and the offset is added once if any was missing. Without it a missing lower
/// value leaves the total undefined. Lower series absent from `series`
/// altogether leave it undefined regardless of the offset.
pub fn stacked_base(
    series: &[Vec<Option<f64>>],
    series_index: usize,
    point: usize,
    gap_offset: Option<f64>,
) -> Option<f64> {
    if series.len() < series_index {
        return None;
    }
    let mut sum = 0.0;
    let mut gaps = 0;
    for lower in series.iter().take(series_index) {
        match lower.get(point).copied().flatten() {
            Some(v) => sum += v,
            None => gaps += 1,
        }
    }
    if gaps == 0 {
        return Some(sum);
    }
    gap_offset.map(|offset| sum + offset)
}

/// Tooltip text for a point of a stacked grade chart.
pub fn stacked_grade_label<'a>(
    labels: &'a [String],
    value: f64,
    series: &[Vec<Option<f64>>],
    series_index: usize,
    point: usize,
    gap_offset: Option<f64>,
) -> Option<&'a str> {
    if gap_offset.is_some() {
        // Over-time charts leave holes where a series has no ascends that month.
        series.get(series_index)?.get(point).copied().flatten()?;
    }
    let base = stacked_base(series, series_index, point, gap_offset)?;
    grade_label(labels, value + base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades() -> Vec<String> {
        ["4a", "4b", "4c", "5a", "5b", "5c", "6a"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn grade_label_requires_integral_index() {
        let labels = grades();
        assert_eq!(grade_label(&labels, 3.0), Some("5a"));
        assert_eq!(grade_label(&labels, 2.5), None);
        assert_eq!(grade_label(&labels, -1.0), None);
        assert_eq!(grade_label(&labels, 7.0), None);
        assert_eq!(grade_label(&labels, f64::NAN), None);
    }

    #[test]
    fn percent_label_matches_js_number_formatting() {
        assert_eq!(percent_label(12.0), "12%");
        assert_eq!(percent_label(12.5), "12.5%");
    }

    #[test]
    fn stacked_label_adds_lower_series() {
        let labels = grades();
        let series = vec![vec![Some(2.0)], vec![Some(1.0)], vec![Some(2.0)]];
        assert_eq!(stacked_grade_label(&labels, 2.0, &series, 0, 0, None), Some("4c"));
        assert_eq!(stacked_grade_label(&labels, 1.0, &series, 1, 0, None), Some("5a"));
        assert_eq!(stacked_grade_label(&labels, 2.0, &series, 2, 0, None), Some("5c"));
    }

    #[test]
    fn missing_lower_value_without_offset_is_undefined() {
        let labels = grades();
        let series = vec![vec![None], vec![Some(1.0)]];
        assert_eq!(stacked_grade_label(&labels, 1.0, &series, 1, 0, None), None);
    }

    #[test]
    fn unknown_lower_series_is_undefined() {
        let labels = grades();
        assert_eq!(stacked_base(&[], 2, 0, None), None);
        assert_eq!(stacked_base(&[vec![Some(1.0)]], 2, 0, Some(3.0)), None);
        assert_eq!(stacked_grade_label(&labels, 1.0, &[], 2, 0, None), None);
        assert_eq!(stacked_grade_label(&labels, 1.0, &[], 0, 0, None), Some("4b"));
    }

    #[test]
    fn gap_offset_fills_missing_lower_values() {
        let labels = grades();
        let series = vec![vec![None], vec![Some(1.0)], vec![Some(1.0)]];
        assert_eq!(stacked_base(&series, 2, 0, Some(3.0)), Some(4.0));
        assert_eq!(stacked_grade_label(&labels, 1.0, &series, 2, 0, Some(3.0)), Some("5c"));
    }

    #[test]
    fn over_time_point_without_value_has_no_label() {
        let labels = grades();
        let series = vec![vec![Some(1.0)], vec![None]];
        assert_eq!(stacked_grade_label(&labels, 0.0, &series, 1, 0, Some(2.0)), None);
    }
}
