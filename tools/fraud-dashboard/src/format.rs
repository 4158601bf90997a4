use crate::errors::DashboardError;

/// Formats a fraction in `[0, 1]` as a percentage with `decimals` digits.
pub fn percentage(fraction: f64, decimals: usize) -> Result<String, DashboardError> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(DashboardError::InvalidMetric(format!(
            "{fraction} is outside [0, 1]"
        )));
    }
    Ok(format!("{:.*}%", decimals, fraction * 100.0))
}

pub fn thousands_group(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Turns `logistic_regression` into `Logistic Regression`.
///
/// The domain is ASCII letters, digits and underscores. Runs of underscores
/// collapse into one space and only the first letter of each word changes case.
/// Anything outside the domain is returned unchanged.
pub fn title_case(identifier: &str) -> String {
    if !identifier
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return identifier.to_string();
    }

    identifier
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = first.to_ascii_uppercase().to_string();
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scales `fraction` by `scale` and clamps the result to `max` percent.
pub fn bar_width(fraction: f64, scale: f64, max: f64) -> Result<f64, DashboardError> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(DashboardError::InvalidMetric(format!(
            "bar fraction {fraction} must be finite and non-negative"
        )));
    }
    if !scale.is_finite() || scale <= 0.0 || !max.is_finite() || max <= 0.0 {
        return Err(DashboardError::InvalidMetric(format!(
            "bar scale {scale} and max {max} must be finite and positive"
        )));
    }
    Ok((fraction * scale).min(max))
}

pub fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

/// Renders a derived rate. A missing ratio, or one pushed past `[0, 1]` by
/// drifting counts, shows as `n/a`.
pub fn rate_label(value: Option<f64>, decimals: usize) -> String {
    value
        .and_then(|fraction| percentage(fraction, decimals).ok())
        .unwrap_or_else(|| "n/a".to_string())
}

/// Number of terminal cells a `width_percent` bar fills on a `track` of cells.
pub fn bar_cells(width_percent: f64, track: usize) -> usize {
    if !width_percent.is_finite() || width_percent <= 0.0 {
        return 0;
    }
    let cells = (width_percent.min(100.0) / 100.0 * track as f64).round() as usize;
    cells.min(track)
}

#[cfg(test)]
mod tests {
    use super::{bar_cells, bar_width, percentage, rate_label, ratio, thousands_group, title_case};
    use crate::errors::DashboardError;

    #[test]
    fn percentage_has_fixed_decimals_and_suffix() {
        assert_eq!(percentage(0.9999, 2).expect("pct"), "99.99%");
        assert_eq!(percentage(0.0, 2).expect("pct"), "0.00%");
        assert_eq!(percentage(1.0, 1).expect("pct"), "100.0%");
        assert_eq!(percentage(0.165, 1).expect("pct"), "16.5%");
    }

    #[test]
    fn percentage_sweep_keeps_suffix_and_decimals() {
        for i in 0..=1000 {
            let x = f64::from(i) / 1000.0;
            let label = percentage(x, 2).expect("pct");
            let digits = label.strip_suffix('%').expect("suffix");
            let (whole, fraction) = digits.split_once('.').expect("decimal point");
            assert!(!whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit()), "{label}");
            assert_eq!(fraction.len(), 2, "{label}");
            assert!(fraction.chars().all(|c| c.is_ascii_digit()), "{label}");
        }
    }

    #[test]
    fn percentage_rejects_out_of_range_and_non_finite() {
        for bad in [1.01, -0.001, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                percentage(bad, 2),
                Err(DashboardError::InvalidMetric(_))
            ));
        }
    }

    #[test]
    fn thousands_group_inserts_commas() {
        assert_eq!(thousands_group(0), "0");
        assert_eq!(thousands_group(65), "65");
        assert_eq!(thousands_group(1_000), "1,000");
        assert_eq!(thousands_group(568_630), "568,630");
        assert_eq!(thousands_group(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn title_case_handles_domain_and_passthrough() {
        assert_eq!(title_case("random_forest"), "Random Forest");
        assert_eq!(title_case("logistic_regression"), "Logistic Regression");
        assert_eq!(title_case("xgboost"), "Xgboost");
        assert_eq!(title_case("__gbm__v2"), "Gbm V2");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("random-forest"), "random-forest");
    }

    #[test]
    fn bar_width_clamps_to_max() {
        assert_eq!(bar_width(0.5, 100.0, 100.0).expect("width"), 50.0);
        assert_eq!(bar_width(0.25, 600.0, 100.0).expect("width"), 100.0);
        assert!(bar_width(-0.1, 600.0, 100.0).is_err());
        assert!(bar_width(0.1, 0.0, 100.0).is_err());
        assert!(bar_width(f64::NAN, 600.0, 100.0).is_err());
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(1, 0), None);
        assert_eq!(rate_label(ratio(1, 0), 2), "n/a");
        assert_eq!(rate_label(ratio(1, 4), 1), "25.0%");
        assert_eq!(rate_label(ratio(5, 4), 1), "n/a");
    }

    #[test]
    fn bar_cells_round_and_stay_on_track() {
        assert_eq!(bar_cells(50.0, 40), 20);
        assert_eq!(bar_cells(100.0, 40), 40);
        assert_eq!(bar_cells(250.0, 40), 40);
        assert_eq!(bar_cells(0.0, 40), 0);
        assert_eq!(bar_cells(f64::NAN, 40), 0);
    }
}
