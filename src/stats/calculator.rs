//! Statistics Calculator Module
//! Forecast error metrics and descriptive statistics of closing prices.

use crate::error::{DashboardError, Result};
use statrs::statistics::Statistics;

/// Descriptive statistics of a filtered close series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    /// Sample standard deviation, NaN below two observations.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean absolute error: (1/n) * sum(|real_i - predicted_i|).
    pub fn mean_absolute_error(real: &[f64], predicted: &[f64]) -> Result<f64> {
        if real.len() != predicted.len() {
            return Err(DashboardError::LengthMismatch {
                real: real.len(),
                predicted: predicted.len(),
            });
        }
        if real.is_empty() {
            return Err(DashboardError::EmptyInput);
        }

        let abs_errors: Vec<f64> = real
            .iter()
            .zip(predicted)
            .map(|(r, p)| (r - p).abs())
            .collect();
        Ok(abs_errors.iter().mean())
    }

    /// Summarize closing prices. `None` for an empty slice.
    pub fn summarize(closes: &[f64]) -> Option<SeriesSummary> {
        if closes.is_empty() {
            return None;
        }

        let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(SeriesSummary {
            count: closes.len(),
            total: closes.iter().sum(),
            mean: closes.iter().mean(),
            std_dev: closes.iter().std_dev(),
            min,
            max,
        })
    }
}

/// Format a value as US currency with thousands separators, `$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn mae_of_small_sample() {
        let mae =
            StatsCalculator::mean_absolute_error(&[10.0, 20.0, 30.0], &[12.0, 18.0, 33.0]).unwrap();
        assert_approx_eq!(mae, 7.0 / 3.0, 1e-12);
        assert_eq!(format!("{:.4}", mae), "2.3333");
    }

    #[test]
    fn mae_of_identical_sequences_is_zero() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(StatsCalculator::mean_absolute_error(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn mae_guards_lengths() {
        assert!(matches!(
            StatsCalculator::mean_absolute_error(&[1.0, 2.0], &[1.0]),
            Err(DashboardError::LengthMismatch { real: 2, predicted: 1 })
        ));
        assert!(matches!(
            StatsCalculator::mean_absolute_error(&[], &[]),
            Err(DashboardError::EmptyInput)
        ));
    }

    #[test]
    fn summary_of_closes() {
        let s = StatsCalculator::summarize(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.total, 12.0);
        assert_approx_eq!(s.mean, 4.0);
        assert_approx_eq!(s.std_dev, 2.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 6.0);
        assert!(StatsCalculator::summarize(&[]).is_none());
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }
}
