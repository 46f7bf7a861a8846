//! Data Processor Module
//! Range filtering and the long-format reshape used by the forecast overlay.

use crate::data::series::{DateRange, ForecastRow, LongPoint, PriceSeries, SeriesLabel};
use chrono::NaiveDate;

/// Stateless transformations over loaded series.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows whose date lies within `range`, inclusive. The input is untouched.
    pub fn filter_by_range(series: &PriceSeries, range: &DateRange) -> PriceSeries {
        let points = series
            .points()
            .iter()
            .filter(|p| range.contains(p.date))
            .copied()
            .collect();
        PriceSeries::new(series.name(), points)
    }

    /// Transform forecast rows to long format (stack operation).
    ///
    /// Output order matches a melt: every `real_close` value first, then every
    /// `predicted_close` value, each in row order.
    pub fn stack_to_long(rows: &[ForecastRow]) -> Vec<LongPoint> {
        SeriesLabel::ALL
            .iter()
            .flat_map(|&label| {
                rows.iter().map(move |row| LongPoint {
                    date: row.date,
                    label,
                    value: match label {
                        SeriesLabel::RealClose => row.real_close,
                        SeriesLabel::PredictedClose => row.predicted_close,
                    },
                })
            })
            .collect()
    }

    /// Split long-format points back into one (date, value) run per label,
    /// in first-seen label order.
    pub fn split_by_label(points: &[LongPoint]) -> Vec<(SeriesLabel, Vec<(NaiveDate, f64)>)> {
        let mut groups: Vec<(SeriesLabel, Vec<(NaiveDate, f64)>)> = Vec::new();
        for point in points {
            match groups.iter_mut().find(|(label, _)| *label == point.label) {
                Some((_, values)) => values.push((point.date, point.value)),
                None => groups.push((point.label, vec![(point.date, point.value)])),
            }
        }
        groups
    }

    /// Sum of closing prices.
    pub fn total_close(series: &PriceSeries) -> f64 {
        series.points().iter().map(|p| p.close).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::PricePoint;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample() -> PriceSeries {
        PriceSeries::new(
            "S",
            (1..=10)
                .map(|day| PricePoint {
                    date: d(day),
                    close: day as f64 * 10.0,
                })
                .collect(),
        )
    }

    #[test]
    fn full_range_returns_everything() {
        let series = sample();
        let range = series.full_range().unwrap();
        assert_eq!(DataProcessor::filter_by_range(&series, &range), series);
    }

    #[test]
    fn sub_range_is_inclusive() {
        let series = sample();
        let range = DateRange::new(d(3), d(5)).unwrap();
        let filtered = DataProcessor::filter_by_range(&series, &range);
        assert_eq!(filtered.closes(), vec![30.0, 40.0, 50.0]);
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn range_outside_series_is_empty() {
        let series = sample();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
        .unwrap();
        assert!(DataProcessor::filter_by_range(&series, &range).is_empty());
    }

    #[test]
    fn stack_produces_two_labelled_series() {
        let rows = vec![
            ForecastRow { date: d(1), real_close: 10.0, predicted_close: 11.0 },
            ForecastRow { date: d(2), real_close: 20.0, predicted_close: 19.0 },
        ];
        let long = DataProcessor::stack_to_long(&rows);
        assert_eq!(long.len(), 4);
        assert_eq!(long[0].label, SeriesLabel::RealClose);
        assert_eq!(long[3], LongPoint { date: d(2), label: SeriesLabel::PredictedClose, value: 19.0 });

        let groups = DataProcessor::split_by_label(&long);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, vec![(d(1), 10.0), (d(2), 20.0)]);
        assert_eq!(groups[1].1, vec![(d(1), 11.0), (d(2), 19.0)]);
    }

    #[test]
    fn total_close_sums_filtered_rows() {
        let series = sample();
        assert_eq!(DataProcessor::total_close(&series), 550.0);
    }
}
