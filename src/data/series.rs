//! Typed rows produced by the loader.

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;

/// One trading session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices of one entity, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    name: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series. Points are stably sorted so equal dates keep file order.
    pub fn new(name: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Min to max date of the series, `None` when empty.
    pub fn full_range(&self) -> Option<DateRange> {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    pub fn to_xy(&self) -> Vec<(NaiveDate, f64)> {
        self.points.iter().map(|p| (p.date, p.close)).collect()
    }
}

/// Inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Intersect with `bounds`. Falls back to `bounds` when they do not overlap.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        if self.end < bounds.start || self.start > bounds.end {
            *bounds
        } else {
            DateRange { start, end }
        }
    }
}

/// The two series of a forecast file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesLabel {
    RealClose,
    PredictedClose,
}

impl SeriesLabel {
    pub const ALL: [SeriesLabel; 2] = [SeriesLabel::RealClose, SeriesLabel::PredictedClose];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesLabel::RealClose => "real_close",
            SeriesLabel::PredictedClose => "predicted_close",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub real_close: f64,
    pub predicted_close: f64,
}

/// A forecast row after reshaping to long format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPoint {
    pub date: NaiveDate,
    pub label: SeriesLabel,
    pub value: f64,
}

/// Raw cells of a CSV file, stringified for tabular display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Precomputed forecast for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub rows: Vec<ForecastRow>,
    pub table: TableData,
}

impl ForecastRecord {
    pub fn real(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.real_close).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.predicted_close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn series_sorts_by_date_and_keeps_ties_in_order() {
        let series = PriceSeries::new(
            "X",
            vec![
                PricePoint { date: d(2024, 1, 3), close: 3.0 },
                PricePoint { date: d(2024, 1, 1), close: 1.0 },
                PricePoint { date: d(2024, 1, 3), close: 4.0 },
            ],
        );
        assert_eq!(series.closes(), vec![1.0, 3.0, 4.0]);
        assert_eq!(series.full_range(), Some(DateRange::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap()));
    }

    #[test]
    fn empty_series_has_no_range() {
        assert!(PriceSeries::new("X", Vec::new()).full_range().is_none());
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(matches!(
            DateRange::new(d(2024, 2, 1), d(2024, 1, 1)),
            Err(DashboardError::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_contains_both_ends() {
        let r = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(r.contains(d(2024, 1, 1)));
        assert!(r.contains(d(2024, 1, 31)));
        assert!(!r.contains(d(2024, 2, 1)));
        assert_eq!(r.span_days(), 30);
    }

    #[test]
    fn clamp_intersects_or_resets() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let wide = DateRange::new(d(2023, 6, 1), d(2024, 3, 1)).unwrap();
        assert_eq!(
            wide.clamp_to(&bounds),
            DateRange::new(d(2024, 1, 1), d(2024, 3, 1)).unwrap()
        );
        let outside = DateRange::new(d(2020, 1, 1), d(2020, 2, 1)).unwrap();
        assert_eq!(outside.clamp_to(&bounds), bounds);
    }
}
