//! Price history bars and the summary line shown above them.

use chrono::NaiveDate;
use serde::Serialize;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Summary of a price history window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub bars: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub first_open: f64,
    pub first_close: f64,
    pub last_close: f64,
    pub min_close: f64,
    pub max_close: f64,
    /// Close-to-close change over the window, in percent. `None` when the
    /// first close is not positive.
    pub change_pct: Option<f64>,
}

impl PriceSummary {
    /// Summarise bars given in chronological order. `None` for an empty
    /// history.
    pub fn from_bars(bars: &[PriceBar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;

        let (min_close, max_close) = bars.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), b| (lo.min(b.close), hi.max(b.close)),
        );
        let change_pct = if first.close > 0.0 {
            Some((last.close - first.close) / first.close * 100.0)
        } else {
            None
        };

        Some(Self {
            bars: bars.len(),
            first_date: first.date,
            last_date: last.date,
            first_open: first.open,
            first_close: first.close,
            last_close: last.close,
            min_close,
            max_close,
            change_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, open: f64, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_empty_history() {
        assert!(PriceSummary::from_bars(&[]).is_none());
    }

    #[test]
    fn test_summary_fields() {
        let bars = vec![bar(1, 100.0, 102.0), bar(2, 102.0, 99.0), bar(3, 99.0, 112.2)];
        let s = PriceSummary::from_bars(&bars).unwrap();
        assert_eq!(s.bars, 3);
        assert_eq!(s.first_open, 100.0);
        assert_eq!(s.last_close, 112.2);
        assert_eq!(s.min_close, 99.0);
        assert_eq!(s.max_close, 112.2);
        assert_eq!(s.first_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(s.last_date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        let change = s.change_pct.unwrap();
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_bar_has_zero_change() {
        let s = PriceSummary::from_bars(&[bar(5, 10.0, 10.0)]).unwrap();
        assert_eq!(s.change_pct, Some(0.0));
    }

    #[test]
    fn test_zero_first_close_has_no_change() {
        let s = PriceSummary::from_bars(&[bar(1, 0.0, 0.0), bar(2, 1.0, 1.0)]).unwrap();
        assert_eq!(s.change_pct, None);
    }
}
