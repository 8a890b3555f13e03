//! Trailing-twelve-month dividend yield.
//!
//! The TTM window is deliberately wider than a year (400 days) so that an
//! annual payer whose latest payment slipped a few weeks is still counted.
//! When nothing falls inside the window the latest two payments stand in.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Width of the trailing window, in days.
pub const TTM_DAYS: i64 = 400;

/// Number of latest payments listed alongside the yield.
pub const RECENT_LIMIT: usize = 8;

/// One dividend payment per share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DividendEvent {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Which figure the yield was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DividendMethod {
    /// Sum of payments inside the trailing window.
    Ttm,
    /// Sum of the latest two payments (nothing inside the window).
    FallbackLastTwo,
    /// No usable payments at all.
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendInfo {
    pub ttm_dividend: Option<f64>,
    pub yield_pct: Option<f64>,
    pub alt_dividend: Option<f64>,
    pub alt_yield_pct: Option<f64>,
    pub method: DividendMethod,
    /// Latest payments, newest first.
    pub recent: Vec<DividendEvent>,
}

impl DividendInfo {
    fn no_data() -> Self {
        Self {
            ttm_dividend: None,
            yield_pct: None,
            alt_dividend: None,
            alt_yield_pct: None,
            method: DividendMethod::NoData,
            recent: Vec::new(),
        }
    }
}

/// Computes the dividend summary as of `today`.
///
/// Non-positive amounts are ignored. Yields are only computed when
/// `last_close` is positive.
pub fn dividend_info(
    events: &[DividendEvent],
    last_close: f64,
    today: NaiveDate,
    ttm_days: i64,
) -> DividendInfo {
    let mut paid: Vec<DividendEvent> = events
        .iter()
        .copied()
        .filter(|e| e.amount.is_finite() && e.amount > 0.0)
        .collect();
    if paid.is_empty() {
        return DividendInfo::no_data();
    }
    paid.sort_by(|a, b| b.date.cmp(&a.date));

    let mut info = DividendInfo::no_data();
    let cutoff = today - Duration::days(ttm_days);
    let ttm_sum: f64 = paid
        .iter()
        .filter(|e| e.date >= cutoff)
        .map(|e| e.amount)
        .sum();

    if ttm_sum > 0.0 {
        info.ttm_dividend = Some(ttm_sum);
        info.method = DividendMethod::Ttm;
    } else {
        let alt_sum: f64 = paid.iter().take(2).map(|e| e.amount).sum();
        if alt_sum > 0.0 {
            info.alt_dividend = Some(alt_sum);
            info.method = DividendMethod::FallbackLastTwo;
        }
    }

    if last_close > 0.0 {
        info.yield_pct = info.ttm_dividend.map(|d| d / last_close * 100.0);
        info.alt_yield_pct = info.alt_dividend.map(|d| d / last_close * 100.0);
    }

    paid.truncate(RECENT_LIMIT);
    info.recent = paid;
    info
}
