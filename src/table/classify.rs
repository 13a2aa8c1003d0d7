//! Row Classification
//!
//! Presentation buckets derived from one item and the current instant.
//! Nothing here is cached: callers pass `now` on every render so a day
//! boundary crossing is picked up immediately.

use chrono::{DateTime, Utc};

use crate::models::Item;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Fewer than 5 units
    Critical,
    /// 5 to 10 units
    Low,
    Normal,
}

impl StockLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            StockLevel::Critical => "stock-badge critical",
            StockLevel::Low => "stock-badge low",
            StockLevel::Normal => "stock-badge normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationBand {
    /// Under a week (red)
    Urgent,
    /// One to two weeks (yellow)
    Soon,
    /// More than two weeks (green)
    Safe,
}

impl ExpirationBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            ExpirationBand::Urgent => "expiration urgent",
            ExpirationBand::Soon => "expiration soon",
            ExpirationBand::Safe => "expiration safe",
        }
    }
}

/// Everything the table needs to decorate one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClass {
    pub stock: StockLevel,
    pub expiration: Option<ExpirationBand>,
    pub struck_through: bool,
}

impl RowClass {
    pub fn name_class(&self) -> &'static str {
        if self.struck_through {
            "item-name struck"
        } else {
            "item-name"
        }
    }

    /// Undated items get the plain cell class
    pub fn expiration_class(&self) -> &'static str {
        self.expiration.map_or("expiration", |band| band.css_class())
    }
}

pub fn stock_level(count: u32) -> StockLevel {
    match count {
        0..=4 => StockLevel::Critical,
        5..=10 => StockLevel::Low,
        _ => StockLevel::Normal,
    }
}

/// Whole days until `expiration`, rounded up; negative once expired
pub fn days_until(expiration: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiration - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

pub fn band_for_days(days: i64) -> ExpirationBand {
    if days < 7 {
        ExpirationBand::Urgent
    } else if days <= 14 {
        ExpirationBand::Soon
    } else {
        ExpirationBand::Safe
    }
}

pub fn expiration_band(item: &Item, now: DateTime<Utc>) -> Option<ExpirationBand> {
    item.expires_at().map(|at| band_for_days(days_until(at, now)))
}

pub fn is_struck_through(item: &Item) -> bool {
    item.stock == 0
}

pub fn classify(item: &Item, now: DateTime<Utc>) -> RowClass {
    RowClass {
        stock: stock_level(item.stock),
        expiration: expiration_band(item, now),
        struck_through: is_struck_through(item),
    }
}
