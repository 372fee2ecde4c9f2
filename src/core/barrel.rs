//! Barrel age derived from fill and bottling dates.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Whole years and months a spirit spent in the barrel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BarrelAge {
    /// Whole years
    pub years: u32,
    /// 0..=11
    pub months: u32,
}

impl BarrelAge {
    /// Age in months.
    #[must_use]
    pub const fn total_months(self) -> u32 {
        self.years * 12 + self.months
    }
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

impl fmt::Display for BarrelAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, 0) => f.write_str("less than a month"),
            (0, months) => f.write_str(&plural(months, "month")),
            (years, 0) => f.write_str(&plural(years, "year")),
            (years, months) => write!(f, "{}, {}", plural(years, "year"), plural(months, "month")),
        }
    }
}

/// Completed months between `filled` and `bottled`.
///
/// A month counts once the day of month is reached again, so Jan 31 to Feb 28
/// is zero months. None when `bottled` is before `filled`.
#[must_use]
pub fn barrel_age(filled: NaiveDate, bottled: NaiveDate) -> Option<BarrelAge> {
    if bottled < filled {
        return None;
    }

    let mut months = i64::from(bottled.year() - filled.year()) * 12
        + i64::from(bottled.month())
        - i64::from(filled.month());
    if bottled.day() < filled.day() {
        months -= 1;
    }

    let months = u32::try_from(months).ok()?;
    Some(BarrelAge {
        years: months / 12,
        months: months % 12,
    })
}
