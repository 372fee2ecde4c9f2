//! Deal classification of a purchase price against community pricing.
//!
//! This is the only place deal thresholds live. The collection add-form, the
//! bottle detail sidebar and inventory badges all call [`evaluate`], so the
//! same `(paid, summary)` pair always yields the same tier everywhere.

use std::fmt;

use crate::entities::PricingSummary;

/// At or below this percentage versus average: great deal.
pub const GREAT_MAX_PCT: f64 = -20.0;
/// At or below this percentage versus average: good deal.
pub const GOOD_MAX_PCT: f64 = -10.0;
/// At or above this percentage versus average: premium.
pub const PREMIUM_MIN_PCT: f64 = 30.0;
/// At or above this percentage versus average: above average.
pub const ABOVE_MIN_PCT: f64 = 10.0;

/// How a paid price compares to the community average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DealTier {
    /// 20% or more below average
    Great,
    /// 10% to 20% below average
    Good,
    /// Within 10% of average
    Fair,
    /// 10% to 30% above average
    Above,
    /// 30% or more above average
    Premium,
}

impl DealTier {
    /// Classifies a signed percentage versus average. First match wins:
    /// great, good, premium, above, otherwise fair.
    #[must_use]
    pub fn from_vs_avg_pct(vs_avg_pct: f64) -> Self {
        if vs_avg_pct <= GREAT_MAX_PCT {
            Self::Great
        } else if vs_avg_pct <= GOOD_MAX_PCT {
            Self::Good
        } else if vs_avg_pct >= PREMIUM_MIN_PCT {
            Self::Premium
        } else if vs_avg_pct >= ABOVE_MIN_PCT {
            Self::Above
        } else {
            Self::Fair
        }
    }

    /// Short text for list badges.
    #[must_use]
    pub const fn badge_label(self) -> &'static str {
        match self {
            Self::Great => "Great deal",
            Self::Good => "Good deal",
            Self::Fair => "Fair price",
            Self::Above => "Above average",
            Self::Premium => "Premium",
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Above => "above",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for DealTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing one paid price to a pricing summary.
#[derive(Clone, Debug, PartialEq)]
pub struct DealAnalysis {
    /// `(paid / avg - 1) * 100`
    pub vs_avg_pct: f64,
    /// `(paid / msrp - 1) * 100`, None without a positive MSRP
    pub vs_msrp_pct: Option<f64>,
    /// Tier derived from `vs_avg_pct`
    pub tier: DealTier,
    /// Community average the price was compared to
    pub avg_price: f64,
    /// MSRP the price was compared to, None without a positive MSRP
    pub avg_msrp: Option<f64>,
}

impl DealAnalysis {
    /// Sentence describing the tier, e.g. `Great deal! 20% below average ($100.00)`.
    #[must_use]
    pub fn message(&self) -> String {
        let pct = rounded_abs_pct(self.vs_avg_pct);
        let avg = self.avg_price;
        match self.tier {
            DealTier::Great => format!("Great deal! {pct}% below average (${avg:.2})"),
            DealTier::Good => format!("Good price! {pct}% below average (${avg:.2})"),
            DealTier::Fair if pct == 0 => format!("Fair price, right at average (${avg:.2})"),
            DealTier::Fair => {
                let direction = if self.vs_avg_pct < 0.0 { "below" } else { "above" };
                format!("Fair price, {pct}% {direction} average (${avg:.2})")
            }
            DealTier::Above => format!("{pct}% above average (${avg:.2})"),
            DealTier::Premium => format!("Premium price: {pct}% above average (${avg:.2})"),
        }
    }

    /// Phrase comparing the price to MSRP, None when there is no MSRP.
    /// The direction follows the sign of `vs_msrp_pct`; only an exact match
    /// is at MSRP.
    #[must_use]
    pub fn msrp_message(&self) -> Option<String> {
        let vs_msrp = self.vs_msrp_pct?;
        let msrp = self.avg_msrp?;
        if vs_msrp == 0.0 {
            return Some(format!("At MSRP (${msrp:.2})"));
        }
        let direction = if vs_msrp < 0.0 { "below" } else { "above" };
        Some(match rounded_abs_pct(vs_msrp) {
            0 => format!("Less than 1% {direction} MSRP (${msrp:.2})"),
            pct => format!("{pct}% {direction} MSRP (${msrp:.2})"),
        })
    }
}

/// Rounds half away from zero to a whole percentage, then drops the sign.
#[must_use]
pub fn rounded_abs_pct(pct: f64) -> u64 {
    // Cast safety: percentages here are finite and far below u64::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = pct.round().abs() as u64;
    rounded
}

/// Signed percentage difference of `paid` from `reference`.
///
/// Multiplying before dividing keeps whole-number inputs exact, so a price
/// exactly 20% under average lands on -20 rather than -19.999...
fn pct_difference(paid: f64, reference: f64) -> f64 {
    (paid - reference) * 100.0 / reference
}

/// Classifies `paid_price` against `summary`.
///
/// Returns None, meaning "not enough data", unless the price is positive and
/// finite, a summary is present, it has at least three samples, its average
/// price is positive, and the resulting percentage is finite.
#[must_use]
pub fn evaluate(paid_price: f64, summary: Option<&PricingSummary>) -> Option<DealAnalysis> {
    let summary = summary?;
    if !paid_price.is_finite() || paid_price <= 0.0 {
        return None;
    }
    if !summary.is_sufficient() || !summary.avg_price.is_finite() || summary.avg_price <= 0.0 {
        return None;
    }

    let vs_avg_pct = pct_difference(paid_price, summary.avg_price);
    if !vs_avg_pct.is_finite() {
        return None;
    }
    let avg_msrp = summary
        .avg_msrp
        .filter(|msrp| msrp.is_finite() && *msrp > 0.0);
    let vs_msrp_pct = avg_msrp
        .map(|msrp| pct_difference(paid_price, msrp))
        .filter(|pct| pct.is_finite());
    let avg_msrp = vs_msrp_pct.and(avg_msrp);

    Some(DealAnalysis {
        vs_avg_pct,
        vs_msrp_pct,
        tier: DealTier::from_vs_avg_pct(vs_avg_pct),
        avg_price: summary.avg_price,
        avg_msrp,
    })
}
