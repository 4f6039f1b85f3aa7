//! Overall rating summary.
//!
//! The summary only counts dimensions the user explicitly rated. A fresh form
//! where every dimension still sits at its default of 1 summarises to zero,
//! not to 1.0.
//!
//! ## Bands
//!
//! | Average | Band |
//! |---------|------|
//! | `< 2.5` | [`Band::Red`] |
//! | `2.5 ..< 2.9` | [`Band::Orange`] |
//! | `2.9 ..< 3.3` | [`Band::Green`] |
//! | `3.3 ..< 3.6` | [`Band::Blue`] |
//! | `>= 3.6` | [`Band::Purple`] |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative colour band of an overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Orange,
    Green,
    Blue,
    Purple,
}

impl Band {
    /// All bands, lowest first.
    pub const ALL: [Band; 5] = [Band::Red, Band::Orange, Band::Green, Band::Blue, Band::Purple];

    /// Classifies an average. Thresholds are half-open, first match wins.
    pub fn for_average(average: f64) -> Self {
        if average < 2.5 {
            Band::Red
        } else if average < 2.9 {
            Band::Orange
        } else if average < 3.3 {
            Band::Green
        } else if average < 3.6 {
            Band::Blue
        } else {
            Band::Purple
        }
    }

    /// Lowercase band name, e.g. `"orange"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Orange => "orange",
            Band::Green => "green",
            Band::Blue => "blue",
            Band::Purple => "purple",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate over the explicitly rated dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    /// Mean of the set ratings, 0.0 when nothing is set.
    pub average: f64,
    /// Sum of the set ratings, 0.0 when nothing is set.
    pub sum: f64,
    /// Number of dimensions that contributed.
    pub rated: usize,
    /// Colour band, `None` when nothing is set.
    pub band: Option<Band>,
}

impl OverallSummary {
    /// Summary of an untouched form.
    pub const EMPTY: OverallSummary = OverallSummary {
        average: 0.0,
        sum: 0.0,
        rated: 0,
        band: None,
    };

    /// Builds the summary from the set ratings.
    pub fn from_ratings<I>(set_ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (sum, rated) = set_ratings
            .into_iter()
            .fold((0u32, 0usize), |(sum, n), r| (sum + u32::from(r), n + 1));

        if rated == 0 {
            return Self::EMPTY;
        }

        let sum = f64::from(sum);
        let average = sum / rated as f64;
        OverallSummary {
            average,
            sum,
            rated,
            band: Some(Band::for_average(average)),
        }
    }

    /// Average formatted to one decimal place.
    pub fn average_text(&self) -> String {
        one_decimal(self.average)
    }

    /// Sum formatted to one decimal place.
    pub fn sum_text(&self) -> String {
        one_decimal(self.sum)
    }
}

/// Formats with one decimal, rounding halves away from zero.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = OverallSummary::from_ratings(std::iter::empty());
        assert_eq!(summary, OverallSummary::EMPTY);
        assert_eq!(summary.average_text(), "0.0");
        assert_eq!(summary.sum_text(), "0.0");
        assert!(summary.band.is_none());
    }

    #[test]
    fn test_example_summary() {
        let summary = OverallSummary::from_ratings([4, 5]);
        assert_eq!(summary.sum, 9.0);
        assert_eq!(summary.average, 4.5);
        assert_eq!(summary.rated, 2);
        assert_eq!(summary.band, Some(Band::Purple));
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::for_average(2.49), Band::Red);
        assert_eq!(Band::for_average(2.5), Band::Orange);
        assert_eq!(Band::for_average(2.9), Band::Green);
        assert_eq!(Band::for_average(3.3), Band::Blue);
        assert_eq!(Band::for_average(3.6), Band::Purple);
        assert_eq!(Band::for_average(5.0), Band::Purple);
    }

    #[test]
    fn test_boundaries_from_real_ratings() {
        // 5 / 2 = 2.5
        assert_eq!(OverallSummary::from_ratings([2, 3]).band, Some(Band::Orange));
        // 29 / 10 = 2.9
        let ratings = [3, 3, 3, 3, 3, 3, 3, 3, 3, 2];
        assert_eq!(OverallSummary::from_ratings(ratings).band, Some(Band::Green));
        // 33 / 10 = 3.3
        let ratings = [3, 3, 3, 3, 3, 3, 3, 4, 4, 4];
        assert_eq!(OverallSummary::from_ratings(ratings).band, Some(Band::Blue));
        // 18 / 5 = 3.6
        assert_eq!(OverallSummary::from_ratings([4, 4, 4, 3, 3]).band, Some(Band::Purple));
    }

    #[test]
    fn test_one_decimal_rounds_half_up() {
        assert_eq!(one_decimal(2.25), "2.3");
        assert_eq!(one_decimal(3.0), "3.0");
        assert_eq!(one_decimal(10.0 / 3.0), "3.3");
    }
}
