//! # Filter State
//!
//! Everything a viewer can narrow the catalog by. Numeric bounds are kept as
//! the raw text the viewer typed; parsing happens when the filter is applied
//! so a half-typed number simply means "no bound".

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geo::GeoPoint;
use crate::models::Category;

/// Category dropdown. `All` disables the category pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses dropdown text. "ALL" and blank select everything.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            raw.parse().map(Self::Only)
        }
    }
}

/// One level of the location hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Country → state → district. Changing a level resets every level below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub country: Selection,
    pub state: Selection,
    pub district: Selection,
}

impl LocationFilter {
    pub fn set_country(&mut self, country: Selection) {
        self.country = country;
        self.state = Selection::All;
        self.district = Selection::All;
    }

    pub fn set_state(&mut self, state: Selection) {
        self.state = state;
        self.district = Selection::All;
    }

    pub fn set_district(&mut self, district: Selection) {
        self.district = district;
    }

    /// The levels that actually constrain the result. A level only counts
    /// once every level above it is fixed.
    pub fn effective(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        let country = self.country.value();
        let state = country.and(self.state.value());
        let district = state.and(self.district.value());
        (country, state, district)
    }
}

/// Min/max text pair for reward and duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: String,
    pub max: String,
}

impl RangeFilter {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (parse_bound(&self.min), parse_bound(&self.max))
    }

    pub fn is_empty(&self) -> bool {
        self.bounds() == (None, None)
    }

    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.bounds();
        min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedFilters {
    pub location: LocationFilter,
    pub reward: RangeFilter,
    pub duration: RangeFilter,
}

/// Complete filter input for the catalog pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: String,
    pub advanced: AdvancedFilters,
    pub user_location: Option<GeoPoint>,
}

impl FilterState {
    pub fn is_cleared(&self) -> bool {
        self.category == CategoryFilter::All
            && self.query.trim().is_empty()
            && self.advanced.location.effective() == (None, None, None)
            && self.advanced.reward.is_empty()
            && self.advanced.duration.is_empty()
            && self.user_location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_country_resets_children() {
        let mut loc = LocationFilter::default();
        loc.set_country(Selection::parse("India"));
        loc.set_state(Selection::parse("Karnataka"));
        loc.set_district(Selection::parse("Mysuru"));

        loc.set_country(Selection::parse("Nepal"));
        assert_eq!(loc.state, Selection::All);
        assert_eq!(loc.district, Selection::All);
    }

    #[test]
    fn district_without_state_is_not_effective() {
        let loc = LocationFilter {
            country: Selection::parse("India"),
            state: Selection::All,
            district: Selection::parse("Mysuru"),
        };
        assert_eq!(loc.effective(), (Some("India"), None, None));
    }

    #[test]
    fn state_without_country_is_not_effective() {
        let loc = LocationFilter {
            country: Selection::All,
            state: Selection::parse("Kerala"),
            district: Selection::parse("Alappuzha"),
        };
        assert_eq!(loc.effective(), (None, None, None));
    }

    #[test]
    fn garbage_bounds_are_ignored() {
        let r = RangeFilter::new("abc", "");
        assert_eq!(r.bounds(), (None, None));
        assert!(r.contains(-5.0));

        let r = RangeFilter::new(" 2.5 ", "NaN");
        assert_eq!(r.bounds(), (Some(2.5), None));
    }

    #[test]
    fn category_parse_accepts_all_and_names() {
        assert_eq!(CategoryFilter::parse("ALL"), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("real estate"),
            Ok(CategoryFilter::Only(Category::RealEstate))
        );
        assert_eq!(
            CategoryFilter::parse("gadgets"),
            Err(DomainError::Validation("unknown category 'gadgets'".to_string()))
        );
    }

    #[test]
    fn default_state_is_cleared() {
        assert!(FilterState::default().is_cleared());
    }
}
