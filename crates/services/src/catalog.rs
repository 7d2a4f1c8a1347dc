//! # Catalog filtering
//!
//! Derives the viewer-facing ad list from the full collection. Every pass
//! only removes ads and never reorders them, so the result is always an
//! ordered subset of the approved ads.

use std::collections::BTreeSet;

use domains::{haversine_km, Ad, CategoryFilter, FilterState, LocationFilter, RangeFilter, NEARBY_RADIUS_KM};
use serde::Serialize;

/// Applies every active filter in sequence and returns the surviving ads.
pub fn filter_ads(ads: &[Ad], filters: &FilterState) -> Vec<Ad> {
    let mut visible: Vec<&Ad> = ads.iter().filter(|ad| ad.is_approved()).collect();

    if let CategoryFilter::Only(category) = filters.category {
        visible.retain(|ad| ad.category == category);
    }

    let query = filters.query.trim().to_lowercase();
    if !query.is_empty() {
        visible.retain(|ad| ad.title.to_lowercase().contains(&query));
    }

    let (country, state, district) = filters.advanced.location.effective();
    if let Some(country) = country {
        visible.retain(|ad| ad.location.country == country);
        if let Some(state) = state {
            visible.retain(|ad| ad.location.state == state);
            if let Some(district) = district {
                visible.retain(|ad| ad.location.district == district);
            }
        }
    }

    retain_in_range(&mut visible, &filters.advanced.reward, |ad| ad.reward);
    retain_in_range(&mut visible, &filters.advanced.duration, |ad| f64::from(ad.duration_secs));

    if let Some(user) = filters.user_location {
        visible.retain(|ad| {
            ad.location
                .coordinates()
                .is_some_and(|point| haversine_km(user, point) < NEARBY_RADIUS_KM)
        });
    }

    visible.into_iter().cloned().collect()
}

fn retain_in_range(visible: &mut Vec<&Ad>, range: &RangeFilter, field: impl Fn(&Ad) -> f64) {
    if range.is_empty() {
        return;
    }
    visible.retain(|ad| range.contains(field(ad)));
}

/// Choices for the cascading location dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationOptions {
    pub countries: Vec<String>,
    /// States of the selected country (empty while country is "ALL")
    pub states: Vec<String>,
    /// Districts of the selected state (empty while state is "ALL")
    pub districts: Vec<String>,
}

/// Distinct, sorted location values drawn from approved ads only.
pub fn location_options(ads: &[Ad], selected: &LocationFilter) -> LocationOptions {
    let approved = || ads.iter().filter(|ad| ad.is_approved());
    let (country, state, _) = selected.effective();

    let countries = distinct(approved().map(|ad| ad.location.country.as_str()));

    let states = match country {
        Some(country) => distinct(
            approved()
                .filter(|ad| ad.location.country == country)
                .map(|ad| ad.location.state.as_str()),
        ),
        None => Vec::new(),
    };

    let districts = match (country, state) {
        (Some(country), Some(state)) => distinct(
            approved()
                .filter(|ad| ad.location.country == country && ad.location.state == state)
                .map(|ad| ad.location.district.as_str()),
        ),
        _ => Vec::new(),
    };

    LocationOptions {
        countries,
        states,
        districts,
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
