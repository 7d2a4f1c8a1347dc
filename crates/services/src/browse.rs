//! # BrowseSession
//!
//! The viewer's catalog screen as a value: an immutable ad snapshot, the
//! current filter state and the list derived from both. Events replace the
//! relevant piece of state and the visible list is recomputed in full.

use std::sync::Arc;

use domains::{Ad, CategoryFilter, FilterState, GeoPoint, Selection};

use crate::catalog::{filter_ads, location_options, LocationOptions};

/// A single user interaction with the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEvent {
    SelectCategory(CategoryFilter),
    SetQuery(String),
    SetCountry(Selection),
    SetState(Selection),
    SetDistrict(Selection),
    SetRewardMin(String),
    SetRewardMax(String),
    SetDurationMin(String),
    SetDurationMax(String),
    SetUserLocation(Option<GeoPoint>),
    ClearFilters,
    /// A fresh fetch of the ad collection arrived.
    ReplaceAds(Vec<Ad>),
}

#[derive(Debug, Clone)]
pub struct BrowseSession {
    ads: Arc<[Ad]>,
    filters: FilterState,
    visible: Vec<Ad>,
}

impl BrowseSession {
    pub fn new(ads: Vec<Ad>) -> Self {
        Self::with_filters(ads, FilterState::default())
    }

    pub fn with_filters(ads: Vec<Ad>, filters: FilterState) -> Self {
        let ads: Arc<[Ad]> = ads.into();
        let visible = filter_ads(&ads, &filters);
        Self {
            ads,
            filters,
            visible,
        }
    }

    pub fn dispatch(&mut self, event: BrowseEvent) -> &[Ad] {
        match event {
            BrowseEvent::SelectCategory(category) => self.filters.category = category,
            BrowseEvent::SetQuery(query) => self.filters.query = query,
            BrowseEvent::SetCountry(country) => self.filters.advanced.location.set_country(country),
            BrowseEvent::SetState(state) => self.filters.advanced.location.set_state(state),
            BrowseEvent::SetDistrict(district) => self.filters.advanced.location.set_district(district),
            BrowseEvent::SetRewardMin(v) => self.filters.advanced.reward.min = v,
            BrowseEvent::SetRewardMax(v) => self.filters.advanced.reward.max = v,
            BrowseEvent::SetDurationMin(v) => self.filters.advanced.duration.min = v,
            BrowseEvent::SetDurationMax(v) => self.filters.advanced.duration.max = v,
            BrowseEvent::SetUserLocation(point) => self.filters.user_location = point,
            BrowseEvent::ClearFilters => self.filters = FilterState::default(),
            BrowseEvent::ReplaceAds(ads) => self.ads = ads.into(),
        }

        self.visible = filter_ads(&self.ads, &self.filters);
        tracing::debug!(
            total = self.ads.len(),
            visible = self.visible.len(),
            "catalog recomputed"
        );
        &self.visible
    }

    pub fn visible(&self) -> &[Ad] {
        &self.visible
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn ads(&self) -> &[Ad] {
        &self.ads
    }

    pub fn location_options(&self) -> LocationOptions {
        location_options(&self.ads, &self.filters.advanced.location)
    }
}
