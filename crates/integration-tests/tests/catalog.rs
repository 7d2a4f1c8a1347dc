use domains::{
    AdStatus, Category, CategoryFilter, FilterState, GeoPoint, LocationFilter, RangeFilter,
    Selection,
};
use integration_tests::{titles, AdBuilder};
use services::{filter_ads, location_options};

fn food_and_tech() -> Vec<domains::Ad> {
    vec![
        AdBuilder::new("A").category(Category::Food).reward(5.0).build(),
        AdBuilder::new("B").category(Category::Technology).reward(50.0).build(),
    ]
}

#[test]
fn reward_and_category_filters_combine() {
    let ads = food_and_tech();

    let mut cheap = FilterState::default();
    cheap.advanced.reward = RangeFilter::new("", "10");
    assert_eq!(titles(&filter_ads(&ads, &cheap)), ["A"]);

    let tech = FilterState {
        category: CategoryFilter::Only(Category::Technology),
        ..FilterState::default()
    };
    assert_eq!(titles(&filter_ads(&ads, &tech)), ["B"]);

    let both = FilterState {
        category: CategoryFilter::Only(Category::Technology),
        ..cheap
    };
    assert!(filter_ads(&ads, &both).is_empty());
}

#[test]
fn output_is_an_ordered_subset_of_approved_ads() {
    let ads = vec![
        AdBuilder::new("first").build(),
        AdBuilder::new("pending").status(AdStatus::Pending).build(),
        AdBuilder::new("second").build(),
        AdBuilder::new("rejected").status(AdStatus::Rejected).build(),
        AdBuilder::new("third").build(),
    ];

    let cleared = filter_ads(&ads, &FilterState::default());
    assert_eq!(titles(&cleared), ["first", "second", "third"]);

    let filters = FilterState {
        query: "i".to_string(),
        ..FilterState::default()
    };
    let visible = filter_ads(&ads, &filters);
    assert!(visible.iter().all(|ad| ad.is_approved()));
    assert_eq!(titles(&visible), ["first", "third"]);
}

#[test]
fn narrowing_a_filter_never_grows_the_result() {
    let ads: Vec<_> = (1..=10)
        .map(|i| {
            AdBuilder::new(&format!("Ad {i}"))
                .reward(f64::from(i) * 5.0)
                .duration(i * 10)
                .build()
        })
        .collect();

    let mut filters = FilterState::default();
    let mut previous = filter_ads(&ads, &filters).len();
    for max in ["45", "30", "12", "5", "0"] {
        filters.advanced.reward.max = max.to_string();
        let now = filter_ads(&ads, &filters).len();
        assert!(now <= previous, "max {max} grew the result");
        previous = now;
    }

    filters = FilterState::default();
    previous = filter_ads(&ads, &filters).len();
    for min in ["20", "50", "90", "101"] {
        filters.advanced.duration.min = min.to_string();
        let now = filter_ads(&ads, &filters).len();
        assert!(now <= previous, "min {min} grew the result");
        previous = now;
    }
    assert_eq!(previous, 0);
}

#[test]
fn range_bounds_are_inclusive_and_garbage_is_ignored() {
    let ads = food_and_tech();
    let mut filters = FilterState::default();

    filters.advanced.reward = RangeFilter::new("5", "50");
    assert_eq!(filter_ads(&ads, &filters).len(), 2);

    filters.advanced.reward = RangeFilter::new("abc", "  ");
    assert_eq!(filter_ads(&ads, &filters).len(), 2);

    filters.advanced.reward = RangeFilter::new("NaN", "inf");
    assert_eq!(filter_ads(&ads, &filters).len(), 2);

    filters.advanced.reward = RangeFilter::new(" 6 ", "");
    assert_eq!(titles(&filter_ads(&ads, &filters)), ["B"]);
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let ads = vec![
        AdBuilder::new("Masala Chai Festival").build(),
        AdBuilder::new("Smartphone Launch").build(),
    ];
    let filters = FilterState {
        query: "  CHAI ".to_string(),
        ..FilterState::default()
    };
    assert_eq!(titles(&filter_ads(&ads, &filters)), ["Masala Chai Festival"]);
}

#[test]
fn ads_without_coordinates_drop_out_under_proximity() {
    let bengaluru = GeoPoint::new(12.9716, 77.5946);
    let ads = vec![
        AdBuilder::new("near").at(12.9352, 77.6245).build(),
        AdBuilder::new("no coords").build(),
        AdBuilder::new("mysuru").at(12.2958, 76.6394).build(),
    ];
    let filters = FilterState {
        user_location: Some(bengaluru),
        ..FilterState::default()
    };
    assert_eq!(titles(&filter_ads(&ads, &filters)), ["near"]);
}

#[test]
fn proximity_radius_is_strict() {
    // One degree of latitude is about 111 km; 0.45 degrees is just over 50 km.
    let origin = GeoPoint::new(0.0, 0.0);
    let ads = vec![
        AdBuilder::new("inside").at(0.44, 0.0).build(),
        AdBuilder::new("outside").at(0.46, 0.0).build(),
    ];
    let filters = FilterState {
        user_location: Some(origin),
        ..FilterState::default()
    };
    assert_eq!(titles(&filter_ads(&ads, &filters)), ["inside"]);
}

#[test]
fn district_without_state_is_ignored() {
    let ads = vec![
        AdBuilder::new("karnataka").place("India", "Karnataka", "Central").build(),
        AdBuilder::new("kerala").place("India", "Kerala", "Central").build(),
        AdBuilder::new("kerala north").place("India", "Kerala", "North").build(),
    ];
    let mut filters = FilterState::default();
    filters.advanced.location = LocationFilter {
        country: Selection::Value("India".to_string()),
        state: Selection::All,
        district: Selection::Value("Central".to_string()),
    };
    assert_eq!(filter_ads(&ads, &filters).len(), 3);

    filters.advanced.location.state = Selection::Value("Kerala".to_string());
    assert_eq!(titles(&filter_ads(&ads, &filters)), ["kerala"]);
}

#[test]
fn state_without_country_is_ignored() {
    let ads = vec![
        AdBuilder::new("karnataka").place("India", "Karnataka", "Mysuru").build(),
        AdBuilder::new("kerala").place("India", "Kerala", "Alappuzha").build(),
        AdBuilder::new("gandaki").place("Nepal", "Gandaki", "Kaski").build(),
        AdBuilder::new("queued")
            .place("India", "Kerala", "Alappuzha")
            .status(AdStatus::Pending)
            .build(),
    ];
    let mut filters = FilterState::default();
    filters.advanced.location = LocationFilter {
        country: Selection::All,
        state: Selection::Value("Kerala".to_string()),
        district: Selection::Value("Alappuzha".to_string()),
    };
    assert_eq!(
        titles(&filter_ads(&ads, &filters)),
        ["karnataka", "kerala", "gandaki"]
    );
    assert!(filters.is_cleared());
}

#[test]
fn location_options_cascade() {
    let ads = vec![
        AdBuilder::new("a").place("Nepal", "Gandaki", "Kaski").build(),
        AdBuilder::new("b").place("India", "Kerala", "Alappuzha").build(),
        AdBuilder::new("c").place("India", "Karnataka", "Mysuru").build(),
        AdBuilder::new("d").place("India", "Karnataka", "Bengaluru Urban").build(),
        AdBuilder::new("e")
            .place("Bhutan", "Thimphu", "Thimphu")
            .status(AdStatus::Pending)
            .build(),
    ];

    let mut selected = LocationFilter::default();
    let options = location_options(&ads, &selected);
    assert_eq!(options.countries, ["India", "Nepal"]);
    assert!(options.states.is_empty());

    selected.set_country(Selection::parse("India"));
    selected.set_state(Selection::parse("Karnataka"));
    let options = location_options(&ads, &selected);
    assert_eq!(options.states, ["Karnataka", "Kerala"]);
    assert_eq!(options.districts, ["Bengaluru Urban", "Mysuru"]);
}
