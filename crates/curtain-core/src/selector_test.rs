use std::str::FromStr;

use super::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

fn cm(value: i64) -> Decimal {
    Decimal::from(value)
}

fn roller_catalog() -> Catalog {
    Catalog::from_json_str(
        r#"{
            "Roller": {
                "medidas permitidas": {
                    "min": { "ancho": 0.3, "alto": 0.3 },
                    "max": { "ancho": 3.0, "alto": 2.5 }
                },
                "sistemas": [
                    { "ancho": 1.5, "alto": 2.0, "sistema": "R150" },
                    { "ancho": 3.0, "alto": 2.5, "sistema": "R300" }
                ]
            }
        }"#,
    )
    .expect("roller catalog")
}

/// Catalog whose mechanisms are listed out of order and include a tall-but-narrow
/// option, so ordering by width first is observable.
fn mixed_catalog() -> Catalog {
    Catalog::from_json_str(
        r#"{
            "Dubai": {
                "medidas permitidas": {
                    "min": { "ancho": 0.5, "alto": 0.5, "area": 0.5 },
                    "max": { "ancho": 4.0, "alto": 3.2, "area": 10.0 }
                },
                "sistemas": [
                    { "ancho": 4.0, "alto": 3.2, "sistema": "D400" },
                    { "ancho": 2.0, "alto": 3.2, "sistema": "D200-ALTO" },
                    { "ancho": 2.0, "alto": 2.2, "sistema": "D200" },
                    { "ancho": 1.2, "alto": 3.2, "sistema": "D120" }
                ]
            },
            "Dunes": {}
        }"#,
    )
    .expect("mixed catalog")
}

#[test]
fn picks_smallest_mechanism_for_roller() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(120), cm(180)).unwrap();
    assert_eq!(result.label(), Some("R150"));
}

#[test]
fn moves_up_to_larger_mechanism_when_height_exceeds_small_one() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(120), cm(210)).unwrap();
    assert_eq!(result.label(), Some("R300"));
}

#[test]
fn width_over_family_max_exceeds() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(350), cm(180)).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Width));
}

#[test]
fn height_over_family_max_exceeds() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(100), cm(251)).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Height));
}

#[test]
fn just_above_each_max_exceeds() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let epsilon = dec("0.01");
    assert_eq!(
        selector.select("Roller", cm(300) + epsilon, cm(100)).unwrap(),
        SelectionResult::ExceedsMaximum(Bound::Width)
    );
    assert_eq!(
        selector.select("Roller", cm(100), cm(250) + epsilon).unwrap(),
        SelectionResult::ExceedsMaximum(Bound::Height)
    );
}

#[test]
fn exactly_at_max_is_accepted() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(300), cm(250)).unwrap();
    assert_eq!(result.label(), Some("R300"));
}

#[test]
fn maximum_checks_run_before_minimum_checks() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(400), cm(10)).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Width));
}

#[test]
fn width_below_family_min_is_below_minimum() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(20), cm(100)).unwrap();
    assert_eq!(result, SelectionResult::BelowMinimum(Bound::Width));
}

#[test]
fn height_below_family_min_is_below_minimum() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(100), cm(29)).unwrap();
    assert_eq!(result, SelectionResult::BelowMinimum(Bound::Height));
}

#[test]
fn exactly_at_min_is_accepted() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(30), cm(30)).unwrap();
    assert_eq!(result.label(), Some("R150"));
}

#[test]
fn area_over_max_exceeds_even_when_sides_fit() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    // 3.9 x 3.0 = 11.7 m², over the 10 m² cap
    let result = selector.select("Dubai", cm(390), cm(300)).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Area));
}

#[test]
fn area_under_min_is_below_minimum_even_when_sides_fit() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    // 0.6 x 0.6 = 0.36 m², under the 0.5 m² floor
    let result = selector.select("Dubai", cm(60), cm(60)).unwrap();
    assert_eq!(result, SelectionResult::BelowMinimum(Bound::Area));
}

#[test]
fn sorts_by_width_before_height() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    // D120 is too narrow; among the 2.0 m options the shorter D200 wins.
    let result = selector.select("Dubai", cm(150), cm(200)).unwrap();
    assert_eq!(result.label(), Some("D200"));
}

#[test]
fn narrow_request_takes_narrowest_mechanism_even_if_taller() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Dubai", cm(100), cm(100)).unwrap();
    assert_eq!(result.label(), Some("D120"));
}

#[test]
fn tall_request_skips_short_option_of_same_width() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Dubai", cm(150), cm(300)).unwrap();
    assert_eq!(result.label(), Some("D200-ALTO"));
}

#[test]
fn unknown_family_is_no_match() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Vertical", cm(100), cm(100)).unwrap();
    assert_eq!(result, SelectionResult::NoMatch);
}

#[test]
fn family_without_mechanisms_is_no_match() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Dunes", cm(100), cm(100)).unwrap();
    assert_eq!(result, SelectionResult::NoMatch);
}

#[test]
fn no_mechanism_large_enough_is_no_match() {
    let catalog = Catalog::from_json_str(
        r#"{ "Roller": { "sistemas": [ { "ancho": 1.0, "alto": 1.0, "sistema": "R100" } ] } }"#,
    )
    .unwrap();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", cm(150), cm(80)).unwrap();
    assert_eq!(result, SelectionResult::NoMatch);
}

#[test]
fn zero_width_is_invalid_input() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let err = selector.select("Roller", Decimal::ZERO, cm(100)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(ref msg) if msg.contains("width")));
}

#[test]
fn negative_height_is_invalid_input() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let err = selector.select("Roller", cm(100), cm(-5)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(ref msg) if msg.contains("height")));
}

#[test]
fn selection_is_idempotent() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    let first = selector.select("Dubai", cm(175), cm(220)).unwrap();
    let second = selector.select("Dubai", cm(175), cm(220)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn selected_mechanism_is_smallest_covering_option() {
    let catalog = mixed_catalog();
    let selector = SystemSelector::new(&catalog);
    for (w, h) in [(60, 90), (110, 310), (190, 210), (250, 150), (399, 250)] {
        let (width, height) = (cm(w) / cm(100), cm(h) / cm(100));
        let mut covering: Vec<&MechanismOption> = catalog
            .mechanisms_for("Dubai")
            .filter(|m| m.max_width >= width && m.max_height >= height)
            .collect();
        covering.sort_by_key(|m| (m.max_width, m.max_height));
        let expected = covering.first().map(|m| m.label.as_str());
        let result = selector.select("Dubai", cm(w), cm(h)).unwrap();
        assert_eq!(result.label(), expected, "size {w}x{h}");
    }
}

#[test]
fn select_raw_normalizes_family_label() {
    let catalog = Catalog::from_json_str(
        r#"{ "Barcelona": { "sistemas": [ { "ancho": 2.5, "alto": 2.8, "sistema": "BV250" } ] } }"#,
    )
    .unwrap();
    let selector = SystemSelector::new(&catalog);
    let request = SizeRequest {
        family_raw: "Barcelona - Bandas Verticales".to_string(),
        width_cm: cm(200),
        height_cm: cm(240),
    };
    let result = selector.select_raw(&request).unwrap();
    assert_eq!(result.label(), Some("BV250"));
}

#[test]
fn select_raw_finds_family_through_upper_cased_pass_through() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let request = SizeRequest {
        family_raw: " roller ".to_string(),
        width_cm: cm(120),
        height_cm: cm(180),
    };
    assert_eq!(selector.select_raw(&request).unwrap().label(), Some("R150"));
}

#[test]
fn select_raw_finds_family_with_accented_name() {
    let catalog = Catalog::from_json_str(
        r#"{ "Panel Japonés": { "sistemas": [ { "ancho": 3, "alto": 3, "sistema": "PJ300" } ] } }"#,
    )
    .unwrap();
    let selector = SystemSelector::new(&catalog);
    let request = SizeRequest {
        family_raw: "Panel Japonés".to_string(),
        width_cm: cm(100),
        height_cm: cm(100),
    };
    assert_eq!(selector.select_raw(&request).unwrap().label(), Some("PJ300"));
}

fn huge() -> Decimal {
    Decimal::from_i128_with_scale(10_i128.pow(20), 0)
}

#[test]
fn huge_size_exceeds_width_without_panicking() {
    let catalog = roller_catalog();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Roller", huge(), huge()).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Width));
}

#[test]
fn overflowing_area_exceeds_area_bound() {
    let catalog = Catalog::from_json_str(
        r#"{ "Panel": { "medidas permitidas": { "max": { "area": 50 } } } }"#,
    )
    .unwrap();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Panel", huge(), huge()).unwrap();
    assert_eq!(result, SelectionResult::ExceedsMaximum(Bound::Area));
}

#[test]
fn overflowing_area_without_area_bounds_is_no_match() {
    let catalog = Catalog::from_json_str(
        r#"{ "Panel": { "sistemas": [ { "ancho": 3, "alto": 3, "sistema": "P300" } ] } }"#,
    )
    .unwrap();
    let selector = SystemSelector::new(&catalog);
    let result = selector.select("Panel", huge(), huge()).unwrap();
    assert_eq!(result, SelectionResult::NoMatch);
}

#[test]
fn label_is_none_for_non_recommendations() {
    assert_eq!(SelectionResult::NoMatch.label(), None);
    assert_eq!(SelectionResult::ExceedsMaximum(Bound::Area).label(), None);
    assert_eq!(SelectionResult::BelowMinimum(Bound::Height).label(), None);
}

#[test]
fn bound_display() {
    assert_eq!(Bound::Width.to_string(), "width");
    assert_eq!(Bound::Height.to_string(), "height");
    assert_eq!(Bound::Area.to_string(), "area");
}
