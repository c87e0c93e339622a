//! Assemble-then-derive behaviour over the reference catalog

use std::collections::HashSet;
use std::sync::Arc;

use data_validator::{UserInputSet, ValidationError};
use feature_engine::{
    derive, AttributeValue, DerivedFeatures, FeatureAssembler, FeatureError, SchemaCatalog,
    HOUSE_STYLES, NEIGHBORHOODS,
};
use proptest::prelude::*;

const REFERENCE_YEAR: i64 = 2020;

fn assembler() -> FeatureAssembler {
    FeatureAssembler::new(Arc::new(SchemaCatalog::reference().unwrap()), REFERENCE_YEAR)
}

fn reference_input() -> UserInputSet {
    UserInputSet {
        year_built: 2000,
        year_remod_add: 2000,
        overall_qual: 6,
        overall_cond: 6,
        living_area: 1500,
        lot_area: 10_000,
        total_bsmt_sf: 1000,
        garage_area: 500,
        neighborhood: "College Creek".to_string(),
        house_style: "Two story".to_string(),
        garage_year_built: None,
    }
}

#[test]
fn test_reference_scenario() {
    let assembler = assembler();
    let base = assembler.assemble(&reference_input()).unwrap();
    assert_eq!(base.integer("1stFlrSF").unwrap(), 750);
    assert_eq!(base.integer("2ndFlrSF").unwrap(), 750);
    assert_eq!(base.categorical("Neighborhood"), Some("CollgCr"));
    assert_eq!(base.categorical("HouseStyle"), Some("2Story"));

    let record = derive(base, REFERENCE_YEAR).unwrap();
    let derived = record.derived();
    assert_eq!(derived.house_age, 20);
    assert_eq!(derived.remod_age, 20);
    assert_eq!(derived.is_old_not_remod, 0);
    assert_eq!(derived.qual_cond_diff, 0);
    assert_eq!(derived.has_garage, 1);
    assert_eq!(derived.has_bsmt, 1);
    assert!((derived.lot_ratio - 6.667).abs() < 0.001);
}

#[test]
fn test_zero_living_area_scenario() {
    let input = UserInputSet {
        living_area: 0,
        ..reference_input()
    };
    let record = assembler().build(&input).unwrap();
    assert_eq!(record.get("LotRatio"), Some(AttributeValue::Real(0.0)));
    assert_eq!(record.get("1stFlrSF"), Some(AttributeValue::Integer(500)));
    assert_eq!(record.get("2ndFlrSF"), Some(AttributeValue::Integer(0)));
}

#[test]
fn test_unknown_neighborhood_scenario() {
    let input = UserInputSet {
        neighborhood: "Atlantis".to_string(),
        ..reference_input()
    };
    let err = assembler().build(&input).unwrap_err();
    assert_eq!(
        err,
        FeatureError::Validation(ValidationError::InvalidCategory {
            field: "Neighborhood",
            label: "Atlantis".to_string(),
        })
    );
}

#[test]
fn test_future_remodel_is_clamped_not_rejected() {
    let input = UserInputSet {
        year_remod_add: REFERENCE_YEAR + 3,
        ..reference_input()
    };
    let record = assembler().build(&input).unwrap();
    assert_eq!(
        record.get("YearRemodAdd"),
        Some(AttributeValue::Integer(REFERENCE_YEAR))
    );
    assert_eq!(record.derived().remod_age, 0);
}

#[test]
fn test_every_label_round_trips_to_its_code() {
    let assembler = assembler();
    for (label, code) in NEIGHBORHOODS {
        let input = UserInputSet {
            neighborhood: label.to_string(),
            ..reference_input()
        };
        let base = assembler.assemble(&input).unwrap();
        assert_eq!(base.categorical("Neighborhood"), Some(code), "{}", label);
    }
    for (label, code) in HOUSE_STYLES {
        let input = UserInputSet {
            house_style: label.to_string(),
            ..reference_input()
        };
        let base = assembler.assemble(&input).unwrap();
        assert_eq!(base.categorical("HouseStyle"), Some(code), "{}", label);
    }
}

#[test]
fn test_final_record_columns() {
    let record = assembler().build(&reference_input()).unwrap();
    let columns: Vec<_> = record.columns().collect();
    assert_eq!(columns.len(), record.len());
    assert_eq!(columns.first(), Some(&"MSSubClass"));
    assert_eq!(columns.last(), Some(&"LotRatio"));
    for (name, _) in DerivedFeatures::COLUMNS {
        assert!(record.get(name).is_some(), "{} missing", name);
    }
}

#[test]
fn test_serialized_record_keeps_column_order() {
    let record = assembler().build(&reference_input()).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.starts_with(r#"{"MSSubClass":20,"MSZoning":"RL""#));
    assert!(json.ends_with(r#""HasBsmt":1,"LotRatio":6.666666666666667}"#));
}

fn valid_input() -> impl Strategy<Value = UserInputSet> {
    (
        1870i64..=REFERENCE_YEAR,
        0i64..=60,
        1i64..=10,
        1i64..=10,
        0i64..=10_000,
        0i64..=200_000,
        0i64..=5_000,
        0i64..=2_000,
        0usize..NEIGHBORHOODS.len(),
        0usize..HOUSE_STYLES.len(),
    )
        .prop_map(
            |(year_built, remodel_offset, qual, cond, living, lot, bsmt, garage, n, s)| {
                UserInputSet {
                    year_built,
                    year_remod_add: year_built + remodel_offset,
                    overall_qual: qual,
                    overall_cond: cond,
                    living_area: living,
                    lot_area: lot,
                    total_bsmt_sf: bsmt,
                    garage_area: garage,
                    neighborhood: NEIGHBORHOODS[n].0.to_string(),
                    house_style: HOUSE_STYLES[s].0.to_string(),
                    garage_year_built: None,
                }
            },
        )
}

proptest! {
    #[test]
    fn prop_slot_set_equals_schema(input in valid_input()) {
        let assembler = assembler();
        let base = assembler.assemble(&input).unwrap();
        let names: HashSet<_> = base.names().collect();
        let schema: HashSet<_> = assembler.catalog().slots().iter().map(|s| s.name).collect();
        prop_assert_eq!(base.len(), schema.len());
        prop_assert_eq!(names, schema);
    }

    #[test]
    fn prop_lot_ratio_is_finite(input in valid_input()) {
        let record = assembler().build(&input).unwrap();
        prop_assert!(record.derived().lot_ratio.is_finite());
        prop_assert_eq!(record.len(), record.base().len() + DerivedFeatures::COLUMNS.len());
    }

    #[test]
    fn prop_pipeline_is_deterministic(input in valid_input()) {
        let assembler = assembler();
        let first = assembler.build(&input).unwrap();
        let second = assembler.build(&input).unwrap();
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_unremodeled_ages_match(input in valid_input()) {
        let input = UserInputSet { year_remod_add: input.year_built, ..input };
        let derived = *assembler().build(&input).unwrap().derived();
        prop_assert_eq!(derived.house_age, derived.remod_age);
        prop_assert_eq!(derived.is_old_not_remod == 1, derived.house_age > 50);
    }

    #[test]
    fn prop_garage_flag_tracks_area(input in valid_input()) {
        let derived = *assembler().build(&input).unwrap().derived();
        prop_assert_eq!(derived.has_garage == 1, input.garage_area > 0);
        prop_assert_eq!(derived.has_bsmt == 1, input.total_bsmt_sf > 0);
    }
}
