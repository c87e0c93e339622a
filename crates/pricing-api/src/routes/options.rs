//! Form Option Routes

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use data_validator::{UserInputSet, ValidRange};
use serde::Serialize;

use crate::AppState;

/// Everything the form needs to render its inputs
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub neighborhoods: Vec<&'static str>,
    pub house_styles: Vec<&'static str>,
    pub reference_year: i64,
    /// Inclusive bounds per input slot
    pub bounds: BTreeMap<&'static str, ValidRange>,
    /// Initial form values
    pub defaults: UserInputSet,
}

/// Get picker labels and input bounds
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let assembler = state.engine.assembler();
    let catalog = assembler.catalog();
    let config = assembler.validator().config();
    let reference_year = assembler.reference_year();
    let years = config.year_range(reference_year);

    let bounds = BTreeMap::from([
        ("YearBuilt", years),
        ("YearRemodAdd", config.remodel_year_range()),
        ("GarageYrBlt", years),
        ("OverallQual", config.quality_range),
        ("OverallCond", config.condition_range),
        ("GrLivArea", config.living_area_range),
        ("LotArea", config.lot_area_range),
        ("TotalBsmtSF", config.basement_area_range),
        ("GarageArea", config.garage_area_range),
    ]);

    let defaults = UserInputSet {
        year_remod_add: (UserInputSet::default().year_built + 10).min(reference_year),
        ..Default::default()
    };

    Json(OptionsResponse {
        neighborhoods: catalog.neighborhoods().labels().collect(),
        house_styles: catalog.house_styles().labels().collect(),
        reference_year,
        bounds,
        defaults,
    })
}
