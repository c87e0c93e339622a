//! Attribute Schema and Default Table
//!
//! The ordered slot list is the exact column set the price model was trained on.
//! Each slot carries its fallback value; the catalog checks the table at construction.

use serde::{Deserialize, Serialize};

/// Declared kind of an attribute slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Integer,
    Real,
    Categorical,
}

/// Value held by a record slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Real(f64),
    Categorical(String),
}

impl AttributeValue {
    /// Kind of this value
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Integer(_) => AttributeKind::Integer,
            AttributeValue::Real(_) => AttributeKind::Real,
            AttributeValue::Categorical(_) => AttributeKind::Categorical,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of integer and real values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Real(v) => Some(*v),
            AttributeValue::Categorical(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Categorical(code) => Some(code),
            _ => None,
        }
    }
}

/// Compile-time form of a default value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticValue {
    Integer(i64),
    Real(f64),
    Categorical(&'static str),
}

impl StaticValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            StaticValue::Integer(_) => AttributeKind::Integer,
            StaticValue::Real(_) => AttributeKind::Real,
            StaticValue::Categorical(_) => AttributeKind::Categorical,
        }
    }

    pub fn to_value(self) -> AttributeValue {
        match self {
            StaticValue::Integer(v) => AttributeValue::Integer(v),
            StaticValue::Real(v) => AttributeValue::Real(v),
            StaticValue::Categorical(code) => AttributeValue::Categorical(code.to_string()),
        }
    }
}

/// Named, typed slot of the attribute schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeSlot {
    pub name: &'static str,
    pub kind: AttributeKind,
}

/// Slot names referenced by the assembler and the derived-feature calculator
pub mod slots {
    pub const YEAR_BUILT: &str = "YearBuilt";
    pub const YEAR_REMOD_ADD: &str = "YearRemodAdd";
    pub const OVERALL_QUAL: &str = "OverallQual";
    pub const OVERALL_COND: &str = "OverallCond";
    pub const LIVING_AREA: &str = "GrLivArea";
    pub const LOT_AREA: &str = "LotArea";
    pub const TOTAL_BSMT_SF: &str = "TotalBsmtSF";
    pub const GARAGE_AREA: &str = "GarageArea";
    pub const NEIGHBORHOOD: &str = "Neighborhood";
    pub const HOUSE_STYLE: &str = "HouseStyle";
    pub const GARAGE_YEAR_BUILT: &str = "GarageYrBlt";
    pub const FIRST_FLOOR_AREA: &str = "1stFlrSF";
    pub const SECOND_FLOOR_AREA: &str = "2ndFlrSF";
}

/// Slots whose values come from the user input rather than the default table
pub const USER_SUPPLIED_SLOTS: [&str; 13] = [
    slots::YEAR_BUILT,
    slots::YEAR_REMOD_ADD,
    slots::OVERALL_QUAL,
    slots::OVERALL_COND,
    slots::LIVING_AREA,
    slots::LOT_AREA,
    slots::TOTAL_BSMT_SF,
    slots::GARAGE_AREA,
    slots::NEIGHBORHOOD,
    slots::HOUSE_STYLE,
    slots::GARAGE_YEAR_BUILT,
    slots::FIRST_FLOOR_AREA,
    slots::SECOND_FLOOR_AREA,
];

/// Number of base slots in the reference schema
pub const SCHEMA_LEN: usize = 79;

const fn slot(
    name: &'static str,
    kind: AttributeKind,
    default: StaticValue,
) -> (AttributeSlot, StaticValue) {
    (AttributeSlot { name, kind }, default)
}

/// Reference schema in model column order, each slot paired with its default
pub const REFERENCE_SCHEMA: [(AttributeSlot, StaticValue); SCHEMA_LEN] = [
    slot("MSSubClass", AttributeKind::Integer, StaticValue::Integer(20)),
    slot("MSZoning", AttributeKind::Categorical, StaticValue::Categorical("RL")),
    slot("LotFrontage", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("LotArea", AttributeKind::Integer, StaticValue::Integer(10000)),
    slot("Street", AttributeKind::Categorical, StaticValue::Categorical("Pave")),
    slot("Alley", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("LotShape", AttributeKind::Categorical, StaticValue::Categorical("Reg")),
    slot("LandContour", AttributeKind::Categorical, StaticValue::Categorical("Lvl")),
    slot("Utilities", AttributeKind::Categorical, StaticValue::Categorical("AllPub")),
    slot("LotConfig", AttributeKind::Categorical, StaticValue::Categorical("Inside")),
    slot("LandSlope", AttributeKind::Categorical, StaticValue::Categorical("Gtl")),
    slot("Neighborhood", AttributeKind::Categorical, StaticValue::Categorical("CollgCr")),
    slot("Condition1", AttributeKind::Categorical, StaticValue::Categorical("Norm")),
    slot("Condition2", AttributeKind::Categorical, StaticValue::Categorical("Norm")),
    slot("BldgType", AttributeKind::Categorical, StaticValue::Categorical("1Fam")),
    slot("HouseStyle", AttributeKind::Categorical, StaticValue::Categorical("1Story")),
    slot("OverallQual", AttributeKind::Integer, StaticValue::Integer(6)),
    slot("OverallCond", AttributeKind::Integer, StaticValue::Integer(6)),
    slot("YearBuilt", AttributeKind::Integer, StaticValue::Integer(1980)),
    slot("YearRemodAdd", AttributeKind::Integer, StaticValue::Integer(1980)),
    slot("RoofStyle", AttributeKind::Categorical, StaticValue::Categorical("Gable")),
    slot("RoofMatl", AttributeKind::Categorical, StaticValue::Categorical("CompShg")),
    slot("Exterior1st", AttributeKind::Categorical, StaticValue::Categorical("VinylSd")),
    slot("Exterior2nd", AttributeKind::Categorical, StaticValue::Categorical("VinylSd")),
    slot("MasVnrType", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("MasVnrArea", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("ExterQual", AttributeKind::Categorical, StaticValue::Categorical("TA")),
    slot("ExterCond", AttributeKind::Categorical, StaticValue::Categorical("TA")),
    slot("Foundation", AttributeKind::Categorical, StaticValue::Categorical("PConc")),
    slot("BsmtQual", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("BsmtCond", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("BsmtExposure", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("BsmtFinType1", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("BsmtFinSF1", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("BsmtFinType2", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("BsmtFinSF2", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("BsmtUnfSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("TotalBsmtSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("Heating", AttributeKind::Categorical, StaticValue::Categorical("GasA")),
    slot("HeatingQC", AttributeKind::Categorical, StaticValue::Categorical("Ex")),
    slot("CentralAir", AttributeKind::Categorical, StaticValue::Categorical("Y")),
    slot("Electrical", AttributeKind::Categorical, StaticValue::Categorical("SBrkr")),
    slot("1stFlrSF", AttributeKind::Integer, StaticValue::Integer(800)),
    slot("2ndFlrSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("LowQualFinSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("GrLivArea", AttributeKind::Integer, StaticValue::Integer(1500)),
    slot("BsmtFullBath", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("BsmtHalfBath", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("FullBath", AttributeKind::Integer, StaticValue::Integer(2)),
    slot("HalfBath", AttributeKind::Integer, StaticValue::Integer(1)),
    slot("BedroomAbvGr", AttributeKind::Integer, StaticValue::Integer(3)),
    slot("KitchenAbvGr", AttributeKind::Integer, StaticValue::Integer(1)),
    slot("KitchenQual", AttributeKind::Categorical, StaticValue::Categorical("TA")),
    slot("TotRmsAbvGrd", AttributeKind::Integer, StaticValue::Integer(6)),
    slot("Functional", AttributeKind::Categorical, StaticValue::Categorical("Typ")),
    slot("Fireplaces", AttributeKind::Integer, StaticValue::Integer(1)),
    slot("FireplaceQu", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("GarageType", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("GarageYrBlt", AttributeKind::Integer, StaticValue::Integer(1980)),
    slot("GarageFinish", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("GarageCars", AttributeKind::Integer, StaticValue::Integer(2)),
    slot("GarageArea", AttributeKind::Integer, StaticValue::Integer(500)),
    slot("GarageQual", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("GarageCond", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("PavedDrive", AttributeKind::Categorical, StaticValue::Categorical("Y")),
    slot("WoodDeckSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("OpenPorchSF", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("EnclosedPorch", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("3SsnPorch", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("ScreenPorch", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("PoolArea", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("PoolQC", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("Fence", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("MiscFeature", AttributeKind::Categorical, StaticValue::Categorical("without")),
    slot("MiscVal", AttributeKind::Integer, StaticValue::Integer(0)),
    slot("MoSold", AttributeKind::Integer, StaticValue::Integer(6)),
    slot("YrSold", AttributeKind::Integer, StaticValue::Integer(2020)),
    slot("SaleType", AttributeKind::Categorical, StaticValue::Categorical("WD")),
    slot("SaleCondition", AttributeKind::Categorical, StaticValue::Categorical("Normal")),
];
