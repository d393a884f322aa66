//! Physical column names of the population dataset

pub const CBSA_ID: &str = "cbsa_id";
pub const CBSA_NAME: &str = "cbsa_name";
/// State FIPS code
pub const STATE: &str = "state";
/// Person weight
pub const PWGTP: &str = "PWGTP";

pub const SEX: &str = "sex";
pub const AGE: &str = "age";
pub const MARRIED: &str = "married";
/// Annual income in dollars
pub const REAL_INCOME: &str = "real_income";
pub const EDUC: &str = "educ";
pub const HEIGHT_INCHES: &str = "height_inches";

pub const THIN: &str = "thin";
pub const FIT: &str = "fit";
pub const OVERWEIGHT: &str = "overweight";
pub const OBESE: &str = "obese";
pub const ABS: &str = "abs";
pub const BMI: &str = "bmi";
pub const GRIP_STRENGTH: &str = "grip_strength";
pub const WAIST_CIRCUMFERENCE: &str = "waist_circumference";
pub const RFM: &str = "rfm";

pub const RACE_MAPPED: &str = "race_mapped";
pub const IS_SMOKER: &str = "is_smoker";
pub const DRINKS_PER_DAY: &str = "drinks_per_day";
pub const HAS_KIDS: &str = "has_kids";

pub const POLITICS_BROAD: &str = "politics_broad";
pub const POLITICS_DETAILED: &str = "politics_detailed";
pub const RELIGION_BROAD: &str = "religion_broad";
pub const RELIGION_DETAILED: &str = "religion_detailed";

// Output names of the incidence query
pub const OUT_COUNT: &str = "count";
pub const OUT_WEIGHTED_POPULATION: &str = "weighted_population";
pub const OUT_TOTAL_REGION_POPULATION: &str = "total_region_population";

// Output names of the metadata queries
pub const OUT_STATE_FIPS: &str = "state_fips";
pub const OUT_POP: &str = "pop";
pub const OUT_AVG_WEIGHT: &str = "avg_weight";
pub const OUT_ROWS: &str = "rows";
