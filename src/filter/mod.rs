//! Filter state model (noun module)
//!
//! The serializable snapshot of every criterion a user has selected, the
//! vocabularies it is built from, and the edits that replace it.

mod bounds;
mod edit;
mod error;
mod state;
mod vocab;

pub use bounds::{Bounds, RangeSel, AGE_BOUNDS, HEIGHT_BOUNDS, INCOME_BOUNDS, RFM_BOUNDS, WAIST_BOUNDS};
pub use edit::{FilterEdit, SIXES_MIN_HEIGHT, SIXES_MIN_INCOME};
pub use error::FilterError;
pub use state::{FilterState, AGE_DEFAULT, FEMALE_HEIGHT_DEFAULT, MALE_HEIGHT_DEFAULT};
pub use vocab::{
    BodyFlag, BodyType, BroadPolitics, BroadReligion, DetailedPolitics, DetailedReligion, Education,
    Gender, Habit, PhysicalFlags, Race, ViewMode,
};
