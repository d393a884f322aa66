//! Result interpretation (verb module)
//!
//! Turns executor rows, or the simulation model when there is no executor,
//! into percentage/population estimates for the gauge.

mod estimate;
mod evaluate;
mod live;
mod simulate;

pub use estimate::{format_population, Estimate, EstimateMode, GaugeState, Reading, Scarcity};
pub use evaluate::{Backend, Interpreter};
pub use live::{interpret_rows, Calibration};
pub use simulate::{simulate, simulated_probability};
