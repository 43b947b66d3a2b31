pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod csv_io;
pub mod drivers;
pub mod error;
pub mod format;
pub mod lookup;
pub mod model;
pub mod params;
pub mod report;
pub mod session;
pub mod store;
pub mod types;

pub use aggregate::{evaluate, AggregateResult, Evaluation, EvaluationOptions};
pub use error::{CalcError, CalcResult};
pub use model::InputModel;
pub use types::{CostModel, Currency, CxFormula, DriverId, Horizon};
