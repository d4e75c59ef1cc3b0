pub mod aggregator;
pub mod classifier;
pub mod projector;
pub mod rounder;
pub mod savings;
pub mod validator;

pub use projector::{IndexModel, ModelKind, NpsModel, ReturnModel};
pub use savings::{ProjectionParams, SavingsService};
