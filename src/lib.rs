pub mod cli;
pub mod config;
pub mod ensemble;
pub mod features;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod schema;
pub mod signals;
pub mod verdict;

pub use ensemble::{EnsembleVerdict, Label, ModelScore};
pub use normalize::NormalizedUrl;
pub use registry::ModelRegistry;
pub use signals::SignalReport;
pub use verdict::FinalVerdict;
