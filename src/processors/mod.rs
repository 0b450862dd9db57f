pub mod pivot;
pub mod trainer;

pub use pivot::ObservationPivot;
pub use trainer::{EvalReport, ModelTrainer, TrainingOutcome};
