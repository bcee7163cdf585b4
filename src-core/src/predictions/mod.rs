pub mod predictions_model;
pub mod predictions_repository;
pub mod predictions_service;
pub mod predictions_traits;

pub use predictions_model::{NewPrediction, Prediction, PredictionUpdate};
pub use predictions_repository::PredictionRepository;
pub use predictions_service::PredictionService;
pub use predictions_traits::{PredictionRepositoryTrait, PredictionServiceTrait};
