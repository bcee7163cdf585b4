pub mod periods_model;
pub mod periods_repository;
pub mod periods_service;
pub mod periods_traits;

pub use periods_model::{
    status_choices, NewPeriod, Period, PeriodStatus, PeriodUpdate, PeriodWithSums, StatusChoice,
};
pub use periods_repository::PeriodRepository;
pub use periods_service::PeriodService;
pub use periods_traits::{PeriodRepositoryTrait, PeriodServiceTrait};
