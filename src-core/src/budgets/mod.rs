pub mod budgets_model;
pub mod budgets_repository;
pub mod budgets_service;
pub mod budgets_traits;

pub use budgets_model::{Budget, BudgetMember, BudgetUpdate, NewBudget};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::{BudgetService, NOT_OWNER_MESSAGE, NO_ACCESS_MESSAGE};
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
