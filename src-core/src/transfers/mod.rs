pub mod transfers_model;
pub mod transfers_repository;
pub mod transfers_service;
pub mod transfers_traits;

pub use transfers_model::{
    parse_positive_value, parse_transfer_type, validate_transfer_relations, NewTransfer, Transfer,
    TransferFilters, TransferType, TransferUpdate,
};
pub use transfers_repository::TransferRepository;
pub use transfers_service::TransferService;
pub use transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
