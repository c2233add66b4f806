pub mod contract;
pub mod error;
pub mod history;
pub mod ports;
pub mod rate;
pub mod revision_sets;
pub mod status;
pub mod submission;
pub mod util;
pub mod validation;

pub type DomainResult<T> = Result<T, error::DomainError>;
