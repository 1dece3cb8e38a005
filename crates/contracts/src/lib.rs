//! Employment contracts: lifecycle status, extensions and expiry windows.

pub mod contract;

pub use contract::{
    Contract, ContractStatus, ContractType, NewContract, EXPIRY_WINDOW_DAYS,
};
