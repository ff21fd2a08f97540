//! finance-core
//!
//! Business logic for the finance tracker: the state store and its services.
//! Depends on finance-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod category_service;
pub mod error;
pub mod resolve;
pub mod storage;
pub mod store;
pub mod time;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use error::{CoreError, CoreResult};
pub use storage::{state_warnings, MemoryStorage, StateStorage};
pub use store::FinanceStore;
pub use time::{Clock, FixedClock};
pub use transaction_service::TransactionService;
