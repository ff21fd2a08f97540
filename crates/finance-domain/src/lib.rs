//! finance-domain
//!
//! Pure domain models (Category, Transaction, FinanceState, Stats).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod state;
pub mod stats;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use state::*;
pub use stats::*;
pub use transaction::*;
