//! Domain core of the hostel management service: the record model, the
//! `RecordStore` collaborator trait, the occupancy ledger and the room
//! assignment workflow, together with an in-memory store that doubles as
//! reference semantics and test double.

pub mod assignment;
pub mod complaints;
pub mod error;
pub mod memory;
pub mod models;
pub mod occupancy;
pub mod store;

pub use error::{LedgerError, StoreError};
pub use store::RecordStore;
