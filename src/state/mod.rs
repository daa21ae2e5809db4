pub mod store;

pub use store::{spec_version, LoadOutcome, StateStore, StoredState};
