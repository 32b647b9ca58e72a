pub mod trip_store;

pub use trip_store::{TripStore, TripStoreError};
