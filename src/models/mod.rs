pub mod geo;
pub mod stop;
pub mod trip;

pub use geo::{LatLng, LatLngBounds};
pub use stop::{Itinerary, Stop};
pub use trip::{SavedTrip, TripHistory, TRIP_DATE_FORMAT};
