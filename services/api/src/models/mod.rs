//! API service models

pub mod activity;
pub mod photo;
pub mod trip;
pub mod user;

// Re-export for convenience
pub use activity::{Activity, NewActivity, UpdateActivity};
pub use photo::{NewPhoto, Photo, UpdatePhoto};
pub use trip::{NewTrip, NewTripActivity, Trip, TripDetail, UpdateTrip};
pub use user::{LoginCredentials, NewUser, UpdateUser, User, UserResponse};
