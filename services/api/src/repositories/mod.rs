//! Repositories for database operations
//!
//! One repository per entity, each a thin `Clone` handle over the shared
//! connection pool.

pub mod activity;
pub mod photo;
pub mod token;
pub mod trip;
pub mod user;

pub use activity::ActivityRepository;
pub use photo::PhotoRepository;
pub use token::TokenRepository;
pub use trip::TripRepository;
pub use user::UserRepository;
