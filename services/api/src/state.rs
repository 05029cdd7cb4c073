//! Application state shared across handlers

use crate::{
    jwt::JwtService,
    repositories::{
        ActivityRepository, PhotoRepository, TokenRepository, TripRepository, UserRepository,
    },
    storage::PhotoStorage,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub trips: TripRepository,
    pub activities: ActivityRepository,
    pub photos: PhotoRepository,
    pub tokens: TokenRepository,
    pub jwt: JwtService,
    pub storage: PhotoStorage,
}
