use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::UserRole;
use crate::errors::ApiError;
use crate::models::{Club, ClubDetail, CreateClub, UserResponse};
use crate::store::{ClubStore, StoreError, UserStore};

#[derive(Clone)]
pub struct ClubService {
    clubs: Arc<dyn ClubStore>,
    users: Arc<dyn UserStore>,
}

impl ClubService {
    pub fn new(clubs: Arc<dyn ClubStore>, users: Arc<dyn UserStore>) -> Self {
        Self { clubs, users }
    }

    #[instrument(skip(self, club), fields(name = %club.name))]
    pub async fn create_club(&self, mut club: CreateClub) -> Result<Club, ApiError> {
        club.name = club.name.trim().to_string();
        if club.name.is_empty() {
            return Err(ApiError::Validation("Club name is required".to_string()));
        }

        let club = self.clubs.create_club(club).await?;
        info!(club_id = club.id, "club created");
        Ok(club)
    }

    pub async fn list_clubs(&self) -> Result<Vec<Club>, ApiError> {
        Ok(self.clubs.list_clubs().await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Club>, ApiError> {
        Ok(self.clubs.find_club_by_name(name).await?)
    }

    /// The club together with the coaches whose affiliation points at it.
    pub async fn get_club(&self, id: i64) -> Result<ClubDetail, ApiError> {
        let club = self
            .clubs
            .find_club(id)
            .await?
            .ok_or(StoreError::NotFound { entity: "Club", id })?;

        let coaches = self
            .users
            .list_users(Some(id))
            .await?
            .into_iter()
            .filter(|user| user.role == UserRole::Coach)
            .map(UserResponse::from)
            .collect();

        Ok(ClubDetail { club, coaches })
    }
}
