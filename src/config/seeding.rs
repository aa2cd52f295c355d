use anyhow::Result;

use crate::auth::UserRole;
use crate::config::AdminAccount;
use crate::models::{CreateClub, CreateUser};
use crate::services::{ClubService, UserService};

/// Demo clubs created when `SEED_DEMO_DATA` is enabled.
pub const DEMO_CLUBS: &[&str] = &[
    "Троян Волей",
    "Вотев Враца",
    "Олимпиец Плевен",
    "Славена Никован",
    "Владимир Картаров",
    "Петър Игнатов",
    "Анатоли Пенев",
    "Дариа Георгиева",
];

pub const DEMO_COACHES_PER_CLUB: usize = 2;
pub const DEMO_COACH_PASSWORD: &str = "Coach#123456";

/// Email of the `index`-th demo coach (1-based) of a club.
pub fn demo_coach_email(club: &str, index: usize) -> String {
    format!("{}_coach{index}@test.bg", club.to_lowercase().replace(' ', "_"))
}

pub struct DatabaseSeeder {
    users: UserService,
    clubs: ClubService,
}

impl DatabaseSeeder {
    pub fn new(users: UserService, clubs: ClubService) -> Self {
        Self { users, clubs }
    }

    /// Create the configured admin and, optionally, the demo data.
    ///
    /// Safe to run on every start: records that already exist are skipped.
    pub async fn seed_all(&self, admin: Option<&AdminAccount>, demo_data: bool) -> Result<()> {
        tracing::info!("Starting database seeding...");

        if let Some(admin) = admin {
            self.seed_admin(admin).await?;
        }
        if demo_data {
            self.seed_demo_clubs().await?;
        }

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_admin(&self, admin: &AdminAccount) -> Result<()> {
        if self.users.find_by_email(&admin.email).await?.is_some() {
            return Ok(());
        }

        let user = self
            .users
            .register(CreateUser {
                email: admin.email.clone(),
                name: admin.name.clone(),
                password: admin.password.clone(),
                role: UserRole::PlatformAdmin,
                club_id: None,
            })
            .await?;
        tracing::info!(user_id = user.id, "Created platform admin");
        Ok(())
    }

    async fn seed_demo_clubs(&self) -> Result<()> {
        for &name in DEMO_CLUBS {
            let club = match self.clubs.find_by_name(name).await? {
                Some(club) => club,
                None => {
                    self.clubs
                        .create_club(CreateClub {
                            name: name.to_string(),
                            country: Some("Bulgaria".to_string()),
                            ..CreateClub::default()
                        })
                        .await?
                }
            };

            for index in 1..=DEMO_COACHES_PER_CLUB {
                let email = demo_coach_email(name, index);
                if self.users.find_by_email(&email).await?.is_some() {
                    continue;
                }

                self.users
                    .register(CreateUser {
                        email,
                        name: format!("Треньор {index} - {name}"),
                        password: DEMO_COACH_PASSWORD.to_string(),
                        role: UserRole::Coach,
                        club_id: Some(club.id),
                    })
                    .await?;
            }
            tracing::info!(club = %name, "Seeded demo club");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PasswordHasher;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn seeder() -> (DatabaseSeeder, UserService, ClubService) {
        let store = Arc::new(InMemoryStore::new());
        let users = UserService::new(store.clone(), store.clone(), PasswordHasher::new(4));
        let clubs = ClubService::new(store.clone(), store);
        (DatabaseSeeder::new(users.clone(), clubs.clone()), users, clubs)
    }

    #[test]
    fn test_demo_coach_email() {
        assert_eq!(demo_coach_email("Троян Волей", 1), "троян_волей_coach1@test.bg");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let (seeder, users, clubs) = seeder();
        let admin = AdminAccount {
            email: "root@volley.bg".to_string(),
            password: "Admin#2024".to_string(),
            name: "Root".to_string(),
        };

        seeder.seed_all(Some(&admin), true).await.unwrap();
        seeder.seed_all(Some(&admin), true).await.unwrap();

        assert_eq!(clubs.list_clubs().await.unwrap().len(), DEMO_CLUBS.len());
        let all = users.list_users(None).await.unwrap();
        assert_eq!(all.len(), 1 + DEMO_CLUBS.len() * DEMO_COACHES_PER_CLUB);
        assert_eq!(
            all.iter().filter(|u| u.role == UserRole::PlatformAdmin).count(),
            1
        );

        let club = clubs.find_by_name("Вотев Враца").await.unwrap().unwrap();
        assert_eq!(clubs.get_club(club.id).await.unwrap().coaches.len(), 2);
    }
}
