//! User service for business logic.
//!
//! Assembles what the site shows about a user. The logged-in user sees their account and
//! latest RP application; anyone may see the public profile of a Discord ID.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{MeDto, PublicProfileDto},
    server::{
        data::{rp_application::RpApplicationRepository, user::UserRepository},
        error::AppError,
        model::{rp_application::RpApplication, user::User},
    },
};

/// Logged-in user together with their latest application.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub latest_application: Option<RpApplication>,
}

impl UserProfile {
    pub fn into_me_dto(self, frontend_url: &str) -> MeDto {
        MeDto {
            authenticated: true,
            user: Some(self.user.into_dto(frontend_url)),
            rp_application: self
                .latest_application
                .map(RpApplication::into_summary_dto),
        }
    }
}

/// Publicly visible part of a profile.
///
/// Built from the user row, or from the latest application of someone who applied but
/// never logged in to the site.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicProfile {
    pub discord_id: u64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub linked_minecraft: Option<String>,
    pub rp_first_name: Option<String>,
    pub rp_last_name: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl PublicProfile {
    fn from_user(user: User, first_application_at: Option<DateTime<Utc>>) -> Self {
        let joined_at = match first_application_at {
            Some(applied_at) if applied_at < user.created_at => applied_at,
            _ => user.created_at,
        };

        Self {
            discord_id: user.discord_id,
            display_name: user.display_name().to_string(),
            avatar_url: user.avatar_url(),
            username: user.username,
            linked_minecraft: user.linked_minecraft,
            rp_first_name: user.rp_first_name,
            rp_last_name: user.rp_last_name,
            joined_at: Some(joined_at),
        }
    }

    fn from_application(application: RpApplication) -> Self {
        let rp_name = application.fields.rp_name.trim();
        let nickname = application.fields.nickname.trim();
        let display_name = if rp_name.is_empty() { nickname } else { rp_name };

        // First word is the first name, the rest is the last name.
        let mut words = rp_name.split_whitespace();
        let rp_first_name = words.next().map(str::to_string);
        let rp_last_name = Some(words.collect::<Vec<_>>().join(" "))
            .filter(|name| !name.is_empty());

        let id = application.discord_id.to_string();
        let suffix = &id[id.len().saturating_sub(6)..];

        Self {
            discord_id: application.discord_id,
            username: format!("user_{}", suffix),
            display_name: display_name.to_string(),
            avatar_url: None,
            linked_minecraft: Some(nickname.to_string()).filter(|n| !n.is_empty()),
            rp_first_name,
            rp_last_name,
            joined_at: Some(application.created_at),
        }
    }

    pub fn into_dto(self) -> PublicProfileDto {
        PublicProfileDto {
            id: self.discord_id.to_string(),
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            linked_minecraft: self.linked_minecraft,
            rp_first_name: self.rp_first_name,
            rp_last_name: self.rp_last_name,
            joined_at: self.joined_at,
        }
    }
}

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the profile of a user.
    ///
    /// # Returns
    /// - `Ok(Some(UserProfile))` - User exists
    /// - `Ok(None)` - No user with that Discord ID
    /// - `Err(AppError)` - Database error or undecodable row
    pub async fn get_profile(&self, discord_id: u64) -> Result<Option<UserProfile>, AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_discord_id(discord_id)
            .await?
        else {
            return Ok(None);
        };

        let latest_application = RpApplicationRepository::new(self.db)
            .find_latest_by_owner(discord_id)
            .await?;

        Ok(Some(UserProfile {
            user,
            latest_application,
        }))
    }

    /// Loads the public profile of a Discord ID.
    ///
    /// Users who never logged in but did apply get a profile derived from their latest
    /// application: the RP name (or nickname) as display name and the submission time as
    /// join date.
    ///
    /// # Returns
    /// - `Ok(PublicProfile)` - User or application found
    /// - `Err(AppError::NotFound)` - Neither a user nor an application exists
    /// - `Err(AppError)` - Database error or undecodable row
    pub async fn get_public_profile(&self, discord_id: u64) -> Result<PublicProfile, AppError> {
        let applications = RpApplicationRepository::new(self.db);

        if let Some(user) = UserRepository::new(self.db)
            .find_by_discord_id(discord_id)
            .await?
        {
            let first_application_at = applications
                .find_first_created_at_by_owner(discord_id)
                .await?;

            return Ok(PublicProfile::from_user(user, first_application_at));
        }

        applications
            .find_latest_by_owner(discord_id)
            .await?
            .map(PublicProfile::from_application)
            .ok_or_else(|| AppError::NotFound("profile not found".to_string()))
    }
}
