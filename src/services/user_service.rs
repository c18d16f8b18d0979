//! User accounts and their preference profiles.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::Result;
use crate::models::user::{PreferenceProfile, RegisterRequest, User};

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account. Returns `false` when the username is taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<bool> {
        if self.find_by_username(&request.username).await?.is_some() {
            return Ok(false);
        }

        let hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO user (username, password, email, avatar, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.username)
        .bind(&hash)
        .bind(&request.email)
        .bind(&request.avatar)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        log::info!("registered user {}", request.username);
        Ok(true)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check credentials. The returned user has its password hash blanked
    /// so it can be serialized straight into the response.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(mut user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        if !bcrypt::verify(password, &user.password).unwrap_or(false) {
            return Ok(None);
        }

        user.password.clear();
        Ok(Some(user))
    }

    /// Load a user's preference profile.
    ///
    /// Missing rows and rows whose stored JSON no longer parses both read
    /// as the empty profile; bad data is logged, not surfaced.
    pub async fn preferences(&self, user_id: i64) -> Result<PreferenceProfile> {
        let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT preference, travel_style FROM user_preference WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((encoded, travel_style)) = row else {
            return Ok(PreferenceProfile::default());
        };

        let preferences = match encoded {
            Some(json) => match serde_json::from_str(&json) {
                Ok(list) => list,
                Err(err) => {
                    log::warn!("user {} has unreadable stored preferences: {}", user_id, err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(PreferenceProfile { preferences, travel_style })
    }

    /// Replace a user's preference profile. The old row (if any) and the
    /// new one are swapped in a single transaction, so readers never see
    /// a user with zero or two profiles.
    pub async fn save_preferences(
        &self,
        user_id: i64,
        preferences: &[String],
        travel_style: Option<&str>,
    ) -> Result<()> {
        let encoded = serde_json::to_string(preferences)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_preference WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO user_preference (user_id, preference, travel_style, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&encoded)
        .bind(travel_style)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::initialize_database(&pool).await.unwrap();
        pool
    }

    fn register_request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: Some(format!("{username}@example.com")),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let service = UserService::new(test_pool().await);

        assert!(service.register(&register_request("alice", "s3cret")).await.unwrap());

        let user = service.login("alice", "s3cret").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "");
    }

    #[tokio::test]
    async fn passwords_are_stored_as_bcrypt_hashes() {
        let service = UserService::new(test_pool().await);

        service.register(&register_request("alice", "s3cret")).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password FROM user WHERE username = 'alice'")
            .fetch_one(&service.pool)
            .await
            .unwrap();

        assert_ne!(stored, "s3cret");
        assert!(stored.starts_with("$2"));
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let service = UserService::new(test_pool().await);

        service.register(&register_request("alice", "s3cret")).await.unwrap();

        assert!(service.login("alice", "wrong").await.unwrap().is_none());
        assert!(service.login("nobody", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_usernames_are_refused() {
        let service = UserService::new(test_pool().await);

        assert!(service.register(&register_request("alice", "one")).await.unwrap());
        assert!(!service.register(&register_request("alice", "two")).await.unwrap());
    }

    #[tokio::test]
    async fn saving_preferences_replaces_the_previous_profile() {
        let service = UserService::new(test_pool().await);

        service.save_preferences(9, &["food".to_string()], Some("budget")).await.unwrap();
        service
            .save_preferences(9, &["art".to_string(), "history".to_string()], Some("luxury"))
            .await
            .unwrap();

        let profile = service.preferences(9).await.unwrap();
        assert_eq!(profile.preferences, vec!["art", "history"]);
        assert_eq!(profile.travel_style.as_deref(), Some("luxury"));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_preference WHERE user_id = 9")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn unknown_users_read_as_the_empty_profile() {
        let service = UserService::new(test_pool().await);

        let profile = service.preferences(404).await.unwrap();

        assert!(profile.preferences.is_empty());
        assert!(profile.travel_style.is_none());
    }

    #[tokio::test]
    async fn unreadable_stored_preferences_read_as_empty() {
        let service = UserService::new(test_pool().await);

        sqlx::query(
            "INSERT INTO user_preference (user_id, preference, travel_style, created_at) \
             VALUES (9, 'not-json', 'luxury', '2025-01-01T00:00:00Z')",
        )
        .execute(&service.pool)
        .await
        .unwrap();

        let profile = service.preferences(9).await.unwrap();

        assert!(profile.preferences.is_empty());
        assert_eq!(profile.travel_style.as_deref(), Some("luxury"));
    }
}
