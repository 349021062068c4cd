use crate::dto::user_dto::{UserProfile, UserRegisterDto, UserUpdateDto};
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::user_error::UserError;
use crate::repository::score_repository::ScoreRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::repository::Repositories;
use crate::utils::encrypt;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    score_repo: Arc<dyn ScoreRepositoryTrait>,
    password_hash_cost: u32,
}

impl UserService {
    pub fn new(repos: &Repositories, password_hash_cost: u32) -> Self {
        Self {
            user_repo: Arc::clone(&repos.user_repo),
            score_repo: Arc::clone(&repos.score_repo),
            password_hash_cost,
        }
    }

    pub async fn create_user(&self, payload: UserRegisterDto) -> Result<UserProfile, ApiError> {
        if self
            .user_repo
            .find_by_nickname(&payload.nickname)
            .await?
            .is_some()
        {
            return Err(UserError::UserAlreadyExists.into());
        }
        let password_hash = encrypt::spawn_hash_password(payload.password, self.password_hash_cost)
            .await
            .map_err(|err| DbError::SomethingWentWrong(err.to_string()))?;
        let email = payload.email.unwrap_or_default();

        let user = match self
            .user_repo
            .create_user(&payload.nickname, &email, &password_hash)
            .await
        {
            Ok(user) => user,
            // 并发注册同名时由唯一索引兜底
            Err(DbError::UniqueConstraintViolation(_)) => Err(UserError::UserAlreadyExists)?,
            Err(err) => Err(err)?,
        };
        tracing::info!("create_user - id:{} | nickname:{}", user.id, user.nickname);
        Ok(UserProfile::from_user(&user))
    }

    /// 资料附带成绩汇总
    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile, ApiError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;
        let stats = self.score_repo.user_stats(user_id).await?;
        Ok(UserProfile::from_user(&user).with_stats(stats))
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        payload: UserUpdateDto,
    ) -> Result<UserProfile, ApiError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;
        let nickname = payload.nickname.unwrap_or(user.nickname);
        let email = payload.email.unwrap_or(user.email);

        let updated = match self
            .user_repo
            .update_profile(user_id, &nickname, &email)
            .await
        {
            Ok(user) => user,
            Err(DbError::UniqueConstraintViolation(_)) => Err(UserError::UserAlreadyExists)?,
            Err(err) => Err(err)?,
        };
        let stats = self.score_repo.user_stats(user_id).await?;
        Ok(UserProfile::from_user(&updated).with_stats(stats))
    }

    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, ApiError> {
        let users = self.user_repo.list_by_high_score().await?;
        Ok(users.iter().map(UserProfile::from_user).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{User, UserStats};
    use crate::repository::memory_repository::MemoryStore;
    use crate::repository::score_repository::MockScoreRepositoryTrait;
    use crate::repository::user_repository::MockUserRepositoryTrait;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn register_dto(nickname: &str) -> UserRegisterDto {
        UserRegisterDto {
            nickname: nickname.to_string(),
            email: Some(format!("{nickname}@example.com")),
            password: "password123".to_string(),
            password_confirm: "password123".to_string(),
        }
    }

    fn mocked_service(
        user_repo: MockUserRepositoryTrait,
        score_repo: MockScoreRepositoryTrait,
    ) -> UserService {
        let store = MemoryStore::new();
        let mut repos = store.repositories();
        repos.user_repo = Arc::new(user_repo);
        repos.score_repo = Arc::new(score_repo);
        UserService::new(&repos, 4)
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let store = MemoryStore::new();
        let service = UserService::new(&store.repositories(), 4);
        let profile = service.create_user(register_dto("alice")).await.unwrap();
        assert_eq!(profile.nickname, "alice");
        assert!(profile.stats.is_none());

        let stored = store.find_by_nickname("alice").await.unwrap().unwrap();
        assert_ne!(stored.password, "password123");
        assert!(encrypt::verify_password("password123", &stored.password));
    }

    #[tokio::test]
    async fn duplicate_nickname_is_rejected() {
        let store = MemoryStore::new();
        let service = UserService::new(&store.repositories(), 4);
        service.create_user(register_dto("alice")).await.unwrap();
        let err = service.create_user(register_dto("alice")).await.unwrap_err();
        assert!(matches!(err, ApiError::UserError(UserError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn unique_index_race_maps_to_user_exists() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_find_by_nickname().returning(|_| Ok(None));
        user_repo
            .expect_create_user()
            .returning(|_, _, _| Err(DbError::UniqueConstraintViolation("dup".to_string())));
        let service = mocked_service(user_repo, MockScoreRepositoryTrait::new());
        let err = service.create_user(register_dto("alice")).await.unwrap_err();
        assert!(matches!(err, ApiError::UserError(UserError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn profile_stats_default_to_zero() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_find_by_id().with(eq(3)).returning(|id| {
            Ok(Some(User {
                id,
                nickname: "bob".to_string(),
                email: String::new(),
                password: String::new(),
                high_score: 0,
                created_at: Utc::now(),
            }))
        });
        let mut score_repo = MockScoreRepositoryTrait::new();
        score_repo
            .expect_user_stats()
            .with(eq(3))
            .returning(|_| Ok(UserStats::default()));
        let service = mocked_service(user_repo, score_repo);

        let profile = service.get_profile(3).await.unwrap();
        let stats = profile.stats.unwrap();
        assert_eq!(stats.perfect_count, 0);
        assert_eq!(stats.highest_score, 0);
    }

    #[tokio::test]
    async fn unknown_user_profile_is_not_found() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_find_by_id().returning(|_| Ok(None));
        let service = mocked_service(user_repo, MockScoreRepositoryTrait::new());
        let err = service.get_profile(99).await.unwrap_err();
        assert!(matches!(err, ApiError::UserError(UserError::UserNotFound)));
    }

    #[tokio::test]
    async fn update_profile_keeps_unspecified_fields() {
        let store = MemoryStore::new();
        let service = UserService::new(&store.repositories(), 4);
        let alice = service.create_user(register_dto("alice")).await.unwrap();
        service.create_user(register_dto("bob")).await.unwrap();

        let updated = service
            .update_profile(
                alice.id,
                UserUpdateDto {
                    nickname: Some("alicia".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.nickname, "alicia");
        assert_eq!(updated.email, "alice@example.com");

        let err = service
            .update_profile(
                alice.id,
                UserUpdateDto {
                    nickname: Some("bob".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UserError(UserError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn profiles_are_listed_by_high_score() {
        let store = MemoryStore::new();
        store.seed_user("low", 10);
        store.seed_user("high", 900);
        store.seed_user("mid", 300);
        let service = UserService::new(&store.repositories(), 4);
        let names: Vec<String> = service
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.nickname)
            .collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }
}
