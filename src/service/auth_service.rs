use crate::dto::user_dto::{UserLoginDto, UserProfile};
use crate::error::api_error::ApiError;
use crate::error::user_error::UserError;
use crate::model::session::TokenPair;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::repository::Repositories;
use crate::service::token_service::TokenService;
use crate::utils::encrypt;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(repos: &Repositories, token_service: &Arc<TokenService>) -> Self {
        Self {
            user_repo: Arc::clone(&repos.user_repo),
            token_service: Arc::clone(token_service),
        }
    }

    /// 昵称不存在与密码错误返回同一个错误
    pub async fn login(&self, payload: UserLoginDto) -> Result<(UserProfile, TokenPair), ApiError> {
        let user = self.user_repo.find_by_nickname(&payload.nickname).await?;
        let verified = match &user {
            Some(user) => {
                encrypt::spawn_verify_password(payload.password.clone(), user.password.clone())
                    .await
            }
            None => false,
        };
        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::info!("login - rejected nickname:{}", payload.nickname);
                return Err(UserError::InvalidCredentials.into());
            }
        };
        let tokens = self.token_service.issue_pair(user.id, &user.nickname)?;
        tracing::info!("login - user:{}", user.id);
        Ok((UserProfile::from_user(&user), tokens))
    }

    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), ApiError> {
        if let Some(token) = refresh_token {
            self.token_service.revoke_refresh(token).await?;
        }
        Ok(())
    }
}
