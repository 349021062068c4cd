use bcrypt::BcryptError;
use std::io;

// 计算密码哈希
pub fn hash_password(pwd: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(pwd, cost)
}

// 验证密码，哈希格式错误视为不匹配
pub fn verify_password(pwd: &str, hashed: &str) -> bool {
    bcrypt::verify(pwd, hashed).unwrap_or_else(|err| {
        tracing::error!("verify_password - malformed hash, error:{}", err.to_string());
        false
    })
}

// bcrypt 为 CPU 密集计算，放到阻塞线程池避免占住 async worker
pub async fn spawn_hash_password(pwd: String, cost: u32) -> Result<String, BcryptError> {
    tokio::task::spawn_blocking(move || hash_password(&pwd, cost))
        .await
        .unwrap_or_else(|err| Err(BcryptError::Io(io::Error::new(io::ErrorKind::Other, err))))
}

pub async fn spawn_verify_password(pwd: String, hashed: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&pwd, &hashed))
        .await
        .unwrap_or_else(|err| {
            tracing::error!("verify_password - blocking task failed, error:{}", err.to_string());
            false
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_only_with_original() {
        let hashed = hash_password("password123", 4).unwrap();
        assert_ne!(hashed, "password123");
        assert!(verify_password("password123", &hashed));
        assert!(!verify_password("password124", &hashed));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("password123", "not-a-bcrypt-hash"));
    }

    #[tokio::test]
    async fn blocking_pool_hash_and_verify() {
        let hashed = spawn_hash_password("password123".to_string(), 4)
            .await
            .unwrap();
        assert!(spawn_verify_password("password123".to_string(), hashed.clone()).await);
        assert!(!spawn_verify_password("password124".to_string(), hashed).await);
        assert!(!spawn_verify_password("password123".to_string(), "bogus".to_string()).await);
    }
}
