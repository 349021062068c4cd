//! 运行期配置
//!
use super::parameter;

/// 访问令牌默认有效期 2 小时
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;
/// 刷新令牌默认有效期 7 天
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_LANE_COUNT: i32 = 4;
pub const DEFAULT_LEADERBOARD_SIZE: i64 = 10;

#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

#[derive(Clone, Debug)]
pub struct CookieConfig {
    /// 仅生产环境开启 Secure
    pub secure: bool,
    /// cookie 的 Max-Age，与刷新令牌有效期一致
    pub max_age_secs: i64,
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub lane_count: i32,
    pub leaderboard_size: i64,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub token: TokenConfig,
    pub cookie: CookieConfig,
    pub chart: ChartConfig,
    /// bcrypt cost
    pub password_hash_cost: u32,
}

impl AppConfig {
    /// 需要先调用 `parameter::init`
    pub fn from_env() -> Self {
        let refresh_token_ttl_secs =
            parameter::get_or("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS);
        Self {
            token: TokenConfig {
                secret: parameter::get("JWT_SECRET"),
                access_token_ttl_secs: parameter::get_or(
                    "ACCESS_TOKEN_TTL_SECS",
                    DEFAULT_ACCESS_TOKEN_TTL_SECS,
                ),
                refresh_token_ttl_secs,
            },
            cookie: CookieConfig {
                secure: parameter::get("APP_ENV") == "production",
                max_age_secs: refresh_token_ttl_secs,
            },
            chart: ChartConfig {
                lane_count: parameter::get_or("LANE_COUNT", DEFAULT_LANE_COUNT),
                leaderboard_size: parameter::get_or("LEADERBOARD_SIZE", DEFAULT_LEADERBOARD_SIZE),
            },
            password_hash_cost: parameter::get_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
        }
    }

    #[cfg(test)]
    pub fn for_test() -> Self {
        Self {
            token: TokenConfig {
                secret: "test-secret-for-rhythm-server".to_string(),
                access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
                refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            },
            cookie: CookieConfig {
                secure: false,
                max_age_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            },
            chart: ChartConfig {
                lane_count: DEFAULT_LANE_COUNT,
                leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            },
            // bcrypt 允许的最小 cost，测试中避免过慢
            password_hash_cost: 4,
        }
    }
}
