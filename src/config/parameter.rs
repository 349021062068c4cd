use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use dotenv;
use once_cell::sync::OnceCell;

pub static CMD_ARGS: OnceCell<HashSet<String>> = OnceCell::new();

pub fn init() {
    // .env 可选，生产环境直接使用进程环境变量
    dotenv::dotenv().ok();
    // 给日志库设置环境变量
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug")
    }
    if std::env::var_os("APP_ENV").is_none() {
        std::env::set_var("APP_ENV", "development")
    }
    if std::env::var_os("PORT").is_none() {
        std::env::set_var("PORT", "8000")
    }

    for required in ["MASTER_DB_URL", "REDIS_URL", "JWT_SECRET"] {
        if std::env::var_os(required).is_none() {
            panic!("config -- env var `{}` is not exist ", required);
        }
    }
    // 未配置从库时读写都走主库
    if std::env::var_os("SLAVE_DB_URL").is_none() {
        std::env::set_var("SLAVE_DB_URL", get("MASTER_DB_URL"));
    }
    assert!(CMD_ARGS.set(std::env::args().collect()).is_ok());
}

/// 启动参数，例如 `--skip_migrate`
pub fn has_flag(flag: &str) -> bool {
    CMD_ARGS.get().is_some_and(|args| args.contains(flag))
}

pub fn get(parameter: &str) -> String {
    let env_parameter = std::env::var(parameter)
        .expect(&format!("{} is not defined in the environment.", parameter));
    return env_parameter;
}

/// 读取并解析环境变量，不存在时使用默认值
pub fn get_or<T>(parameter: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(parameter) {
        Ok(value) => value.parse().unwrap_or_else(|err| {
            panic!("config -- env var `{}` is invalid: {}", parameter, err)
        }),
        Err(_) => default,
    }
}
