use crate::config::app_config::AppConfig;
use crate::config::parameter;
use crate::db::{
    axredis,
    database::{self, DatabaseTrait},
};
use crate::repository::Repositories;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::Arc;

mod config;
mod db;
mod dto;
mod error;
mod handler;
mod middleware;
mod model;
mod repository;
mod response;
mod routes;
mod service;
mod state;
mod utils;

// 内存分配器
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[cfg(target_env = "msvc")]
use mimalloc::MiMalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // 参数初始化
    parameter::init();

    // 日志
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logger")
        .filename_suffix("log")
        .max_log_files(60)
        .build("log")
        .unwrap_or_else(|e| panic!("file log init failed: {}", e.to_string()));
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_log_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_timer(time::LocalTime::rfc_3339());

    let console_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(time::LocalTime::rfc_3339());
    tracing_subscriber::registry()
        .with(file_log_subscriber)
        .with(console_subscriber)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let connection = database::Database::init()
        .await
        .unwrap_or_else(|e| panic!("Database error: {}", e.to_string()));
    if parameter::has_flag("--skip_migrate") {
        tracing::info!("migrations skipped by --skip_migrate");
    } else {
        connection
            .migrate()
            .await
            .unwrap_or_else(|e| panic!("Database migrate error: {}", e.to_string()));
    }
    let mysql_pool = Arc::new(connection);

    // 初始化redis
    axredis::init_redis_pool()
        .await
        .unwrap_or_else(|err| panic!("redis init failed, error:{}", err.to_string()));
    let redis_pool = axredis::get_redis_connect_pool()
        .unwrap_or_else(|| panic!("redis pool is not initialized"));

    let app_config = AppConfig::from_env();
    let repos = Repositories::new(&mysql_pool, redis_pool);

    let host = format!("0.0.0.0:{}", parameter::get("PORT"));
    let listener = tokio::net::TcpListener::bind(&host)
        .await
        .unwrap_or_else(|e| panic!("bind {} failed: {}", host, e.to_string()));

    tracing::info!(
        "listening on {} | env: {}",
        host,
        parameter::get("APP_ENV")
    );

    axum::serve(listener, routes::root::routes(repos, &app_config))
        .await
        .unwrap_or_else(|e| panic!("Server error: {}", e.to_string()));
}
