pub mod cookie;
pub mod encrypt;
