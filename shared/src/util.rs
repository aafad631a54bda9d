/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 获取当前 UTC 时间戳（秒）
///
/// Orders, products, users and comments carry second precision;
/// session expiry uses [`now_millis`].
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
