use env_logger::Env;

/// 初始化日誌系統
///
/// 預設只輸出警告以上的訊息，避免干擾互動介面；
/// 需要更多細節時以 RUST_LOG 環境變數調整
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();
}
