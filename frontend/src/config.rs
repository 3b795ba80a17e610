pub struct Config;

impl Config {
    pub fn api_base_url() -> String {
        // Trunk proxies /api/ in development and nginx does in production,
        // so relative URLs work in both.
        "".to_string()
    }

    /// Upper bound on phases created in one batch
    pub fn max_phases_per_batch() -> usize {
        6
    }

    /// How long error toasts stay up, in milliseconds
    pub fn error_toast_duration_ms() -> u32 {
        8000
    }
}
