// src/config/consts.rs

// Metric source
pub const SEARCH_URL: &str = "https://ecshweb.pchome.com.tw/search/v3.3/all/results";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const ACCEPT_LANGUAGE: &str = "zh-TW,zh;q=0.9";
pub const TIMEOUT_SECS: u64 = 15;
pub const RETRIES: u32 = 3;
pub const BACKOFF_MS: u64 = 1_000;
pub const RETRY_STATUSES: &[u16] = &[429, 500, 502, 503, 504];
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Output layout
pub const DEFAULT_OUT_DIR: &str = "data";
pub const HISTORY_FILE: &str = "daily.csv";
pub const SNAPSHOT_PREFIX: &str = "pchome_keywords";
pub const REPORT_PREFIX: &str = "top_risers";
pub const LOG_PREFIX: &str = "log";

// Inputs
pub const KEYWORDS_FILE: &str = "keywords.txt";
pub const CONFIG_FILE: &str = "kw_trends.conf";

// Logical day is taken at this offset (Taipei)
pub const UTC_OFFSET_HOURS: i8 = 8;

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "洋裝", "連身裙", "牛仔褲", "短裙", "雪紡",
    "針織衫", "襯衫", "西裝外套", "風衣", "高腰褲",
];
