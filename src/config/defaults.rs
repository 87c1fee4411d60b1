use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "brainstorm.yaml";

pub fn default_session_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("brainstorm-sessions"),
        None => PathBuf::from("brainstorm-sessions"),
    }
}

pub fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

pub fn default_claude_binary() -> PathBuf {
    // Check common install location first
    if let Some(home) = std::env::var_os("HOME") {
        let local_path = PathBuf::from(home).join(".claude/local/claude");
        if local_path.exists() {
            return local_path;
        }
    }
    // Fall back to PATH lookup
    PathBuf::from("claude")
}

pub fn default_timeout_sec() -> u64 {
    300 // 5 minutes
}

pub fn default_launch_delay_ms() -> u64 {
    0
}

pub fn default_explore_concurrency() -> usize {
    5
}

pub fn default_validate_concurrency() -> usize {
    4
}

pub fn default_assess_concurrency() -> usize {
    3
}
