/// Context for fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Context for parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Context for cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}

/// Context for a required setting that is not configured
pub fn missing_setting(name: &str) -> String {
    format!("Missing required configuration: environment variable {} is not set", name)
}
