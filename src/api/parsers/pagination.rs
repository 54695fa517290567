use serde_json::Value;

/// Token of the next page, if the response has one
pub fn next_page_token(data: &Value) -> Option<String> {
    extract_token(data).filter(|token| !token.is_empty())
}

fn extract_token(data: &Value) -> Option<String> {
    Some(data.get("nextPageToken")?.as_str()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_page_token() {
        assert_eq!(next_page_token(&json!({"nextPageToken": "abc"})).as_deref(), Some("abc"));
        assert_eq!(next_page_token(&json!({"nextPageToken": ""})), None);
        assert_eq!(next_page_token(&json!({"items": []})), None);
    }
}
