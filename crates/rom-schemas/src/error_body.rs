use serde_json::Value;

/// Extract a human-readable message from a backend failure body.
///
/// Formats, in priority order:
/// 1. `{ "message": "..." }`
/// 2. `{ "errors": [{ "msg": "..." }, { "message": "..." }] }`, joined with `". "`
/// 3. a bare JSON string
///
/// Returns `None` when none apply; callers supply their own fallback text.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(m) = body.get("message").and_then(Value::as_str) {
        if !m.trim().is_empty() {
            return Some(m.to_string());
        }
    }

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let parts: Vec<&str> = errors
            .iter()
            .filter_map(|e| {
                e.get("msg")
                    .and_then(Value::as_str)
                    .or_else(|| e.get("message").and_then(Value::as_str))
            })
            .collect();
        if !parts.is_empty() {
            return Some(parts.join(". "));
        }
    }

    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_field_wins() {
        let body = json!({"message": "Credenciais inválidas", "errors": [{"msg": "x"}]});
        assert_eq!(error_message(&body).as_deref(), Some("Credenciais inválidas"));
    }

    #[test]
    fn errors_array_is_joined() {
        let body = json!({"errors": [{"msg": "username too short"}, {"message": "password required"}]});
        assert_eq!(
            error_message(&body).as_deref(),
            Some("username too short. password required")
        );
    }

    #[test]
    fn bare_string_is_used() {
        assert_eq!(error_message(&json!("Forbidden")).as_deref(), Some("Forbidden"));
    }

    #[test]
    fn unknown_shape_yields_none() {
        assert_eq!(error_message(&json!({"detail": 1})), None);
        assert_eq!(error_message(&json!({"errors": []})), None);
        assert_eq!(error_message(&Value::Null), None);
    }
}
