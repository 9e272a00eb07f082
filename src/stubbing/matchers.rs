//! Pattern matching for argument values.
//!
//! `.with(...)` compares arguments by structural equality; this module backs
//! the looser `.matching(...)` constraint, where each expected pattern is
//! tried as a glob, then as a regex, then as an exact string.

use glob::Pattern;
use regex::Regex;
use serde_json::Value;

/// Match positional string patterns against actual argument values.
///
/// Arity must match exactly. Each pattern is tried in order as:
/// 1. **Glob**: e.g., `*.txt`, `user-*`
/// 2. **Regex**: e.g., `^v\d+$`
/// 3. **Exact match**: literal string comparison
///
/// Non-string arguments are compared against their JSON rendering, so `"42"`
/// matches the number `42`.
///
/// # Example
///
/// ```rust
/// use understudy::values_match;
/// use serde_json::json;
///
/// assert!(values_match(&["*.txt".to_string()], &[json!("notes.txt")]));
/// assert!(!values_match(&["*.txt".to_string()], &[json!("notes.rs")]));
/// ```
pub fn values_match(patterns: &[String], args: &[Value]) -> bool {
    if patterns.len() != args.len() {
        return false;
    }

    for (pattern, arg) in patterns.iter().zip(args) {
        let actual = match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        // Try glob pattern first
        if let Ok(glob) = Pattern::new(pattern) {
            if glob.matches(&actual) {
                continue;
            }
        }

        // Try regex
        if let Ok(re) = Regex::new(pattern) {
            if re.is_match(&actual) {
                continue;
            }
        }

        // Exact match fallback
        if &actual != pattern {
            return false;
        }
    }

    true
}

/// Build an argument list (`Vec<serde_json::Value>`) from literals.
///
/// # Example
///
/// ```rust,ignore
/// use understudy::args;
///
/// let list = args!["ARG", 42, true];
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$(serde_json::json!($value)),*]
    };
}

/// Build a configuration map from method names and default return values.
///
/// Entries without a value configure the method to return `null`.
///
/// # Example
///
/// ```rust,ignore
/// use understudy::methods;
///
/// let config = methods! {"query" => "RESULT", "count" => 3};
/// let recorded_only = methods! {"__construct", "close"};
/// ```
#[macro_export]
macro_rules! methods {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map: std::collections::HashMap<String, serde_json::Value> =
            std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), serde_json::json!($value));
        )*
        map
    }};
    ($($key:expr),+ $(,)?) => {{
        let mut map: std::collections::HashMap<String, serde_json::Value> =
            std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), serde_json::Value::Null);
        )+
        map
    }};
}
