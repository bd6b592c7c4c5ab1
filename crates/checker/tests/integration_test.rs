//! Integration tests over the fixture scripts in `tests/fixtures`.
//!
//! Each fixture has its own test pinning the verdict and the exact warnings.

use growsoft_lua_checker::{check_lua_syntax, respond, CheckRequest, ErrorReporter, ScriptStatus};
use pretty_assertions::assert_eq;

/// Generate a test per fixture file: either `valid` or `error = "<message>"`,
/// followed by the expected warning messages.
macro_rules! fixture_test {
    ($test_name:ident, $path:expr, valid, [$($warning:expr),* $(,)?]) => {
        #[test]
        fn $test_name() {
            let source = include_str!($path);
            let result = check_lua_syntax(source);
            assert!(result.is_valid(), "{} should be valid: {:?}", $path, result.error());
            let expected: Vec<String> = vec![$($warning.to_string()),*];
            assert_eq!(result.warning_messages(), expected);
        }
    };
    ($test_name:ident, $path:expr, error = $error:expr, [$($warning:expr),* $(,)?]) => {
        #[test]
        fn $test_name() {
            let source = include_str!($path);
            let result = check_lua_syntax(source);
            assert!(!result.is_valid(), "{} should be invalid", $path);
            assert_eq!(result.error_message().as_deref(), Some($error));
            let expected: Vec<String> = vec![$($warning.to_string()),*];
            assert_eq!(result.warning_messages(), expected);
        }
    };
}

fixture_test!(
    fixture_welcome,
    "fixtures/welcome.lua",
    valid,
    ["Line 1: Lua doesn't support increment/decrement operators"]
);

fixture_test!(
    fixture_js_habits,
    "fixtures/js_habits.lua",
    valid,
    [
        "Line 1: Semicolons are optional in Lua",
        "Line 3: Lua doesn't support increment/decrement operators",
        "Line 7: Use '==' and '~=' for equality checks in Lua",
    ]
);

fixture_test!(
    fixture_broken_table,
    "fixtures/broken_table.lua",
    error = "Unbalanced curly braces: missing }",
    []
);

fixture_test!(
    fixture_extra_paren,
    "fixtures/extra_paren.lua",
    error = "Unbalanced parentheses: extra )",
    []
);

// Anonymous callbacks and `if ... end` make a correct script fail the
// function/`end` count.
fixture_test!(
    fixture_packet_logger_trips_block_heuristic,
    "fixtures/packet_logger.lua",
    error = "Mismatched function definitions and 'end' statements",
    ["Line 1: Lua doesn't support increment/decrement operators"]
);

#[test]
fn test_fixture_statuses() {
    let cases = [
        (include_str!("fixtures/welcome.lua"), ScriptStatus::Valid),
        (include_str!("fixtures/js_habits.lua"), ScriptStatus::Valid),
        (include_str!("fixtures/broken_table.lua"), ScriptStatus::Error),
        (include_str!("fixtures/extra_paren.lua"), ScriptStatus::Error),
        (include_str!("fixtures/packet_logger.lua"), ScriptStatus::Error),
    ];
    for (source, expected) in cases {
        assert_eq!(ScriptStatus::of_content(source), expected);
    }
}

#[test]
fn test_request_round_trip_through_json() {
    let body = serde_json::json!({ "content": include_str!("fixtures/js_habits.lua") });
    let request: CheckRequest = serde_json::from_value(body).unwrap();
    let response = serde_json::to_value(respond(&request)).unwrap();

    assert_eq!(response["success"], true);
    assert_eq!(response["valid"], true);
    assert!(response.get("error").is_none());
    assert_eq!(response["warnings"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_reporter_renders_fixture() {
    let source = include_str!("fixtures/broken_table.lua");
    let result = check_lua_syntax(source);

    let mut out = Vec::new();
    ErrorReporter::new("broken_table.lua", source)
        .write_result(&result, false, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Unbalanced curly braces: missing }"));
    assert!(text.contains("broken_table.lua"));
}

#[test]
fn test_concurrent_callers_agree() {
    let source = include_str!("fixtures/js_habits.lua");
    let expected = check_lua_syntax(source);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || check_lua_syntax(source)))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
