use growsoft_lua_checker::{check_lua_syntax, CheckError, CheckResult, Imbalance, WarningKind};
use proptest::prelude::*;

/// Lines built from characters that can never move a balance, hit a keyword,
/// or raise a warning.
fn inert_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.=+*/\"']{0,40}".prop_filter("no keyword fragments", |s| {
        !s.contains("end") && !s.contains("function") && !s.contains("++") && !s.contains("===")
    })
}

fn inert_script() -> impl Strategy<Value = String> {
    proptest::collection::vec(inert_line(), 1..20).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn prop_blank_input_is_empty_script(ws in "[ \t\r\n\u{feff}]{0,30}") {
        prop_assert_eq!(
            check_lua_syntax(&ws),
            CheckResult::failed(CheckError::EmptyInput, vec![])
        );
    }

    #[test]
    fn prop_checker_is_idempotent(source in "\\PC{0,200}") {
        prop_assert_eq!(check_lua_syntax(&source), check_lua_syntax(&source));
    }

    #[test]
    fn prop_valid_iff_no_error(source in "[\\[\\](){} a-z;=\\-\n]{0,120}") {
        let result = check_lua_syntax(&source);
        prop_assert_eq!(result.is_valid(), result.error().is_none());
        if let Some(error) = result.error() {
            prop_assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn prop_bracket_imbalance_dominates(
        body in inert_script().prop_filter("non-blank", |s| !s.trim().is_empty()),
        opens in 0usize..5,
        closes in 0usize..5,
        parens in 0usize..3,
        braces in 0usize..3,
    ) {
        prop_assume!(opens != closes);
        let source = format!(
            "{}\n{}{}{}{}",
            body,
            "[".repeat(opens),
            "]".repeat(closes),
            "(".repeat(parens),
            "{".repeat(braces),
        );
        let expected = if opens > closes { Imbalance::Missing } else { Imbalance::Extra };

        let result = check_lua_syntax(&source);
        prop_assert_eq!(result.error(), Some(&CheckError::UnbalancedBrackets(expected)));
    }

    #[test]
    fn prop_balanced_and_paired_is_valid(
        body in inert_script(),
        names in proptest::collection::vec(
            "[a-z][a-z0-9_]{0,8}".prop_filter("not a keyword", |n| n != "end"),
            0..5,
        ),
    ) {
        let mut source = body;
        for name in &names {
            source.push_str(&format!("\nfunction {}(a, b)\n  return {{ a, b }}\nend", name));
        }
        prop_assume!(!source.trim().is_empty());

        let result = check_lua_syntax(&source);
        prop_assert!(result.is_valid(), "unexpected error: {:?}", result.error());
    }

    #[test]
    fn prop_warnings_never_change_verdict(
        body in inert_script(),
        noise in proptest::collection::vec(
            prop_oneof![Just("x = 1;"), Just("if a === b"), Just("i++"), Just("-- note")],
            1..6,
        ),
    ) {
        let base = format!("{}\nfunction f()\nend", body);
        let noisy = format!("{}\n{}", base, noise.join("\n"));

        let quiet = check_lua_syntax(&base);
        let loud = check_lua_syntax(&noisy);
        prop_assert_eq!(quiet.is_valid(), loud.is_valid());
        prop_assert!(loud.warnings().len() >= noise.len());
    }

    #[test]
    fn prop_equality_warning_on_its_line(prefix_lines in 0usize..10) {
        let source = format!("{}if a === b then x = 1", "\n".repeat(prefix_lines) + "x = 0\n");
        let result = check_lua_syntax(&source);
        let line = prefix_lines + 2;
        prop_assert!(result
            .warnings()
            .iter()
            .any(|w| w.line() == line && w.kind() == WarningKind::StrictEquality));
    }
}
