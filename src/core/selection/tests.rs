use super::*;
use crate::packages::testing::{MockManager, call_log, calls};
use crate::ui::progress::NoProgress;
use std::io::Cursor;

fn registry(log: &crate::packages::testing::CallLog) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(MockManager::new("npm", log).with_results(&[
        ("left-pad", "1.3.0", 0.9),
        ("pad-left", "2.1.0", 0.4),
    ])));
    registry.register(Box::new(
        MockManager::new("pip", log).with_results(&[("leftpad", "0.1.0", 0.8)]),
    ));
    registry
}

fn run_session(
    registry: &BackendRegistry,
    query: &str,
    input: &str,
    yes: bool,
) -> (Result<SessionOutcome>, String) {
    let mut sink = NoProgress;
    let mut output = Vec::new();
    let result = SelectionSession::new(
        registry,
        query,
        Cursor::new(input.as_bytes().to_vec()),
        &mut output,
        &mut sink,
    )
    .assume_yes(yes)
    .run();
    (result, String::from_utf8_lossy(&output).into_owned())
}

#[test]
fn parse_selection_bounds() {
    assert!(matches!(
        parse_selection("0", 3),
        Err(PpmError::InvalidSelection(_))
    ));
    assert!(matches!(
        parse_selection("4", 3),
        Err(PpmError::InvalidSelection(_))
    ));
    assert_eq!(parse_selection("1", 3).expect("valid"), Some(1));
    assert_eq!(parse_selection(" 3\n", 3).expect("valid"), Some(3));
    assert_eq!(parse_selection("q\n", 3).expect("quit"), None);
    assert!(parse_selection("-1", 3).is_err());
    assert!(parse_selection("two", 3).is_err());
    assert!(parse_selection("", 3).is_err());
}

#[test]
fn affirmative_tokens() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative("YES"));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("n"));
    assert!(!is_affirmative("yep"));
}

#[test]
fn selecting_first_row_installs_highest_ranked() {
    let log = call_log();
    let registry = registry(&log);

    let (result, output) = run_session(&registry, "left-pad", "1\ny\n", false);

    match result.expect("session") {
        SessionOutcome::Installed(pkg) => {
            assert_eq!(pkg.name, "left-pad");
            assert_eq!(pkg.provider, "npm");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(output.contains("Found 3 packages matching 'left-pad'"));
    assert!(output.contains("Successfully installed left-pad via npm"));
    assert!(calls(&log).contains(&"npm:install:left-pad".to_string()));
}

#[test]
fn install_targets_the_provider_of_the_selection() {
    let log = call_log();
    let registry = registry(&log);

    // Ranked: left-pad (npm 0.9), leftpad (pip 0.8), pad-left (npm 0.4)
    let (result, _) = run_session(&registry, "left-pad", "2\nyes\n", false);

    assert!(matches!(result, Ok(SessionOutcome::Installed(ref p)) if p.provider == "pip"));
    let installs: Vec<_> = calls(&log)
        .into_iter()
        .filter(|c| c.contains(":install:"))
        .collect();
    assert_eq!(installs, vec!["pip:install:leftpad"]);
}

#[test]
fn quitting_at_results_cancels() {
    let log = call_log();
    let registry = registry(&log);

    let (result, _) = run_session(&registry, "left-pad", "q\n", false);
    assert_eq!(result.expect("session"), SessionOutcome::Cancelled);
    assert!(!calls(&log).iter().any(|c| c.contains(":install:")));
}

#[test]
fn out_of_range_selection_is_invalid() {
    let log = call_log();
    let registry = registry(&log);

    let (zero, _) = run_session(&registry, "left-pad", "0\n", false);
    assert!(matches!(zero, Err(PpmError::InvalidSelection(ref s)) if s == "0"));

    let (past_end, _) = run_session(&registry, "left-pad", "4\n", false);
    assert!(matches!(past_end, Err(PpmError::InvalidSelection(_))));
    assert!(!calls(&log).iter().any(|c| c.contains(":install:")));
}

#[test]
fn declining_confirmation_installs_nothing() {
    let log = call_log();
    let registry = registry(&log);

    let (result, output) = run_session(&registry, "left-pad", "1\nn\n", false);
    assert_eq!(result.expect("session"), SessionOutcome::Cancelled);
    assert!(output.contains("Package Details"));
    assert!(!calls(&log).iter().any(|c| c.contains(":install:")));
}

#[test]
fn eof_at_confirmation_counts_as_no() {
    let log = call_log();
    let registry = registry(&log);

    let (result, _) = run_session(&registry, "left-pad", "1\n", false);
    assert_eq!(result.expect("session"), SessionOutcome::Cancelled);
}

#[test]
fn assume_yes_skips_prompt() {
    let log = call_log();
    let registry = registry(&log);

    let (result, output) = run_session(&registry, "left-pad", "1\n", true);
    assert!(matches!(result, Ok(SessionOutcome::Installed(_))));
    assert!(!output.contains("[y/N]"));
}

#[test]
fn empty_results_end_with_no_matches() {
    let log = call_log();
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(MockManager::new("npm", &log)));

    let (result, output) = run_session(&registry, "zzz", "", false);
    assert_eq!(result.expect("session"), SessionOutcome::NoMatches);
    assert!(output.contains("No packages found matching 'zzz'"));
}

#[test]
fn install_failure_surfaces_backend_diagnostic() {
    let log = call_log();
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(
        MockManager::new("npm", &log)
            .with_results(&[("left-pad", "1.3.0", 0.9)])
            .failing_install(),
    ));

    let (result, output) = run_session(&registry, "left-pad", "1\ny\n", false);
    let err = result.expect_err("install fails");
    assert!(matches!(err, PpmError::InstallFailure { .. }));
    assert!(err.to_string().contains("cannot install left-pad"));
    assert!(!output.contains("Successfully installed"));
}

#[test]
fn chosen_index_is_recorded() {
    let log = call_log();
    let registry = registry(&log);
    let mut sink = NoProgress;
    let mut output = Vec::new();
    let mut session = SelectionSession::new(
        &registry,
        "left-pad",
        Cursor::new(b"3\nn\n".to_vec()),
        &mut output,
        &mut sink,
    );

    assert_eq!(session.run().expect("session"), SessionOutcome::Cancelled);
    assert_eq!(session.chosen(), Some(3));
}
