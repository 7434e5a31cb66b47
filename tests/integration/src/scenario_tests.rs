//! Cross-crate scenarios: config files on disk, the engine, and both store
//! implementations.

use dconf_core::{Action, ReconcileEngine, ReconcileOptions, SectionMap, load_files, parse_document};
use dconf_store::MemoryStore;
use dconf_test_utils::{DESIRED_CONFIG, EXPECTED_DIFF, LIVE_DUMP, ROOT, write_file};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const APPLY: ReconcileOptions = ReconcileOptions {
    apply: true,
    show_ignored: false,
};

/// Apply the dispatched actions to a model of the store.
fn apply_to_model(live: &mut SectionMap, actions: &[Action]) {
    for action in actions {
        match action {
            Action::Write {
                section,
                option,
                value,
            } => {
                live.entry(section.clone())
                    .or_default()
                    .insert(option.clone(), value.clone());
            }
            Action::Reset {
                section,
                option,
                superseded: false,
                ..
            } => {
                if let Some(options) = live.get_mut(section) {
                    options.remove(option);
                }
            }
            _ => {}
        }
    }
    live.retain(|_, options| !options.is_empty());
}

/// Render a model the way `dconf dump` would.
fn to_dump(live: &SectionMap) -> String {
    let mut out = String::new();
    for (section, options) in live {
        out.push_str(&format!("[{section}]\n"));
        for (option, value) in options {
            out.push_str(&format!("{option}={value}\n"));
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_reference_scenario_from_files() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);
    let desired = load_files(&[input]).unwrap();

    let store = MemoryStore::new(LIVE_DUMP);
    let engine = ReconcileEngine::new(&store, ROOT);
    let plan = engine.plan(&desired, ReconcileOptions::default()).unwrap();

    let lines: Vec<String> = plan.actions().iter().map(|a| a.to_string()).collect();
    let expected: Vec<String> = EXPECTED_DIFF
        .iter()
        .map(|line| line[2..].to_string())
        .collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_second_run_after_apply_is_a_no_op() {
    let desired = parse_document("input.ini", DESIRED_CONFIG).unwrap();
    let store = MemoryStore::new(LIVE_DUMP);
    let engine = ReconcileEngine::new(&store, ROOT);

    let plan = engine.plan(&desired, APPLY).unwrap();
    engine.execute(&plan, APPLY, |_| Ok(())).unwrap();

    let mut model = parse_document("dump", LIVE_DUMP).unwrap();
    apply_to_model(&mut model, plan.actions());

    let after = MemoryStore::new(to_dump(&model));
    let second = ReconcileEngine::new(&after, ROOT)
        .plan(&desired, APPLY)
        .unwrap();
    assert!(!second.has_changes(), "unexpected actions: {:?}", second.actions());

    // unmanaged sections survive untouched
    assert_eq!(model["ignored"]["a"], "1");
    assert_eq!(model["clear"]["keep"], "5");
    assert_eq!(model["clear/foo/bar/exclude"]["no"], "1");
    assert_eq!(model["clear/food"]["hi"], "1");
}

#[test]
fn test_later_file_can_exclude_a_subtree() {
    let dir = TempDir::new().unwrap();
    let base = write_file(dir.path(), "base.ini", "[org/app]\ntheme='dark'\n\n[org/app/plugins]\n");
    let host = write_file(dir.path(), "host.d/laptop.ini", "[-org/app/plugins/local]\n");
    let desired = load_files(&[base, host]).unwrap();

    let store = MemoryStore::new(
        "[org/app]\ntheme='dark'\n\n[org/app/plugins/local]\nenabled=true\n\n[org/app/plugins/remote]\nenabled=true\n",
    );
    let engine = ReconcileEngine::new(&store, "/");
    engine.run(&desired, APPLY, |_| Ok(())).unwrap();

    assert_eq!(store.resets(), vec!["/org/app/plugins/remote/enabled".to_string()]);
    assert!(store.writes().is_empty());
}

#[test]
fn test_unmanaged_sections_are_never_dispatched() {
    let desired = parse_document("input.ini", "[org/app]\nsize=3\n").unwrap();
    let store = MemoryStore::new("[org/other]\nsize=1\n\n[org/application]\nsize=2\n");
    let engine = ReconcileEngine::new(&store, "/");
    let options = ReconcileOptions {
        apply: true,
        show_ignored: true,
    };

    let mut rendered = Vec::new();
    engine
        .run(&desired, options, |action| {
            rendered.push(action.to_string());
            Ok(())
        })
        .unwrap();

    assert_eq!(
        rendered,
        vec!["org/app/size=3", "org/application/size=2", "org/other/size=1"]
    );
    assert_eq!(store.writes(), vec![("/org/app/size".to_string(), "3".to_string())]);
    assert!(store.resets().is_empty());
}

#[cfg(unix)]
mod dconf_program {
    use super::*;
    use dconf_store::DconfStore;
    use dconf_test_utils::FakeDconf;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_through_dconf_program() {
        let fake = FakeDconf::new(LIVE_DUMP);
        let desired = parse_document("input.ini", DESIRED_CONFIG).unwrap();
        let engine = ReconcileEngine::new(DconfStore::with_program(fake.program()), ROOT);

        let report = engine.run(&desired, APPLY, |_| Ok(())).unwrap();

        assert_eq!(report.writes, 3);
        assert_eq!(report.resets, 2);
        assert_eq!(
            fake.calls(),
            vec![
                "dump /the/root",
                "write /the/root/add/AddedKey 1",
                "reset /the/root/clear/foo/bar/blah",
                "write /the/root/overwrite/a 10",
                "reset /the/root/overwrite/b",
                "write /the/root/overwrite/new 5",
            ]
        );
    }

    #[test]
    fn test_failing_program_stops_the_run() {
        let fake = FakeDconf::new(LIVE_DUMP).failing_on("/the/root/clear/foo/bar/blah");
        let desired = parse_document("input.ini", DESIRED_CONFIG).unwrap();
        let engine = ReconcileEngine::new(DconfStore::with_program(fake.program()), ROOT);

        let err = engine.run(&desired, APPLY, |_| Ok(())).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("reset /the/root/clear/foo/bar/blah"), "{message}");
        assert!(message.contains("permission denied"), "{message}");
        assert_eq!(fake.calls().len(), 3);
    }
}
