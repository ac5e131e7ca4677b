//! End-to-end tests for fix path resolution against the adservice manifest.
//!
//! `tests/fixtures/adservice.yaml` holds a Deployment (document 0) and a
//! Service (document 1).

use std::path::PathBuf;

use fixpath_locator::locator::fixpath::to_query_expression;
use fixpath_locator::{FixPathLocationResolver, LocateError, Location};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn adservice() -> FixPathLocationResolver {
    FixPathLocationResolver::new(fixture("adservice.yaml")).expect("fixture should load")
}

const DEPLOYMENT_EXPECTATIONS: &[(&str, Location)] = &[
    (
        "spec.template.spec.containers[0].securityContext.readOnlyRootFilesystem=true",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.runAsNonRoot=true",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.allowPrivilegeEscalation=false",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.capabilities.drop=NET_RAW",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.seLinuxOptions=YOUR_VALUE",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.seccompProfile=YOUR_VALUE",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.securityContext.runAsNonRoot=true",
        Location { line: 28, column: 7 },
    ),
    (
        "spec.template.spec.securityContext.allowPrivilegeEscalation=false",
        Location { line: 28, column: 7 },
    ),
    (
        "spec.template.spec.containers[0].securityContext.seccompProfile.type=RuntimeDefault",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].image",
        Location { line: 32, column: 16 },
    ),
    (
        "spec.template.spec.containers[0].seccompProfile=YOUR_VALUE",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].seLinuxOptions=YOUR_VALUE",
        Location { line: 31, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].capabilities.drop=YOUR_VALUE",
        Location { line: 31, column: 9 },
    ),
    (
        "metadata.namespace=YOUR_NAMESPACE",
        Location { line: 18, column: 3 },
    ),
    ("metadata.labels=YOUR_VALUE", Location { line: 18, column: 3 }),
    (
        "spec.template.metadata.labels=YOUR_VALUE",
        Location { line: 26, column: 9 },
    ),
    (
        "spec.template.spec.containers[0].resources.limits.cpu=YOUR_VALUE",
        Location { line: 49, column: 18 },
    ),
];

#[test]
fn test_fixture_has_two_documents() {
    assert_eq!(adservice().document_count(), 2);
}

#[test]
fn test_resolve_deployment_fix_paths() {
    let resolver = adservice();

    for (fix_path, expected) in DEPLOYMENT_EXPECTATIONS {
        let location = resolver
            .resolve_location(fix_path, 0)
            .unwrap_or_else(|err| panic!("fixPath {}: unexpected error {}", fix_path, err));
        assert_eq!(
            location, *expected,
            "fixPath {}, expected {}, actual {}",
            fix_path, expected, location
        );
    }
}

#[test]
fn test_resolve_service_fix_paths() {
    let resolver = adservice();

    for fix_path in ["metadata.namespace=YOUR_NAMESPACE", "metadata.labels=YOUR_VALUE"] {
        let location = resolver.resolve_location(fix_path, 1).unwrap();
        assert_eq!(location, Location::new(65, 3), "fixPath {}", fix_path);
    }
}

#[test]
fn test_document_index_out_of_range() {
    let resolver = adservice();

    for (fix_path, _) in DEPLOYMENT_EXPECTATIONS {
        let err = resolver.resolve_location(fix_path, 100000).unwrap_err();
        assert!(err
            .to_string()
            .contains("node index [100000] out of range "));
        assert!(matches!(
            err,
            LocateError::IndexOutOfRange {
                index: 100000,
                len: 2
            }
        ));
    }
}

#[test]
fn test_last_document_index_is_valid() {
    let resolver = adservice();
    let last = resolver.document_count() - 1;

    assert!(resolver.resolve_location("spec.type", last).is_ok());
    let err = resolver
        .resolve_location("spec.type", resolver.document_count())
        .unwrap_err();
    assert_eq!(err.to_string(), "node index [2] out of range [2]");
}

#[test]
fn test_invalid_input() {
    let err = adservice()
        .resolve_location("some invalid string as an input", 0)
        .unwrap_err();
    assert!(err.to_string().contains("invalid input"));
    assert!(matches!(err, LocateError::Query(_)));
}

#[test]
fn test_empty_fix_path() {
    let location = adservice().resolve_location("", 0).unwrap();
    assert_eq!(location, Location::default());
}

#[test]
fn test_unknown_root_key_walks_off() {
    let location = adservice()
        .resolve_location("status.conditions[0].type=Ready", 0)
        .unwrap();
    assert_eq!(location, Location::new(0, 0));
}

#[test]
fn test_value_suffix_never_changes_location() {
    let resolver = adservice();

    for (fix_path, _) in DEPLOYMENT_EXPECTATIONS {
        let path_only = fix_path.split('=').next().unwrap();
        assert_eq!(
            resolver.resolve_location(fix_path, 0).unwrap(),
            resolver.resolve_location(path_only, 0).unwrap(),
            "fixPath {}",
            fix_path
        );
    }
}

#[test]
fn test_locations_are_never_negative_and_paths_translate_once() {
    let resolver = adservice();

    for (fix_path, _) in DEPLOYMENT_EXPECTATIONS {
        let expression = to_query_expression(fix_path);
        assert!(expression.starts_with('.'));
        assert!(!expression.contains('='));

        let location = resolver.resolve_location(fix_path, 0).unwrap();
        assert!(location.line >= 1 && location.column >= 1);
    }
}

#[test]
fn test_service_fields() {
    let resolver = adservice();

    assert_eq!(
        resolver.resolve_location("spec.type", 1).unwrap(),
        Location::new(67, 9)
    );
    assert_eq!(
        resolver.resolve_location("spec.ports[0].targetPort", 1).unwrap(),
        Location::new(73, 17)
    );
    assert_eq!(
        resolver.resolve_location("spec.ports[1].name=http", 1).unwrap(),
        Location::new(67, 3)
    );
}

#[test]
fn test_sequences_start_at_first_entry() {
    let resolver = adservice();

    let cases = [
        ("spec.template.spec.containers", 0, Location::new(31, 7)),
        ("spec.template.spec.containers[0].env", 0, Location::new(36, 9)),
        ("spec.template.spec.containers[0].ports.protocol=TCP", 0, Location::new(34, 9)),
        ("spec.template.spec.containers.foo", 0, Location::new(31, 7)),
        ("spec.ports", 1, Location::new(71, 3)),
    ];

    for (fix_path, document, expected) in cases {
        assert_eq!(
            resolver.resolve_location(fix_path, document).unwrap(),
            expected,
            "fixPath {}",
            fix_path
        );
    }
}

#[test]
fn test_flow_sequence_items() {
    let resolver = adservice();
    let location = resolver
        .resolve_location(
            "spec.template.spec.containers[0].readinessProbe.exec.command[1]",
            0,
        )
        .unwrap();
    assert_eq!(location, Location::new(55, 49));
}

#[test]
fn test_resolve_first_uses_file_start_default() {
    let resolver = adservice();

    assert_eq!(
        resolver.resolve_first(&["spec.template.spec.containers[0].image"], 0),
        Location::new(32, 16)
    );
    assert_eq!(
        resolver.resolve_first(&["status.replicas"], 0),
        Location::FILE_START
    );
}

#[test]
fn test_missing_file_fails() {
    let result = FixPathLocationResolver::new(fixture("adservice_missing.yaml"));
    assert!(matches!(result, Err(LocateError::Load(_))));
}

#[test]
fn test_invalid_yaml_fails() {
    let result = FixPathLocationResolver::new(fixture("invalid.yaml"));
    assert!(matches!(result, Err(LocateError::Load(_))));
}

#[test]
fn test_resolver_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FixPathLocationResolver>();

    let resolver = adservice();
    std::thread::scope(|scope| {
        let handles: Vec<_> = DEPLOYMENT_EXPECTATIONS
            .iter()
            .map(|(fix_path, expected)| {
                let resolver = &resolver;
                scope.spawn(move || {
                    assert_eq!(resolver.resolve_location(fix_path, 0).unwrap(), *expected);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    });
}
