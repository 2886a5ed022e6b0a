//! Integration tests for the merge pipeline, driven through the library API
//! with real files on disk.
//!
//! ## Test Coverage
//!
//! These integration tests verify:
//! - The full layout of a merged sample project
//! - Scoped merges from explicit roots
//! - Front files, placeholders and template prefixes
//! - Cycle, front-file and unresolved-include failures

mod common;

use common::prelude::*;
use header_merger::config;
use header_merger::error::Error;
use header_merger::phases::orchestrator;

const BASE_CONFIG: &str = r#"
sources:
  - glob: "src/*"
markers:
  start: ["// merge-start"]
  end: ["// merge-end"]
"#;

fn sample_with(extra_yaml: &str) -> TestFixture {
    TestFixture::new()
        .with_sample_project()
        .with_config(&format!("{}{}", BASE_CONFIG, extra_yaml))
}

#[test]
fn test_merge_sample_project() {
    let fixture = TestFixture::new().with_sample_project();
    let config = config::from_file(fixture.config_path()).unwrap();
    let output = fixture.path().join("dist/amalgamated.cpp");

    let result = orchestrator::execute_merge(&config, Some(&output)).unwrap();

    assert_eq!(result.plan.files, vec!["base.h", "list.h", "list.cpp"]);
    assert_eq!(result.plan.headers, vec!["base.h", "list.h"]);
    assert_eq!(result.plan.sources, vec!["list.cpp"]);
    assert!(result.missing_marker.is_empty());
    assert_eq!(fixture.read("dist/amalgamated.cpp"), samples::MERGED);
}

#[test]
fn test_merge_is_deterministic() {
    let fixture = TestFixture::new().with_sample_project();
    let config = config::from_file(fixture.config_path()).unwrap();

    let first = orchestrator::execute_merge(&config, None).unwrap();
    let second = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(first.lines, second.lines);
}

#[test]
fn test_scoped_merge_from_root() {
    let fixture = sample_with("layout:\n  origin_comments: false\n  roots: [list.h]\n");
    let config = config::from_file(fixture.config_path()).unwrap();

    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(result.plan.files, vec!["base.h", "list.h"]);
    assert_eq!(
        result.lines,
        vec![
            "#include <stdint.h>",
            "#include <vector>",
            "typedef uint32_t id_t;",
            "struct List { std::vector<id_t> ids; };",
        ]
    );
}

#[test]
fn test_front_files_come_first() {
    let fixture = sample_with("layout:\n  origin_comments: false\n  front: [base.h]\n");
    let config = config::from_file(fixture.config_path()).unwrap();

    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(
        result.lines,
        vec![
            "#include <stdint.h>",
            "typedef uint32_t id_t;",
            "#include <vector>",
            "struct List { std::vector<id_t> ids; };",
            "#include <algorithm>",
            "void sort(List& l) { std::sort(l.ids.begin(), l.ids.end()); }",
        ]
    );
}

#[test]
fn test_front_file_with_pending_dependency_fails() {
    let fixture = sample_with("layout:\n  front: [list.h]\n");
    let config = config::from_file(fixture.config_path()).unwrap();

    let err = orchestrator::execute_merge(&config, None).unwrap_err();
    match err {
        Error::FrontFileDependency { name, dependency } => {
            assert_eq!(name, "list.h");
            assert_eq!(dependency, "base.h");
        }
        other => panic!("expected front file error, got {:?}", other),
    }
}

#[test]
fn test_cycle_reports_path_and_writes_nothing() {
    let fixture = TestFixture::new()
        .with_file("src/a.h", "#include \"b.h\"\n// merge-start\nint a;\n")
        .with_file("src/b.h", "#include \"a.h\"\n// merge-start\nint b;\n")
        .with_config(&format!("{}output: out.cpp\n", BASE_CONFIG));
    let config = config::from_file(fixture.config_path()).unwrap();
    let output = fixture.path().join("out.cpp");

    let err = orchestrator::execute_merge(&config, Some(&output)).unwrap_err();
    match err {
        Error::CycleDetected { scope, cycle } => {
            assert_eq!(scope, "all files");
            assert_eq!(cycle, "a.h -> b.h -> a.h");
        }
        other => panic!("expected cycle, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_placeholder_resolves_to_nothing() {
    let fixture = sample_with("placeholders: [generated.h]\nincludes:\n  strict: true\nlayout:\n  origin_comments: false\n  roots: [extra.h]\n")
        .with_file(
            "src/extra.h",
            "#include \"generated.h\"\n// merge-start\nint extra;\n",
        );
    let config = config::from_file(fixture.config_path()).unwrap();

    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(result.plan.files, vec!["generated.h", "extra.h"]);
    assert!(result.missing_marker.is_empty());
    assert_eq!(result.lines, vec!["int extra;"]);
}

#[test]
fn test_unresolved_known_include() {
    let lenient = sample_with("known: [missing.h]\n")
        .with_file("src/extra.h", "#include \"missing.h\"\n// merge-start\nint extra;\n");
    let config = config::from_file(lenient.config_path()).unwrap();
    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert!(result.plan.files.contains(&"missing.h".to_string()));
    assert!(result.missing_marker.is_empty());

    let strict = sample_with("known: [missing.h]\nincludes:\n  strict: true\n")
        .with_file("src/extra.h", "#include \"missing.h\"\n// merge-start\nint extra;\n");
    let config = config::from_file(strict.config_path()).unwrap();
    let err = orchestrator::execute_merge(&config, None).unwrap_err();
    assert!(matches!(
        err,
        Error::UnresolvedInclude { ref from, ref to } if from == "extra.h" && to == "missing.h"
    ));
}

#[test]
fn test_template_prefix() {
    let fixture = sample_with(
        r#"layout:
  origin_comments: false
  roots: [base.h]
  prefix:
    template:
      path: tools/template.cpp
      banner_at: "Generated file header"
      banner: ["// single-file build"]
      replace:
        LIBNAME: idlist
"#,
    )
    .with_file(
        "tools/template.cpp",
        "// Copyright 2024 Example Corp\n// Generated file header\n/// @brief Part of LIBNAME\n#include \"list.h\"\nint unused;\n",
    );
    let config = config::from_file(fixture.config_path()).unwrap();

    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(
        result.lines,
        vec![
            "// single-file build",
            "/// @brief Part of idlist",
            "#include <stdint.h>",
            "typedef uint32_t id_t;",
        ]
    );
}

#[test]
fn test_duplicate_names_follow_policy() {
    let yaml = |policy: &str| {
        format!(
            "sources:\n  - dir: one\n    suffixes: [.h]\n  - dir: two\n    suffixes: [.h]\nmarkers:\n  start: [\"// merge-start\"]\nlayout:\n  origin_comments: false\n  duplicates: {}\n",
            policy
        )
    };
    let fixture = TestFixture::new()
        .with_file("one/dup.h", "// merge-start\nint first;\n")
        .with_file("two/dup.h", "// merge-start\nint second;\n")
        .with_config(&yaml("ignore"));
    let config = config::from_file(fixture.config_path()).unwrap();
    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert_eq!(result.lines, vec!["int first;"]);

    let fixture = fixture.with_config(&yaml("error"));
    let config = config::from_file(fixture.config_path()).unwrap();
    let err = orchestrator::execute_merge(&config, None).unwrap_err();
    assert!(matches!(err, Error::DuplicateFile { ref name } if name == "dup.h"));
}

#[test]
fn test_only_unstarted_files_lack_a_marker() {
    let fixture = TestFixture::new()
        .with_sample_project()
        .with_file("src/stray.h", "int no_marker_here;\n")
        .with_file("src/hollow.h", "// merge-start\n");
    let config = config::from_file(fixture.config_path()).unwrap();

    let result = orchestrator::execute_merge(&config, None).unwrap();
    assert!(result.plan.files.contains(&"hollow.h".to_string()));
    assert_eq!(result.missing_marker, vec!["stray.h"]);
}
