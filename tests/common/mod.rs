//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a small sample project (three C++ files that include
//! each other, plus a `.header-merger.yaml`) and helpers to build variants of
//! it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sample_project();
//!     // ... test code
//! }
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::samples;
    pub use super::TestFixture;
}

/// Sample sources and configurations.
pub mod samples {
    pub const BASE_H: &str = "\
// Copyright 2024 Example Corp
// Author: Ada
#include <stdint.h>
// merge-start
typedef uint32_t id_t;
";

    pub const LIST_H: &str = "\
// Copyright 2024 Example Corp
#include \"base.h\"
#include <vector>
// merge-start
struct List { std::vector<id_t> ids; };
";

    pub const LIST_CPP: &str = "\
#include \"list.h\"
#include <algorithm>
// merge-start
void sort(List& l) { std::sort(l.ids.begin(), l.ids.end()); }
// merge-end
int ignored;
";

    pub const CONFIG: &str = r#"
output: dist/amalgamated.cpp
sources:
  - glob: "src/*"
markers:
  start: ["// merge-start"]
  end: ["// merge-end"]
metadata:
  - key: copyrights
    starts_with: "// Copyright"
  - key: authors
    starts_with: "// Author"
layout:
  prefix:
    lines: ["// amalgamated, do not edit"]
"#;

    /// The merge of the sample project with [`CONFIG`].
    pub const MERGED: &str = "\
// Copyright 2024 Example Corp
// amalgamated, do not edit
// Author: Ada
#include <stdint.h>
#include <vector>

// BEGIN contents of base.h
typedef uint32_t id_t;
// END contents of base.h


// BEGIN contents of list.h
struct List { std::vector<id_t> ids; };
// END contents of list.h

#include <algorithm>

// BEGIN contents of list.cpp
void sort(List& l) { std::sort(l.ids.begin(), l.ids.end()); }
// END contents of list.cpp

";
}

/// A temporary project directory.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Write the three sample sources and the sample configuration.
    pub fn with_sample_project(self) -> Self {
        self.with_file("src/base.h", samples::BASE_H)
            .with_file("src/list.h", samples::LIST_H)
            .with_file("src/list.cpp", samples::LIST_CPP)
            .with_config(samples::CONFIG)
    }

    /// Write `.header-merger.yaml`.
    pub fn with_config(self, yaml: &str) -> Self {
        self.with_file(".header-merger.yaml", yaml)
    }

    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.temp.child(rel).write_str(content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join(".header-merger.yaml")
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.temp.path().join(rel)).unwrap()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
