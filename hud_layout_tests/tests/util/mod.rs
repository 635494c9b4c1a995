// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

pub(crate) mod samples;
mod viewer;

pub(crate) use viewer::TestViewer;

use std::collections::BTreeSet;

use hud_layout::{BuildConfig, BuildContext, CompiledPopup, PackFile, Popup};

/// A pack build with logging routed to the test harness.
pub(crate) struct TestEnv {
    pub(crate) cx: BuildContext,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    pub(crate) fn with_config(config: BuildConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            cx: BuildContext::new(config).expect("test config is valid"),
        }
    }

    pub(crate) fn build(&mut self, popup: &Popup) -> CompiledPopup {
        self.cx
            .build_popup(popup)
            .unwrap_or_else(|err| panic!("building `{}` failed: {err}", popup.name))
    }

    /// Finishes the build and materializes every queued file.
    pub(crate) fn finish(self) -> PackOutput {
        let queue = self.cx.finish().expect("pack build finishes");
        PackOutput {
            files: queue.materialize().expect("every pack file materializes"),
        }
    }
}

/// The files of a finished pack.
pub(crate) struct PackOutput {
    pub(crate) files: Vec<PackFile>,
}

impl PackOutput {
    pub(crate) fn paths(&self) -> Vec<String> {
        self.files.iter().map(PackFile::path_string).collect()
    }

    pub(crate) fn file(&self, path: &str) -> &PackFile {
        self.files
            .iter()
            .find(|file| file.path_string() == path)
            .unwrap_or_else(|| panic!("no file at `{path}`, have {:?}", self.paths()))
    }

    pub(crate) fn json(&self, path: &str) -> serde_json::Value {
        serde_json::from_slice(&self.file(path).bytes).expect("pack file is valid JSON")
    }

    /// Every font file, by path.
    pub(crate) fn fonts(&self) -> Vec<(String, serde_json::Value)> {
        self.files
            .iter()
            .filter(|file| file.path.get(2).is_some_and(|dir| dir == "font"))
            .map(|file| {
                let json = serde_json::from_slice(&file.bytes).expect("font is valid JSON");
                (file.path_string(), json)
            })
            .collect()
    }

    /// The bitmap providers of the font at `path`.
    pub(crate) fn bitmaps(&self, path: &str) -> Vec<serde_json::Value> {
        self.json(path)["providers"]
            .as_array()
            .expect("providers is an array")
            .iter()
            .filter(|provider| provider["type"] == "bitmap")
            .cloned()
            .collect()
    }
}

/// Asserts that no character is mapped twice within any font of `output`.
pub(crate) fn assert_unique_chars(output: &PackOutput) {
    for (path, font) in output.fonts() {
        let mut seen = BTreeSet::new();
        for provider in font["providers"].as_array().expect("providers is an array") {
            let chars: Vec<char> = match provider["type"].as_str() {
                Some("bitmap") => provider["chars"]
                    .as_array()
                    .expect("chars is an array")
                    .iter()
                    .flat_map(|row| row.as_str().expect("rows are strings").chars())
                    .collect(),
                Some("space") => provider["advances"]
                    .as_object()
                    .expect("advances is an object")
                    .keys()
                    .flat_map(|key| key.chars())
                    .collect(),
                other => panic!("unexpected provider type {other:?} in `{path}`"),
            };
            for ch in chars {
                assert!(
                    seen.insert(ch),
                    "U+{:X} is mapped twice in `{path}`",
                    u32::from(ch)
                );
            }
        }
    }
}
