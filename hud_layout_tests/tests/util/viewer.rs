// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use hud_layout::{HeadSkin, Value, Viewer};

/// A viewer whose placeholders, skin and followed viewers are set up by the test.
#[derive(Debug, Default)]
pub(crate) struct TestViewer {
    placeholders: HashMap<String, Value>,
    skin: Option<HeadSkin>,
    followed: HashMap<String, TestViewer>,
}

impl TestViewer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.placeholders.insert(name.to_owned(), value.into());
        self
    }

    pub(crate) fn with_skin(mut self, skin: HeadSkin) -> Self {
        self.skin = Some(skin);
        self
    }

    pub(crate) fn following(mut self, target: &str, viewer: Self) -> Self {
        self.followed.insert(target.to_owned(), viewer);
        self
    }
}

impl Viewer for TestViewer {
    fn placeholder(&self, name: &str) -> Option<Value> {
        self.placeholders.get(name).cloned()
    }

    fn follow(&self, target: &str) -> Option<&dyn Viewer> {
        self.followed
            .get(target)
            .map(|viewer| viewer as &dyn Viewer)
    }

    fn head_skin(&self) -> Option<&HeadSkin> {
        self.skin.as_ref()
    }
}
