// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered queue of resource-pack files.
//!
//! Files are queued as `(path, producer)` pairs during the build and only encoded when the
//! queue is materialized, so a build that fails halfway never pays for serialization.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use serde::Serialize;

use crate::Error;

/// Path of a file inside the pack, one entry per directory level.
pub type PackPath = Vec<String>;

/// Splits a `/`-separated path into a [`PackPath`], dropping empty segments.
pub fn pack_path(path: &str) -> PackPath {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

type Producer = Box<dyn FnOnce() -> Result<Vec<u8>, Error> + Send>;

struct PackTask {
    path: PackPath,
    producer: Producer,
}

/// A materialized pack file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackFile {
    /// Location inside the pack.
    pub path: PackPath,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl PackFile {
    /// The path joined with `/`.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}

/// Receives materialized files, for example to write them into an archive.
pub trait PackSink {
    /// Stores one file.
    fn write(&mut self, path: &[String], bytes: Vec<u8>) -> Result<(), Error>;
}

impl PackSink for Vec<PackFile> {
    fn write(&mut self, path: &[String], bytes: Vec<u8>) -> Result<(), Error> {
        self.push(PackFile {
            path: path.to_vec(),
            bytes,
        });
        Ok(())
    }
}

/// The ordered set of files a build produces.
///
/// Each path is written at most once. [`add_task`](Self::add_task) keeps the first
/// registration and ignores later ones; [`replace_task`](Self::replace_task) overwrites.
#[derive(Default)]
pub struct PackQueue {
    tasks: Vec<PackTask>,
    paths: HashMap<PackPath, usize>,
}

impl PackQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `producer` for `path` unless the path is already taken.
    ///
    /// Returns `false` and drops `producer` without running it when the path exists.
    pub fn add_task(
        &mut self,
        path: PackPath,
        producer: impl FnOnce() -> Result<Vec<u8>, Error> + Send + 'static,
    ) -> bool {
        if self.paths.contains_key(&path) {
            log::warn!("pack file `{}` is already queued", path.join("/"));
            return false;
        }
        self.paths.insert(path.clone(), self.tasks.len());
        self.tasks.push(PackTask {
            path,
            producer: Box::new(producer),
        });
        true
    }

    /// Queues `producer` for `path`, replacing any earlier producer in place.
    pub fn replace_task(
        &mut self,
        path: PackPath,
        producer: impl FnOnce() -> Result<Vec<u8>, Error> + Send + 'static,
    ) {
        match self.paths.get(&path) {
            Some(&index) => self.tasks[index].producer = Box::new(producer),
            None => {
                self.add_task(path, producer);
            }
        }
    }

    /// Queues `value` encoded as JSON.
    pub fn add_json<T>(&mut self, path: PackPath, value: T) -> bool
    where
        T: Serialize + Send + 'static,
    {
        let file = path.join("/");
        self.add_task(path, move || {
            serde_json::to_vec(&value).map_err(|err| Error::serialization(&file, err))
        })
    }

    /// Whether `path` is queued.
    pub fn contains(&self, path: &[String]) -> bool {
        self.paths.contains_key(path)
    }

    /// Number of queued files.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Queued paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.tasks.iter().map(|task| task.path.as_slice())
    }

    /// Runs every producer in registration order.
    pub fn materialize(self) -> Result<Vec<PackFile>, Error> {
        let mut files = Vec::with_capacity(self.tasks.len());
        self.write_to(&mut files)?;
        Ok(files)
    }

    /// Runs every producer in registration order, handing each file to `sink`.
    ///
    /// Stops at the first failure. Returns the number of files written.
    pub fn write_to(self, sink: &mut impl PackSink) -> Result<usize, Error> {
        let mut written = 0;
        for task in self.tasks {
            let bytes = (task.producer)()?;
            sink.write(&task.path, bytes)?;
            written += 1;
        }
        Ok(written)
    }
}

impl Debug for PackQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.tasks.iter().map(|task| task.path.join("/")))
            .finish()
    }
}
