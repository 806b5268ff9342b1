//! Batch folder numbering
//!
//! Allocation picks `max(existing) + 1` and creates it with an exclusive
//! `create_dir`. If another creator got there first the number is bumped and
//! retried, so two exports never share a folder.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

const MAX_ALLOCATION_ATTEMPTS: usize = 64;

/// Numbers of the existing numeric batch folders in `keyword_dir`, sorted ascending.
/// A missing directory has no batches.
pub fn existing_batch_numbers(keyword_dir: &Path) -> io::Result<Vec<u64>> {
    let entries = match fs::read_dir(keyword_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut numbers = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(number) = entry.file_name().to_str().and_then(parse_batch_name) {
            numbers.push(number);
        }
    }
    numbers.sort_unstable();
    Ok(numbers)
}

fn parse_batch_name(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Create the next batch folder under `keyword_dir`, returning its number and path
///
/// # Errors
///
/// Returns an error if the keyword folder cannot be created or listed, or if no free
/// number was found after repeated collisions.
pub fn allocate_batch(keyword_dir: &Path) -> io::Result<(u64, PathBuf)> {
    fs::create_dir_all(keyword_dir)?;

    let mut candidate = match existing_batch_numbers(keyword_dir)?.last() {
        Some(&max) => next_number(max)?,
        None => 1,
    };
    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let dir = keyword_dir.join(candidate.to_string());
        match fs::create_dir(&dir) {
            Ok(()) => return Ok((candidate, dir)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                candidate = next_number(candidate)?;
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free batch number after {MAX_ALLOCATION_ATTEMPTS} attempts"),
    ))
}

fn next_number(current: u64) -> io::Result<u64> {
    current.checked_add(1).ok_or_else(|| {
        let reason = format!("batch number {current} cannot be incremented");
        io::Error::new(io::ErrorKind::InvalidData, reason)
    })
}

/// One in-process lock per keyword, serializing batch allocation
///
/// Entries are created on first use and kept for the life of the owning
/// [`super::ExportManager`]; the map grows by one small entry per distinct
/// exported keyword and is never pruned.
#[derive(Debug, Default)]
pub struct KeywordLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeywordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_for(&self, keyword: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(keyword.to_string()).or_default())
    }
}
