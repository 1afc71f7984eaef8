//! The reconciliation and lookup engine: a section-scoped identifier table.
//!
//! A build of the remote protocol assigns unstable numeric ids to its
//! messages; the content hash of each message is the stable key. The table
//! loads the human-curated `name=hash` section it owns, asks the build
//! catalog for candidates per hash, and keeps four derived indices for
//! fast bidirectional lookups. Only the name-sorted primary index is ever
//! persisted — the id-keyed indices are rebuilt from scratch on every load.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::catalog::BuildIndex;
use crate::error::Error;
use crate::slots::SlotRegistry;

/// Sentinel id for curated names whose hash did not resolve to exactly one
/// candidate in the current build. Callers compare against this value
/// directly; it is part of the table's contract, not an implementation detail.
pub const UNRESOLVED_ID: u16 = u16::MAX;

/// A named partition of the curated identifiers file.
///
/// Not internally synchronized: concurrent loads, or reads during a load,
/// must be serialized by the caller. Independent instances share no state.
pub struct IdentifierTable {
    /// Resolved id → content hash, rebuilt per load.
    hashes_by_id: HashMap<u16, String>,
    /// Curated name → resolved id (or `UNRESOLVED_ID`). Name-sorted so
    /// serialization is deterministic.
    ids_by_name: BTreeMap<String, u16>,
    /// Content hash → first curated name seen for it during the load.
    names_by_hash: HashMap<String, String>,
    /// Resolved id → curated name, rebuilt per load.
    names_by_id: HashMap<u16, String>,
    /// The `[Section]` header this table consumes and emits.
    section: String,
}

impl IdentifierTable {
    /// Create an empty table that consumes the given section of a curated file.
    pub fn new(section: impl Into<String>) -> Self {
        return Self {
            hashes_by_id: HashMap::new(),
            ids_by_name: BTreeMap::new(),
            names_by_hash: HashMap::new(),
            names_by_id: HashMap::new(),
            section: section.into(),
        };
    }

    /// Iterate `(name, id)` pairs in ascending name order.
    /// Unresolved names carry `UNRESOLVED_ID`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u16)> {
        return self.ids_by_name.iter().map(|(name, id)| return (name.as_str(), *id));
    }

    /// Content hash that produced the given resolved id, if any.
    pub fn hash_of(&self, id: u16) -> Option<&str> {
        return self.hashes_by_id.get(&id).map(String::as_str);
    }

    /// Resolved id for `name`, or `UNRESOLVED_ID` when the name is absent
    /// or its hash did not resolve. Never fails.
    pub fn id_of(&self, name: &str) -> u16 {
        return self.ids_by_name.get(name).copied().unwrap_or(UNRESOLVED_ID);
    }

    /// Every id held by the primary index, in ascending name order.
    /// Includes `UNRESOLVED_ID` entries for names that did not resolve.
    pub fn ids(&self) -> impl Iterator<Item = u16> {
        return self.ids_by_name.values().copied();
    }

    /// Whether the table holds no curated names.
    pub fn is_empty(&self) -> bool {
        return self.ids_by_name.is_empty();
    }

    /// Number of curated names held, resolved or not.
    pub fn len(&self) -> usize {
        return self.ids_by_name.len();
    }

    /// Reconcile the curated source against a build index, without slot
    /// binding. Idempotent — each call fully replaces prior state.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedLine` for an in-section line that is not
    /// `name=hash`, or `Error::Io` if the reader fails. A failed load leaves
    /// the table in an unspecified state; callers must not assume partial
    /// success.
    pub fn load<R: BufRead>(&mut self, index: &dyn BuildIndex, reader: R) -> Result<(), Error> {
        return self.load_with_slots(index, reader, &mut ());
    }

    /// Load from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::IdentifiersNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures, plus everything `load` returns.
    pub fn load_from_path(&mut self, index: &dyn BuildIndex, path: &Path) -> Result<(), Error> {
        let file = match std::fs::File::open(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::IdentifiersNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(f) => f,
        };
        return self.load(index, BufReader::new(file));
    }

    /// Reconcile the curated source against a build index, offering every
    /// `(name, id)` pair to the caller's slot registry as it is produced.
    ///
    /// Only lines inside this table's `[Section]` are processed; header
    /// lines, lines in other sections, and whitespace-only lines are inert.
    /// Each data line splits on the first `=` into a trimmed name and hash.
    /// A hash with exactly one candidate in the index resolves to that
    /// candidate's id; zero or many candidates both yield `UNRESOLVED_ID` —
    /// ambiguity is indistinguishable from absence to downstream consumers.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedLine` or `Error::Io` as `load` does.
    pub fn load_with_slots<R: BufRead>(
        &mut self,
        index: &dyn BuildIndex,
        reader: R,
        slots: &mut dyn SlotRegistry,
    ) -> Result<(), Error> {
        self.hashes_by_id.clear();
        self.ids_by_name.clear();
        self.names_by_hash.clear();
        self.names_by_id.clear();

        let header = format!("[{}]", self.section);
        let mut in_section = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                in_section = trimmed == header;
                continue;
            }
            if !in_section {
                continue;
            }

            let (name, hash) = parse_data_line(&line, idx.saturating_add(1))?;

            let mut id = UNRESOLVED_ID;
            if let [only] = index.candidates(&hash) {
                id = only.id;
                // First curated name for a hash wins the reverse mapping.
                if !self.names_by_hash.contains_key(&hash) {
                    self.names_by_hash.insert(hash.clone(), name.clone());
                }
            }

            if id != UNRESOLVED_ID {
                self.names_by_id.insert(id, name.clone());
                self.hashes_by_id.insert(id, hash.clone());
            }
            self.ids_by_name.insert(name.clone(), id);
            slots.set_slot(&name, id);
        }

        return Ok(());
    }

    /// Curated name that produced the given resolved id, if any.
    pub fn name_of(&self, id: u16) -> Option<&str> {
        return self.names_by_id.get(&id).map(String::as_str);
    }

    /// First curated name recorded for a content hash during the load.
    pub fn name_of_hash(&self, hash: &str) -> Option<&str> {
        return self.names_by_hash.get(hash).map(String::as_str);
    }

    /// Write the serialized `name=id` block to a writer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the writer fails.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        out.write_all(self.serialize().as_bytes())?;
        return Ok(());
    }

    /// Write the serialized `name=id` block to a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.serialize())?;
        return Ok(());
    }

    /// The section name this table consumes and emits.
    pub fn section(&self) -> &str {
        return &self.section;
    }

    /// Serialize to the persisted form: the section header, then one
    /// `name=id` line per curated name in ascending name order.
    ///
    /// Note the asymmetry: `load` consumes `name=hash` lines, while this
    /// emits `name=id` lines — a resolved snapshot, not the curated
    /// source-of-truth file. Callers must not conflate the two shapes.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}]", self.section);
        for (name, id) in &self.ids_by_name {
            let _ = writeln!(out, "{name}={id}");
        }
        return out;
    }

    /// Directly set the id for a name in the primary index, adding the name
    /// if absent. Supports manual patching after a load; the derived
    /// id-keyed indices are not touched.
    pub fn set_id(&mut self, name: impl Into<String>, id: u16) {
        self.ids_by_name.insert(name.into(), id);
    }

    /// Resolved id for `name`, distinguishing absence from resolution
    /// failure: `None` when the name is not in the table,
    /// `Some(UNRESOLVED_ID)` when it is present but did not resolve.
    pub fn try_id_of(&self, name: &str) -> Option<u16> {
        return self.ids_by_name.get(name).copied();
    }
}

/// Split a data line on its first `=` into trimmed name and hash.
///
/// # Errors
///
/// Returns `Error::MalformedLine` when the `=` is missing, or when either
/// field is empty after trimming.
fn parse_data_line(line: &str, line_number: usize) -> Result<(String, String), Error> {
    let malformed = || {
        return Error::MalformedLine {
            content: line.to_string(),
            line_number,
        };
    };

    let Some((name, hash)) = line.split_once('=') else {
        return Err(malformed());
    };
    let name = name.trim();
    let hash = hash.trim();
    if name.is_empty() || hash.is_empty() {
        return Err(malformed());
    }
    return Ok((name.to_string(), hash.to_string()));
}
