//! Core CLI commands for msgident: resolve, check, lookup, names.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use regex::Regex;

use crate::catalog::MessageCatalog;
use crate::config::Config;
use crate::error::Error;
use crate::table::{IdentifierTable, UNRESOLVED_ID};

/// Reconcile every configured section and report unresolved names.
///
/// # Errors
///
/// Returns errors from config, catalog, or identifiers loading.
pub fn check() -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let catalog = MessageCatalog::read(&root.join(&config.catalog))?;

    let mut unresolved_count = 0_usize;
    let mut total = 0_usize;
    for section in &config.sections {
        let table = load_section(&root, &config, &catalog, section)?;
        total = total.saturating_add(table.len());
        for (name, id) in table.entries() {
            if id == UNRESOLVED_ID {
                unresolved_count = unresolved_count.saturating_add(1);
                println!("UNRESOLVED  {section}/{name}");
            }
        }
    }

    // Exit codes: any unresolved name (1) > fully resolved (0).
    // Hard failures (malformed input, missing files) surface as errors.
    if unresolved_count > 0 {
        println!();
        println!("{unresolved_count} of {total} names unresolved");
        return Ok(ExitCode::from(1));
    }
    println!("All {total} names resolved");
    return Ok(ExitCode::SUCCESS);
}

/// Load one section of the curated file against the catalog.
///
/// # Errors
///
/// Returns errors from identifiers reading or reconciliation.
fn load_section(
    root: &Path,
    config: &Config,
    catalog: &MessageCatalog,
    section: &str,
) -> Result<IdentifierTable, Error> {
    let mut table = IdentifierTable::new(section);
    table.load_from_path(catalog, &root.join(&config.identifiers))?;
    return Ok(table);
}

/// Print the id and hash for one name in one section.
///
/// # Errors
///
/// Returns `Error::UnknownSection` for an unconfigured section, plus
/// errors from config, catalog, or identifiers loading.
pub fn lookup(section: &str, name: &str) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    config.require_section(section)?;
    let catalog = MessageCatalog::read(&root.join(&config.catalog))?;
    let table = load_section(&root, &config, &catalog, section)?;

    return match table.try_id_of(name) {
        None => {
            println!("`{name}` is not in [{section}]");
            Ok(ExitCode::from(1))
        },
        Some(UNRESOLVED_ID) => {
            println!("{name} = unresolved");
            Ok(ExitCode::from(1))
        },
        Some(id) => {
            let hash = table.hash_of(id).unwrap_or("?");
            println!("{name} = {id}  (hash {hash})");
            Ok(ExitCode::SUCCESS)
        },
    };
}

/// List `name=id` pairs in a section, optionally filtered by a regex
/// matched against names.
///
/// # Errors
///
/// Returns `Error::UnknownSection` for an unconfigured section,
/// `Error::InvalidFilter` for a filter that doesn't compile, plus errors
/// from config, catalog, or identifiers loading.
pub fn names(section: &str, filter: Option<&str>) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    config.require_section(section)?;
    let catalog = MessageCatalog::read(&root.join(&config.catalog))?;
    let table = load_section(&root, &config, &catalog, section)?;

    let pattern = match filter {
        None => None,
        Some(f) => Some(Regex::new(f).map_err(|e| {
            return Error::InvalidFilter {
                reason: e.to_string(),
            };
        })?),
    };

    for (name, id) in table.entries() {
        if pattern.as_ref().is_some_and(|p| return !p.is_match(name)) {
            continue;
        }
        println!("{name}={id}");
    }
    return Ok(ExitCode::SUCCESS);
}

/// Reconcile every configured section and write the resolved snapshot.
///
/// The snapshot holds `name=id` lines — resolved ids for this build, not
/// the curated hashes. The curated file is never rewritten by this command.
///
/// # Errors
///
/// Returns errors from config, catalog, or identifiers loading, or from
/// writing the snapshot.
pub fn resolve() -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let catalog = MessageCatalog::read(&root.join(&config.catalog))?;

    let mut snapshot = String::new();
    let mut total = 0_usize;
    for section in &config.sections {
        let table = load_section(&root, &config, &catalog, section)?;
        let resolved = table.ids().filter(|id| return *id != UNRESOLVED_ID).count();
        let count = table.len();
        println!("{section}: {resolved}/{count} resolved");

        if !snapshot.is_empty() {
            snapshot.push('\n');
        }
        snapshot.push_str(&table.serialize());
        total = total.saturating_add(count);
    }

    std::fs::write(root.join(&config.output), snapshot)?;
    println!("Wrote {total} names to {}", config.output.display());
    return Ok(ExitCode::SUCCESS);
}

/// Reverse-look up a resolved id or a content hash in one section.
///
/// A key that parses as an id is looked up in the id-keyed indices;
/// anything else is treated as a hash.
///
/// # Errors
///
/// Returns `Error::UnknownSection` for an unconfigured section, plus
/// errors from config, catalog, or identifiers loading.
pub fn whois(section: &str, key: &str) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    config.require_section(section)?;
    let catalog = MessageCatalog::read(&root.join(&config.catalog))?;
    let table = load_section(&root, &config, &catalog, section)?;

    if let Ok(id) = key.parse::<u16>() {
        return match table.name_of(id) {
            None => {
                println!("no name resolved to id {id} in [{}]", table.section());
                Ok(ExitCode::from(1))
            },
            Some(name) => {
                let hash = table.hash_of(id).unwrap_or("?");
                println!("{id} = {name}  (hash {hash})");
                Ok(ExitCode::SUCCESS)
            },
        };
    }

    return match table.name_of_hash(key) {
        None => {
            println!("no name recorded for hash {key} in [{}]", table.section());
            Ok(ExitCode::from(1))
        },
        Some(name) => {
            println!("{key} = {name}");
            Ok(ExitCode::SUCCESS)
        },
    };
}
