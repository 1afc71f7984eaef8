use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where one exists,
/// how to fix it. Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::CatalogNotFound { path } => render_catalog_not_found(&path.display().to_string()),
        Error::IdentifiersNotFound { path } => {
            render_identifiers_not_found(&path.display().to_string())
        },
        Error::MalformedLine { content, line_number } => {
            render_malformed_line(content, *line_number)
        },
        Error::UnknownSection { name } => render_unknown_section(name),
        _ => render_generic(e),
    }
}

fn render_catalog_not_found(path: &str) -> String {
    format!(
        "\
# Error: Catalog Not Found

`{path}` does not exist.

## Fix

Run the build analyzer to extract message records from the current
protocol build, or point `catalog` in `.msgident.toml` at its dump:

    catalog = \"path/to/messages.catalog.json\"
"
    )
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::CatalogCorrupt { reason } => format!("\
# Error: Catalog Corrupt

{reason}

## Fix

Re-run the build analyzer to regenerate the catalog dump.
"),

        Error::InvalidFilter { reason } => format!("\
# Error: Invalid Filter

{reason}
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::JsonDe(e) => format!("\
# Error: Invalid Catalog JSON

{e}

## Fix

Re-run the build analyzer to regenerate the catalog dump.
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid Config TOML

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_identifiers_not_found(path: &str) -> String {
    format!(
        "\
# Error: Identifiers Not Found

`{path}` does not exist.

## Fix

Create the curated identifiers file, one section per message direction:

    [Incoming]
    ChatMessage=ab12cd34

Or point `identifiers` in `.msgident.toml` at the right file.
"
    )
}

fn render_malformed_line(content: &str, line_number: usize) -> String {
    format!(
        "\
# Error: Malformed Line

Line {line_number} of the identifiers file is not `name=hash`:

    {content}

The load was aborted; no names from this run are usable.

## Fix

Give every data line a name, an `=`, and a hash:

    ChatMessage=ab12cd34
"
    )
}

fn render_unknown_section(name: &str) -> String {
    format!(
        "\
# Error: Unknown Section

Section `{name}` is not configured.

## Fix

Add it to `.msgident.toml`:

    sections = [\"Incoming\", \"Outgoing\", \"{name}\"]
"
    )
}
