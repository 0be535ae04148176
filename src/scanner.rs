use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Default include patterns: the common controller/router file-name
/// conventions across TypeScript/JavaScript extensions, plus anything under a
/// `routes` directory.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "src/**/*controller.{ts,tsx,js,jsx}",
    "src/**/*Controller.{ts,tsx,js,jsx}",
    "src/**/*router.{ts,tsx,js,jsx}",
    "src/**/*Router.{ts,tsx,js,jsx}",
    "src/**/routes/**/*.{ts,tsx,js,jsx}",
];

/// Default ignore patterns: build output and dependency directories.
pub const DEFAULT_IGNORE: &[&str] = &["**/dist/**", "**/node_modules/**"];

/// File scanner resolving glob include/ignore patterns against a project
/// directory.
///
/// The `FileScanner` walks the working directory and keeps every file whose
/// path relative to that directory matches at least one include pattern and
/// no ignore pattern. Patterns use fast-glob syntax: `*` stays within one
/// path component, `**` crosses components, and `{a,b}` alternation is
/// supported.
///
/// The result is deduplicated and sorted by path, so downstream consumers
/// that pick the first occurrence of a duplicate route always pick the same
/// one regardless of filesystem enumeration order.
///
/// # Example
///
/// ```no_run
/// use openapi_from_routes::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-project"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} candidate files", result.source_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
    patterns: Vec<String>,
    ignore: Vec<String>,
}

/// Result of a directory scan.
pub struct ScanResult {
    /// Matched file paths, deduplicated and sorted
    pub source_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a scanner for `root_path` with the default include and ignore
    /// patterns.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            ignore: DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replaces the include patterns.
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Replaces the ignore patterns.
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    /// Walks the directory tree and collects matching files.
    ///
    /// Unreadable directories or files are logged as warnings and carried in
    /// the result, but never abort the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if an include or ignore pattern is not a valid glob.
    pub fn scan(&self) -> Result<ScanResult> {
        let includes = compile_patterns(&self.patterns)?;
        let ignores = compile_patterns(&self.ignore)?;

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path) {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let Ok(relative) = entry.path().strip_prefix(&self.root_path) else {
                        continue;
                    };
                    let relative = relative.to_string_lossy().replace('\\', "/");

                    if matches_any(&ignores, &relative) {
                        continue;
                    }
                    if matches_any(&includes, &relative) {
                        source_files.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        source_files.sort();
        source_files.dedup();

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }
}

/// Match options making `*` stay within a single path component while `**`
/// still crosses directories, mirroring fast-glob semantics.
fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    }
}

fn matches_any(patterns: &[Pattern], relative: &str) -> bool {
    let options = match_options();
    patterns
        .iter()
        .any(|pattern| pattern.matches_with(relative, options))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        for expanded in expand_braces(pattern) {
            let parsed = Pattern::new(&expanded)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?;
            compiled.push(parsed);
        }
    }
    Ok(compiled)
}

/// Expands `{a,b}` alternation, which the `glob` crate does not support
/// natively. Nested groups expand recursively; a pattern without braces is
/// returned as-is.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close_offset) = pattern[open..].find('}') else {
        return vec![pattern.to_string()];
    };
    let close = open + close_offset;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut expanded = Vec::new();
    for alternative in pattern[open + 1..close].split(',') {
        expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}")));
    }
    expanded
}
