use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Parser, Tree};

/// Syntax-tree parser for TypeScript and JavaScript source files.
///
/// The `AstParser` uses `tree-sitter` with the TypeScript, TSX and JavaScript
/// grammars to parse source code into a concrete syntax tree, which can then
/// be traversed to extract route declarations. Tree-sitter is error-tolerant:
/// files with localized syntax problems still produce a tree, and the
/// unparseable regions simply never match a route shape.
///
/// # Example
///
/// ```no_run
/// use openapi_from_routes::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/users/users.controller.ts")).unwrap();
/// println!("Parsed {} with {}", parsed.path.display(), parsed.language.name());
/// ```
pub struct AstParser;

/// Source languages with a loaded grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    /// TypeScript (`.ts`, `.mts`, `.cts`)
    TypeScript,
    /// TSX / JSX (`.tsx`, `.jsx`)
    Tsx,
    /// JavaScript (`.js`, `.mjs`, `.cjs`)
    JavaScript,
}

impl SourceLanguage {
    /// Detects the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension {
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" | "jsx" => Some(SourceLanguage::Tsx),
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            _ => None,
        }
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TSX",
            SourceLanguage::JavaScript => "JavaScript",
        }
    }
}

/// A successfully parsed source file with its syntax tree.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// Raw file contents; tree nodes reference byte ranges into this
    pub source: String,
    /// Language the file was parsed as
    pub language: SourceLanguage,
    /// The parsed syntax tree
    pub tree: Tree,
}

impl AstParser {
    /// Parses a single source file into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file extension maps to no supported language
    /// - The file cannot be read
    /// - The parser fails to produce a tree
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let language = SourceLanguage::from_path(path)
            .with_context(|| format!("Unsupported source file extension: {}", path.display()))?;

        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Self::parse_source(path, source, language)
    }

    /// Parses already-loaded source text as `language`.
    pub fn parse_source(path: &Path, source: String, language: SourceLanguage) -> Result<ParsedFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .with_context(|| format!("Failed to load {} grammar", language.name()))?;

        let tree = parser
            .parse(&source, None)
            .with_context(|| format!("Failed to parse syntax in file: {}", path.display()))?;

        debug!("Successfully parsed file: {}", path.display());

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            language,
            tree,
        })
    }

    /// Parses multiple source files, continuing even if some fail.
    ///
    /// Files that fail to parse are logged as warnings, but parsing continues
    /// for the remaining files; a single bad file never aborts a scan. This
    /// allows generating partial documentation from whatever does parse.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| match Self::parse_file(path) {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Err(e)
                }
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        let failure_count = results.len() - success_count;

        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count, failure_count
        );

        results
    }
}
