use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI From Routes - Automatically generate OpenAPI documentation from TypeScript/JavaScript web projects
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Title of the generated document (info.title)
    #[arg(short = 't', long = "title", default_value = "Auto Generated APIs")]
    pub title: String,

    /// Version of the generated document (info.version)
    #[arg(long = "doc-version", value_name = "VERSION", default_value = "1.0.0")]
    pub doc_version: String,

    /// Description of the generated document (info.description)
    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,

    /// Server URL recorded in the document
    #[arg(long = "server-url", value_name = "URL")]
    pub server_url: Option<String>,

    /// Include glob pattern, repeatable (defaults to controller/router conventions)
    #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Ignore glob pattern, repeatable (defaults to dist and node_modules)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Description for the generated default 200 response
    #[arg(long = "response-description", value_name = "TEXT")]
    pub response_description: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    // Validate project path exists
    if !args.project_path.exists() {
        anyhow::bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }

    // Validate project path is a directory
    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    if args.patterns.is_empty() {
        info!("Include patterns: defaults");
    } else {
        info!("Include patterns: {:?}", args.patterns);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::dedup::deduplicate_routes;
    use crate::error::Error;
    use crate::extractor::annotation::AnnotationExtractor;
    use crate::extractor::call_chain::CallChainExtractor;
    use crate::extractor::{Route, RouteExtractor};
    use crate::openapi_builder::{build_document, BuildOptions};
    use crate::parser::{AstParser, ParsedFile};
    use crate::scanner::FileScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");
    info!("Project path: {}", args.project_path.display());

    // Step 1: Resolve glob patterns against the project directory
    info!("Scanning project directory...");
    let mut scanner = FileScanner::new(args.project_path.clone());
    if !args.patterns.is_empty() {
        scanner = scanner.with_patterns(args.patterns.clone());
    }
    if !args.ignore.is_empty() {
        scanner = scanner.with_ignore(args.ignore.clone());
    }
    let scan_result = scanner.scan()?;

    info!("Found {} candidate files", scan_result.source_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }

    if scan_result.source_files.is_empty() {
        log::warn!("No controller or router files matched the include patterns");
        return Err(Error::NoRoutesFound.into());
    }

    // Step 2: Parse files into syntax trees, skipping files that fail
    info!("Parsing source files...");
    let parse_results = AstParser::parse_files(&scan_result.source_files);

    let parsed_files: Vec<ParsedFile> = parse_results
        .into_iter()
        .filter_map(|result| match result {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping file due to parse error: {}", e);
                None
            }
        })
        .collect();

    info!("Successfully parsed {} files", parsed_files.len());

    // Step 3: Run both extraction strategies over every file and merge
    info!("Extracting routes...");
    let extractors: [&dyn RouteExtractor; 2] = [&AnnotationExtractor, &CallChainExtractor];

    let mut all_routes: Vec<Route> = Vec::new();
    for parsed_file in &parsed_files {
        for extractor in extractors {
            all_routes.extend(extractor.extract(parsed_file, &args.project_path));
        }
    }

    info!("Extracted {} total routes", all_routes.len());

    // Step 4: Deduplicate (first occurrence wins, files are in sorted order)
    let routes = deduplicate_routes(all_routes);
    info!("{} routes after deduplication", routes.len());

    if routes.is_empty() {
        log::warn!("No routes found in the project");
        return Err(Error::NoRoutesFound.into());
    }

    // Step 5: Synthesize the OpenAPI document
    info!("Building OpenAPI document...");
    let document = build_document(
        &routes,
        BuildOptions {
            title: args.title.clone(),
            version: Some(args.doc_version.clone()),
            description: args.description.clone(),
            server_url: args.server_url.clone(),
            default_response_description: args.response_description.clone(),
        },
    );
    info!("OpenAPI document built successfully");

    // Step 6: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    // Step 7: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!(
            "Successfully wrote OpenAPI document to {}",
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    // Step 8: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Files matched: {}", scan_result.source_files.len());
    info!("  - Files parsed: {}", parsed_files.len());
    info!("  - Routes found: {}", routes.len());
    info!("  - Paths in document: {}", document.paths.len());

    Ok(())
}
