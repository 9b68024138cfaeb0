//! Command-line interface for the classforge utility
//!
//! Provides a CLI to turn draw.io class diagrams into Java source files.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::colorizer::{kind_label, status_line, Status};
use classforge::core::logging::init_logging;
use classforge::plugins::class::{ClassDatabase, ClassEntity};
use classforge::plugins::java::{EmitterConfig, GeneratedArtifact, GenerationReport};
use classforge::plugins::Orchestrator;

const REPORT_FILE: &str = "Report.md";

/// Classforge - Generate Java sources from draw.io class diagrams
#[derive(Parser)]
#[command(name = "classforge")]
#[command(about = "A Rust utility to generate Java class skeletons from draw.io class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one Java source file per class of the diagram
    Generate {
        /// draw.io file to read (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Java package of the generated classes
        #[arg(short, long)]
        package: Option<String>,

        /// Directory the sources are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Do not write Report.md
        #[arg(long)]
        no_report: bool,

        /// When to use colors in status output
        #[arg(
            long,
            value_enum,
            default_value_t = ColorChoice::Auto
        )]
        color: ColorChoice,
    },

    /// Print the class model recovered from a diagram
    Inspect {
        /// draw.io file to read (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the model as JSON
        #[arg(long)]
        json: bool,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Options of one `generate` run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub package: Option<String>,
    pub output_dir: PathBuf,
    pub overwrite: bool,
    pub write_report: bool,
    pub colorize: bool,
}

/// Main CLI application
pub struct ClassforgeApp {
    orchestrator: Orchestrator,
}

impl ClassforgeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("CLASSFORGE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CLASSFORGE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classforge v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                package,
                output_dir,
                overwrite,
                no_report,
                color,
            } => {
                let options = GenerateOptions {
                    package,
                    output_dir,
                    overwrite,
                    write_report: !no_report,
                    colorize: self.should_colorize(color),
                };
                self.generate_command(input, &options, cli.verbose)
                    .map(|_| ())
            }
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
        }
    }

    /// Determine if status output should be colorized
    fn should_colorize(&self, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                crossterm::tty::IsTty::is_tty(&std::io::stdout())
            }
        }
    }

    /// Handle the generate command
    pub fn generate_command(
        &self,
        input: Option<PathBuf>,
        options: &GenerateOptions,
        verbose: bool,
    ) -> Result<GenerationReport> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.orchestrator.analyze_source(&content)?;
        let config = match &options.package {
            Some(package) => EmitterConfig::new().with_package(package.as_str()),
            None => EmitterConfig::new(),
        };
        let artifacts = Orchestrator::with_emitter_config(config).generate(&database)?;

        if verbose {
            eprintln!(
                "Analyzed {} classes, generated {} sources",
                database.class_count(),
                artifacts.len()
            );
        }

        let report = self.write_artifacts(&artifacts, options)?;

        if options.write_report {
            let report_path = options.output_dir.join(REPORT_FILE);
            fs::write(&report_path, report.to_markdown()).map_err(|e| {
                anyhow!("Failed to write report '{}': {}", report_path.display(), e)
            })?;
            println!(
                "{}",
                status_line(Status::Report, &report_path.display().to_string(), options.colorize)
            );
        }

        Ok(report)
    }

    /// Write every artifact below the output directory
    ///
    /// Existing files are left alone unless `overwrite` is set; they are
    /// listed as skipped in the returned report.
    pub fn write_artifacts(
        &self,
        artifacts: &[GeneratedArtifact],
        options: &GenerateOptions,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::new();

        for artifact in artifacts {
            let path = options.output_dir.join(&artifact.file_name);
            let exists = path.exists();

            if exists && !options.overwrite {
                report.skip(artifact.file_name.clone());
                println!("{}", status_line(Status::Skipped, &artifact.file_name, options.colorize));
                continue;
            }

            write_file(&path, &artifact.content)?;
            report.add(artifact.report.clone());

            let status = if exists {
                Status::Overwritten
            } else {
                Status::Generated
            };
            println!("{}", status_line(status, &artifact.file_name, options.colorize));
        }

        Ok(report)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.orchestrator.analyze_source(&content)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&database)?);
        } else {
            let colorize = self.should_colorize(ColorChoice::Auto);
            print!("{}", describe_model(&database, colorize));
            io::stdout().flush()?;
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for ClassforgeApp {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create directory '{}': {}", parent.display(), e))?;
    }
    fs::write(path, content)
        .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))
}

fn describe_class(class: &ClassEntity, colorize: bool) -> String {
    let mut out = format!("{} {}", kind_label(class.kind, colorize), class.name);
    if let Some(superclass) = &class.superclass {
        out.push_str(&format!(" extends {}", superclass));
    }
    if !class.interfaces.is_empty() {
        out.push_str(&format!(" implements {}", class.interfaces.join(", ")));
    }
    out.push('\n');

    for field in &class.fields {
        out.push_str(&format!(
            "    {} {}: {}\n",
            field.visibility, field.name, field.field_type
        ));
    }
    for method in &class.methods {
        let marker = if method.is_override {
            " [override]"
        } else if method.is_abstract {
            " [abstract]"
        } else {
            ""
        };
        out.push_str(&format!(
            "    {} {}({}): {}{}\n",
            method.visibility, method.name, method.parameters, method.return_type, marker
        ));
    }
    out
}

/// Human-readable listing of a class model
fn describe_model(database: &ClassDatabase, colorize: bool) -> String {
    let mut out = String::new();
    for class in database.classes() {
        out.push_str(&describe_class(class, colorize));
    }
    out.push_str(&format!("{} classes\n", database.class_count()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const DIAGRAM: &str = r#"<mxfile><diagram name="Page-1"><mxGraphModel><root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
        <mxCell id="2" value="&lt;i&gt;Animal&lt;/i&gt;" style="swimlane;" vertex="1" parent="1" />
        <mxCell id="3" value="&lt;i&gt;+speak(): String&lt;/i&gt;" style="text;" vertex="1" parent="2" />
        <mxCell id="4" value="Dog" style="swimlane;" vertex="1" parent="1" />
        <mxCell id="5" value="-name: String" style="text;" vertex="1" parent="4" />
        <mxCell id="6" style="endArrow=block;endFill=0;" edge="1" parent="1" source="4" target="2" />
    </root></mxGraphModel></diagram></mxfile>"#;

    fn options(output_dir: &Path) -> GenerateOptions {
        GenerateOptions {
            package: None,
            output_dir: output_dir.to_path_buf(),
            overwrite: false,
            write_report: true,
            colorize: false,
        }
    }

    fn diagram_file(dir: &Path) -> PathBuf {
        let path = dir.join("zoo.drawio");
        fs::write(&path, DIAGRAM).unwrap();
        path
    }

    #[test]
    fn test_cli_parsing_generate_command() {
        let args = vec![
            "classforge",
            "generate",
            "--input",
            "zoo.drawio",
            "--package",
            "com.zoo",
            "--output-dir",
            "out",
            "--overwrite",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Generate {
                input,
                package,
                output_dir,
                overwrite,
                no_report,
                color,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "zoo.drawio");
                assert_eq!(package.as_deref(), Some("com.zoo"));
                assert_eq!(output_dir.to_string_lossy(), "out");
                assert!(overwrite);
                assert!(!no_report);
                assert_eq!(color, ColorChoice::Auto); // default
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parsing_generate_defaults() {
        let cli = Cli::try_parse_from(["classforge", "generate", "--no-report", "--color", "never"])
            .unwrap();

        match cli.command {
            Commands::Generate {
                input,
                output_dir,
                no_report,
                color,
                ..
            } => {
                assert!(input.is_none());
                assert_eq!(output_dir, PathBuf::from("."));
                assert!(no_report);
                assert_eq!(color, ColorChoice::Never);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parsing_inspect_command() {
        let cli = Cli::try_parse_from(["classforge", "inspect", "-i", "zoo.drawio", "--json"]).unwrap();

        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input.unwrap().to_string_lossy(), "zoo.drawio");
                assert!(json);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "classforge",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "inspect",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        assert!(Cli::try_parse_from(["classforge", "generate", "--color", "sometimes"]).is_err());
    }

    #[test]
    fn test_classforge_app_default() {
        let app = ClassforgeApp::default();
        assert_eq!(app.orchestrator().stage_names().len(), 4);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let path = diagram_file(dir.path());

        assert_eq!(app.read_input(Some(path)).unwrap(), DIAGRAM);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();

        let error = app.read_input(Some(dir.path().join("nope.drawio"))).unwrap_err();
        assert!(error.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_generate_writes_sources_and_report() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let input = diagram_file(dir.path());
        let out = dir.path().join("src");

        let report = app
            .generate_command(Some(input), &options(&out), false)
            .unwrap();

        assert_eq!(report.entries.len(), 2);
        assert!(report.skipped.is_empty());

        let dog = fs::read_to_string(out.join("Dog.java")).unwrap();
        assert!(dog.contains("public class Dog extends Animal {"));
        assert!(dog.contains("    @Override\n    public String speak() {\n"));

        let report_md = fs::read_to_string(out.join("Report.md")).unwrap();
        assert!(report_md.starts_with("# Generation Report"));
        assert!(report_md.contains("## Dog"));
    }

    #[test]
    fn test_generate_with_package_creates_directories() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let input = diagram_file(dir.path());
        let mut options = options(dir.path());
        options.package = Some("com.zoo".to_string());
        options.write_report = false;

        app.generate_command(Some(input), &options, false).unwrap();

        let animal = fs::read_to_string(dir.path().join("com/zoo/Animal.java")).unwrap();
        assert!(animal.starts_with("package com.zoo;\n"));
        assert!(!dir.path().join("Report.md").exists());
    }

    #[test]
    fn test_generate_keeps_existing_files() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let input = diagram_file(dir.path());
        fs::write(dir.path().join("Dog.java"), "// hand written").unwrap();

        let report = app
            .generate_command(Some(input.clone()), &options(dir.path()), false)
            .unwrap();

        assert_eq!(report.skipped, vec!["Dog.java"]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("Dog.java")).unwrap(),
            "// hand written"
        );
        let report_md = fs::read_to_string(dir.path().join("Report.md")).unwrap();
        assert!(report_md.contains("Dog.java already exists"));

        let mut overwrite = options(dir.path());
        overwrite.overwrite = true;
        let report = app.generate_command(Some(input), &overwrite, false).unwrap();
        assert!(report.skipped.is_empty());
        assert!(fs::read_to_string(dir.path().join("Dog.java"))
            .unwrap()
            .contains("public class Dog"));
    }

    #[test]
    fn test_generate_rejects_non_drawio_input() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let input = dir.path().join("diagram.mmd");
        fs::write(&input, "classDiagram\n  Animal <|-- Dog\n").unwrap();

        assert!(app
            .generate_command(Some(input), &options(dir.path()), false)
            .is_err());
    }

    #[test]
    fn test_describe_model() {
        let app = ClassforgeApp::new();
        let database = app.orchestrator().analyze_source(DIAGRAM).unwrap();

        let text = describe_model(&database, false);
        assert!(text.contains("abstract Animal\n"));
        assert!(text.contains("class Dog extends Animal\n"));
        assert!(text.contains("    private name: String\n"));
        assert!(text.contains("    public speak(): String [override]\n"));
        assert!(text.ends_with("2 classes\n"));
    }
}
