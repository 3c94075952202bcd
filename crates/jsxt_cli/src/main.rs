//! jsxt: The dialect transpiler CLI.
//!
//! Usage:
//!   jsxt [options] [file...]
//!
//! Each input file is transformed to a `.js` file beside it, or under
//! `--outDir`.

use clap::Parser as ClapParser;
use jsxt_core::text::char_to_byte_offset;
use jsxt_options::{ProjectConfig, TransformOptions};
use jsxt_parser::TranspileError;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use rayon::prelude::*;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

const CONFIG_FILE_NAME: &str = "jsxt.json";

#[derive(ClapParser, Debug)]
#[command(name = "jsxt", about = "jsxt - Transpile the XML script dialect to plain script", disable_version_flag = true)]
struct Cli {
    /// Source files to transform.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to jsxt.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Redirect output structure to the directory.
    #[arg(long = "outDir")]
    out_dir: Option<String>,

    /// Do not emit comments to output.
    #[arg(long = "removeComments")]
    remove_comments: bool,

    /// Disable the XML dialect for files without a .jsx extension.
    #[arg(long = "noJsx")]
    no_jsx: bool,

    /// Print transformed sources instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Initialize a jsxt.json file.
    #[arg(long)]
    init: bool,

    /// Print the transpiler version.
    #[arg(short = 'v', long)]
    version: bool,

    /// List all files that are part of the run.
    #[arg(long = "listFiles")]
    list_files: bool,
}

/// A failure to transform one file.
#[derive(Debug, Error, Diagnostic)]
enum FileError {
    #[error("Failed to read '{path}': {source}")]
    #[diagnostic(code(jsxt::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    #[diagnostic(code(jsxt::io))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output would overwrite its input '{path}'")]
    #[diagnostic(code(jsxt::io), help("pass --outDir or use a .jsx input"))]
    Overwrite { path: String },

    #[error("SyntaxError: {message} (line {line})")]
    #[diagnostic(code(jsxt::syntax))]
    Syntax {
        message: String,
        #[source_code]
        source_code: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        line: u32,
    },
}

impl FileError {
    fn syntax(error: TranspileError, source: String) -> Self {
        let offset = char_to_byte_offset(&source, error.pos);
        FileError::Syntax {
            message: error.message,
            source_code: NamedSource::new(error.path, source),
            span: (offset, 0).into(),
            line: error.line,
        }
    }
}

/// What a run produced for one file.
enum Transformed {
    Written(PathBuf),
    Printed(String),
}

fn main() {
    let filter = match EnvFilter::try_from_env("JSXT_LOG") {
        Ok(f) => f,
        Err(_) => EnvFilter::new("warn"),
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let cli = Cli::parse();

    if cli.version {
        println!("jsxt Version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if cli.init {
        run_init();
        return;
    }

    let exit_code = run_transform(&cli);
    process::exit(exit_code);
}

fn run_transform(cli: &Cli) -> i32 {
    let start = Instant::now();

    let (files, config) = resolve_input_files(cli);

    if files.is_empty() {
        print_error("No input files found.");
        return 1;
    }

    if cli.list_files {
        for f in &files {
            println!("{}", f);
        }
    }

    // CLI options override jsxt.json
    let mut options = config.as_ref().map(ProjectConfig::transform_options).unwrap_or_default();
    if cli.remove_comments {
        options.remove_comments = true;
    }
    if cli.no_jsx {
        options.jsx = false;
    }
    let out_dir = cli
        .out_dir
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.out_dir.clone()));

    let results: Vec<Result<Transformed, FileError>> = files
        .par_iter()
        .map(|file| transform_file(file, options, out_dir.as_deref(), cli.stdout))
        .collect();

    let mut error_count = 0;
    for result in results {
        match result {
            Ok(Transformed::Written(path)) => debug!(path = %path.display(), "wrote"),
            Ok(Transformed::Printed(output)) => println!("{}", output),
            Err(error) => {
                error_count += 1;
                eprintln!("{:?}", Report::new(error));
            }
        }
    }

    let elapsed = start.elapsed();
    info!(files = files.len(), seconds = elapsed.as_secs_f64(), "transform finished");

    if error_count > 0 {
        eprintln!(
            "\nFound {} error{}.",
            error_count,
            if error_count == 1 { "" } else { "s" }
        );
        return 1;
    }
    0
}

fn transform_file(
    file: &str,
    mut options: TransformOptions,
    out_dir: Option<&str>,
    stdout: bool,
) -> Result<Transformed, FileError> {
    let path = Path::new(file);
    let source = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: file.to_string(),
        source,
    })?;

    // A .jsx file is always written in the dialect.
    if path.extension().is_some_and(|ext| ext == "jsx") {
        options.jsx = true;
    }

    let output = match jsxt_parser::transform(&source, file, &options) {
        Ok(output) => output,
        Err(error) => return Err(FileError::syntax(error, source)),
    };

    if stdout {
        return Ok(Transformed::Printed(output));
    }

    let target = output_path(path, out_dir);
    if target == path {
        return Err(FileError::Overwrite { path: file.to_string() });
    }
    let write_error = |source| FileError::Write {
        path: target.to_string_lossy().to_string(),
        source,
    };
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(&target, output).map_err(write_error)?;
    Ok(Transformed::Written(target))
}

/// `<dir>/<stem>.js`, where `dir` is `out_dir` or the input's directory.
fn output_path(input: &Path, out_dir: Option<&str>) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".js");
    let dir = match out_dir {
        Some(dir) => PathBuf::from(dir),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(name)
}

fn run_init() {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        print_error("A jsxt.json file already exists in the current directory.");
        process::exit(1);
    }

    let default_config = r#"{
  "compilerOptions": {
    "jsx": true,
    "removeComments": false
  },
  "files": [],
  "outDir": "./out"
}
"#;

    match std::fs::write(config_path, default_config) {
        Ok(()) => println!("Successfully created a jsxt.json file."),
        Err(e) => {
            print_error(&format!("Failed to create jsxt.json: {}", e));
            process::exit(1);
        }
    }
}

fn resolve_input_files(cli: &Cli) -> (Vec<String>, Option<ProjectConfig>) {
    if let Some(ref project) = cli.project {
        match load_files_from_config(project) {
            Ok((files, config)) => (files, Some(config)),
            Err(e) => {
                print_error(&format!("Failed to read project '{}': {}", project, e));
                process::exit(1);
            }
        }
    } else if !cli.files.is_empty() {
        (cli.files.clone(), None)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        match load_files_from_config(CONFIG_FILE_NAME) {
            Ok((files, config)) => (files, Some(config)),
            Err(e) => {
                print_error(&format!("Failed to read jsxt.json: {}", e));
                process::exit(1);
            }
        }
    } else {
        (vec![], None)
    }
}

/// Files and output directory of a project file, relative to its directory.
fn load_files_from_config(path: &str) -> Result<(Vec<String>, ProjectConfig), Box<dyn std::error::Error>> {
    let mut config = jsxt_options::parse_config_file(path)?;
    let root_dir = Path::new(path).parent().map(Path::to_path_buf).unwrap_or_default();

    let files = config
        .files
        .iter()
        .flatten()
        .map(|f| root_dir.join(f).to_string_lossy().to_string())
        .collect();
    config.out_dir = config
        .out_dir
        .take()
        .map(|dir| root_dir.join(dir).to_string_lossy().to_string());

    Ok((files, config))
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("\x1b[1m\x1b[31merror\x1b[0m: {}", msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
