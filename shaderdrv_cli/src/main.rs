//! Shader compiler driver CLI

use clap::{ArgAction, Parser};
use log::{LevelFilter, info};
use shaderdrv::{CompileBuilder, CompileFlags, CompileOutcome, ShaderOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shaderdrv")]
#[command(about = "Compiles a shader with dxc, fxc or glslc", long_about = None)]
struct Cli {
    /// Compiler name (dxc, fxc, glslc)
    #[arg(long)]
    compiler: Option<String>,

    /// Shader stage (Vertex, Pixel, Geometry, Hull, Domain, Compute)
    #[arg(long = "shader_stage")]
    shader_stage: Option<String>,

    /// Shader profile (5.0-6.6 for dxc, 5.0/5.1 for fxc, SPIR-V 1.0-1.5 for glslc)
    #[arg(long)]
    profile: Option<String>,

    /// SPIR-V code generation (dxc only)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    spirv: bool,

    /// Compiled shader output directory
    #[arg(long = "output_dir", value_parser = existing_dir)]
    output_dir: PathBuf,

    /// Any additional include paths
    #[arg(long = "include_paths", num_args = 0.., value_parser = existing_dir)]
    include_paths: Vec<PathBuf>,

    /// Shader input file
    #[arg(long = "input_file", value_parser = existing_file)]
    input_file: PathBuf,

    /// Working directory for the compiler (default: this executable's directory)
    #[arg(long = "working_dir", value_parser = existing_dir)]
    working_dir: Option<PathBuf>,

    /// Embed debug information
    #[arg(long = "debug_info")]
    debug_info: bool,

    /// Disable optimizations
    #[arg(long = "skip_optimization")]
    skip_optimization: bool,

    /// Treat compiler warnings as errors
    #[arg(long = "warnings_as_errors")]
    warnings_as_errors: bool,

    /// Log the resolved command line
    #[arg(short, long)]
    verbose: bool,
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("Directory does not exist: {}", s))
    }
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File does not exist: {}", s))
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn options_from_cli(cli: &Cli) -> ShaderOptions {
    let mut options = ShaderOptions::new();

    // Bad values are logged by the setters and fall back to the previous value.
    // Backend goes first since the profile is validated against it.
    if let Some(compiler) = &cli.compiler {
        let _ = options.set_backend(compiler);
    }
    if let Some(stage) = &cli.shader_stage {
        let _ = options.set_stage(stage);
    }
    if let Some(profile) = &cli.profile {
        let _ = options.set_profile(profile);
    }
    options.set_spirv(cli.spirv);

    let mut flags = CompileFlags::empty();
    flags.set(CompileFlags::DEBUG_INFO, cli.debug_info);
    flags.set(CompileFlags::SKIP_OPTIMIZATION, cli.skip_optimization);
    flags.set(CompileFlags::WARNINGS_ARE_ERRORS, cli.warnings_as_errors);
    options.set_flags(flags);

    options.set_output_dir(&cli.output_dir);
    options.set_include_paths(&cli.include_paths);
    options.set_input_file(&cli.input_file);
    options
}

/// Runs the compiler and returns its exit code.
fn compile_shader(cli: Cli) -> Result<i32, String> {
    let options = options_from_cli(&cli);

    let outcome = match cli.working_dir {
        Some(dir) => CompileBuilder::new(options).working_dir(dir).compile(),
        None => shaderdrv::compile(options),
    }
    .map_err(|e| format!("{}", e))?;

    for line in &outcome.stdout {
        info!("{}", line);
    }

    if outcome.is_failure() {
        eprint!("{}", failure_report(&outcome));
    }

    Ok(outcome.exit_code)
}

fn failure_report(outcome: &CompileOutcome) -> String {
    format!(
        "Shader compilation had errors\nFull command: {}\n{}\n",
        outcome.command,
        outcome.error_text()
    )
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match compile_shader(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
