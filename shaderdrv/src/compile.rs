//! Shader compilation driver

use crate::{
    ChildProcess, CommandLine, EnvSdkLocator, ProcessRunner, Result, SdkLocator, ShaderOptions,
};
use log::{debug, info};
use std::path::PathBuf;

/// Error-stream messages that compilers print on success and that must not
/// count as a failure.
pub const BENIGN_DIAGNOSTICS: &[&str] = &["warning: DXIL.dll not found."];

fn is_benign(line: &str) -> bool {
    BENIGN_DIAGNOSTICS.iter().any(|message| line.contains(message))
}

/// Result of running the external compiler once
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// The command that was run
    pub command: CommandLine,
    /// File the compiler was told to write
    pub output_file: PathBuf,
    /// Compiler exit code, passed through unchanged
    pub exit_code: i32,
    /// Standard output lines
    pub stdout: Vec<String>,
    /// Standard error lines with benign diagnostics removed
    pub stderr: Vec<String>,
}

impl CompileOutcome {
    /// A compile fails when the compiler exits nonzero or reports errors.
    pub fn is_failure(&self) -> bool {
        self.exit_code != 0 || !self.stderr.is_empty()
    }

    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    /// Error output joined into one newline-terminated block
    pub fn error_text(&self) -> String {
        self.stderr.iter().map(|line| format!("{line}\n")).collect()
    }
}

/// Builder for one compiler invocation
///
/// # Example
/// ```no_run
/// use shaderdrv::{CompileBuilder, ShaderOptions};
///
/// let mut options = ShaderOptions::new();
/// options.set_backend("dxc").unwrap();
/// options.set_stage("pixel").unwrap();
/// options.set_profile("6.5").unwrap();
/// options.set_output_dir("build/shaders");
/// options.set_input_file("shaders/shader.hlsl");
///
/// let outcome = CompileBuilder::new(options)
///     .working_dir(".")
///     .compile()
///     .unwrap();
/// std::process::exit(outcome.exit_code);
/// ```
pub struct CompileBuilder<'a> {
    options: ShaderOptions,
    locator: &'a dyn SdkLocator,
    runner: &'a dyn ProcessRunner,
    working_dir: Option<PathBuf>,
}

impl<'a> CompileBuilder<'a> {
    /// Creates a builder that reads `VULKAN_SDK` and runs a real child process.
    pub fn new(options: ShaderOptions) -> Self {
        CompileBuilder {
            options,
            locator: &EnvSdkLocator,
            runner: &ChildProcess,
            working_dir: None,
        }
    }

    /// Replaces the Vulkan SDK lookup.
    pub fn locator(mut self, locator: &'a dyn SdkLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Replaces the process runner.
    pub fn runner(mut self, runner: &'a dyn ProcessRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Sets the compiler's working directory (default: [`default_working_dir`]).
    pub fn working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Normalizes paths, builds the command and runs it to completion.
    ///
    /// Errors only when the compiler cannot be launched or its output cannot
    /// be read; a failed compile is reported through [`CompileOutcome`].
    pub fn compile(mut self) -> Result<CompileOutcome> {
        self.options.normalize_paths()?;

        let command = CommandLine::new(&self.options, self.locator);
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => default_working_dir()?,
        };
        debug!("Full command: {}", command);
        debug!("Working dir: {}", working_dir.display());

        let output = self.runner.run(&command, &working_dir)?;

        let outcome = CompileOutcome {
            output_file: self.options.output_file(),
            command,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output
                .stderr
                .into_iter()
                .filter(|line| !is_benign(line))
                .collect(),
        };

        if outcome.is_failure() {
            debug!("Compiler exited with code {}", outcome.exit_code);
        } else {
            info!(
                "Compiled {} -> {}",
                self.options.input_file().display(),
                outcome.output_file.display()
            );
        }

        Ok(outcome)
    }
}

/// Convenience function that compiles with the default locator, runner and
/// working directory.
///
/// # Example
/// ```no_run
/// use shaderdrv::ShaderOptions;
///
/// let mut options = ShaderOptions::new();
/// options.set_backend("fxc").unwrap();
/// options.set_profile("5.1").unwrap();
/// options.set_output_dir("build/shaders");
/// options.set_input_file("shaders/shader.hlsl");
///
/// let outcome = shaderdrv::compile(options).unwrap();
/// assert!(outcome.output_file.ends_with("shader.cso"));
/// ```
pub fn compile(options: ShaderOptions) -> Result<CompileOutcome> {
    CompileBuilder::new(options).compile()
}

/// Directory containing the running executable.
///
/// The relative DXC fallback path is resolved against it.
pub fn default_working_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    match exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}
