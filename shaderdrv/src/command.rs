//! Command line synthesis
//!
//! Pure translation from [`ShaderOptions`] to the arguments of the selected
//! compiler. Each segment is available on its own; [`build_full_command`]
//! joins them in the order the compilers expect.

use crate::{Backend, BackendFamily, SdkLocator, ShaderOptions, resolve_executable};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Preprocessor defines identifying the source language and graphics API.
///
/// DirectX family: `-DHLSL` plus `-DVK` (SPIR-V) or `-DDX12`. glslc: `-DGLSL -DVK`.
pub fn defines(options: &ShaderOptions) -> String {
    define_args(options).join(" ")
}

/// Stage and profile selection, e.g. `-T ps_6_3` or
/// `-fshader-stage=comp --target-spv=spv1.5 --target-env=vulkan1.2`.
pub fn stage_and_profile_flag(options: &ShaderOptions) -> String {
    stage_args(options).join(" ")
}

/// `-spirv -fvk-use-dx-layout` for DXC with SPIR-V output, empty otherwise.
pub fn spirv_cross_flag(options: &ShaderOptions) -> String {
    spirv_args(options).join(" ")
}

/// Optional debug/optimization switches, empty unless flags were set.
pub fn compile_flags(options: &ShaderOptions) -> String {
    options.flags().switches(options.family()).join(" ")
}

/// `-I <path>` for every include directory in insertion order.
///
/// Entries are appended back to back with nothing between one path and the
/// next `-I`.
pub fn include_flags(options: &ShaderOptions) -> String {
    options
        .include_paths()
        .iter()
        .map(|dir| format!("-I {}", dir.display()))
        .collect()
}

/// `-Fo <file>` or `-o <file>`
pub fn output_flag(options: &ShaderOptions) -> String {
    format!(
        "{} {}",
        options.output_flag_prefix(),
        options.output_file().display()
    )
}

/// Full argument string: defines, stage/profile, SPIR-V flag, includes,
/// output flag and input file, separated by single spaces.
///
/// Empty segments are kept, which leaves runs of spaces in the string.
/// Compile flags, when any are set, follow the defines.
pub fn build_full_command(options: &ShaderOptions) -> String {
    let mut segments = vec![defines(options)];
    if !options.flags().is_empty() {
        segments.push(compile_flags(options));
    }
    segments.extend([
        stage_and_profile_flag(options),
        spirv_cross_flag(options),
        include_flags(options),
        output_flag(options),
        options.input_file().display().to_string(),
    ]);
    segments.join(" ")
}

fn define_args(options: &ShaderOptions) -> Vec<&'static str> {
    match options.family() {
        BackendFamily::DirectX if options.spirv() => vec!["-DHLSL", "-DVK"],
        BackendFamily::DirectX => vec!["-DHLSL", "-DDX12"],
        BackendFamily::Vulkan => vec!["-DGLSL", "-DVK"],
    }
}

fn stage_args(options: &ShaderOptions) -> Vec<String> {
    let stage = options.stage();
    match options.family() {
        BackendFamily::DirectX => vec![
            "-T".to_string(),
            format!("{}_{}", stage.prefix(), options.shader_model().suffix()),
        ],
        BackendFamily::Vulkan => {
            let version = options.spirv_version();
            vec![
                format!("-fshader-stage={}", stage.vulkan_name()),
                format!("--target-spv={}", version),
                format!("--target-env={}", version.target_env()),
            ]
        }
    }
}

fn spirv_args(options: &ShaderOptions) -> Vec<&'static str> {
    match options.backend() {
        Backend::Dxc if options.spirv() => vec!["-spirv", "-fvk-use-dx-layout"],
        Backend::Dxc | Backend::Fxc | Backend::Glslc => Vec::new(),
    }
}

fn argument_vector(options: &ShaderOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = define_args(options).into_iter().map(Into::into).collect();
    args.extend(
        options
            .flags()
            .switches(options.family())
            .into_iter()
            .map(OsString::from),
    );
    args.extend(stage_args(options).into_iter().map(OsString::from));
    args.extend(spirv_args(options).into_iter().map(OsString::from));
    for dir in options.include_paths() {
        args.push("-I".into());
        args.push(dir.into());
    }
    args.push(options.output_flag_prefix().into());
    args.push(options.output_file().into());
    args.push(options.input_file().into());
    args
}

/// A fully resolved compiler invocation.
///
/// Holds the executable, the argument string as reported to the user and
/// the equivalent argument vector used to launch the process.
///
/// # Example
/// ```
/// use shaderdrv::{CommandLine, EnvSdkLocator, ShaderOptions};
///
/// let mut options = ShaderOptions::new();
/// options.set_backend("glslc").unwrap();
/// options.set_profile("1.0").unwrap();
/// options.set_output_dir("/out");
/// options.set_input_file("/src/tri.vert");
///
/// let command = CommandLine::new(&options, &EnvSdkLocator);
/// assert_eq!(command.executable().to_str(), Some("glslc"));
/// assert!(command.as_str().contains("--target-env=vulkan1.0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    executable: PathBuf,
    text: String,
    args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(options: &ShaderOptions, locator: &dyn SdkLocator) -> Self {
        CommandLine {
            executable: resolve_executable(options, locator),
            text: build_full_command(options),
            args: argument_vector(options),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The argument string, without the executable
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Arguments split at segment boundaries, paths kept whole
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.executable.display(), self.text)
    }
}
