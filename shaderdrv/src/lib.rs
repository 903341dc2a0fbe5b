//! Shader compilation driver for external toolchains
//!
//! Maps a (compiler, stage, profile, SPIR-V) selection onto the exact
//! command line of DXC, FXC or glslc, runs the compiler as a child process
//! and reports its output and exit code.
//!
//! # Example
//!
//! ```
//! use shaderdrv::{ShaderOptions, build_full_command};
//!
//! let mut options = ShaderOptions::new();
//! options.set_backend("glslc").unwrap();
//! options.set_stage("vertex").unwrap();
//! options.set_profile("1.3").unwrap();
//! options.set_output_dir("/out");
//! options.set_input_file("/src/tri.vert");
//!
//! # #[cfg(unix)]
//! assert_eq!(
//!     build_full_command(&options),
//!     "-DGLSL -DVK -fshader-stage=vert --target-spv=spv1.3 --target-env=vulkan1.2   -o /out/tri.spv /src/tri.vert"
//! );
//! ```

mod command;
mod compile;
mod error;
mod flags;
mod options;
mod path;
mod process;
mod target;
mod toolchain;

pub use command::{
    CommandLine, build_full_command, compile_flags, defines, include_flags, output_flag,
    spirv_cross_flag, stage_and_profile_flag,
};
pub use compile::{
    BENIGN_DIAGNOSTICS, CompileBuilder, CompileOutcome, compile, default_working_dir,
};
pub use error::{ConfigWarning, Error, Result};
pub use flags::CompileFlags;
pub use options::{Profile, ShaderOptions};
pub use process::{ChildProcess, ProcessOutput, ProcessRunner};
pub use target::{Backend, BackendFamily, ShaderModel, ShaderStage, SpirvVersion, VulkanEnv};
pub use toolchain::{
    DXC_FALLBACK_DIR, EnvSdkLocator, SdkLocator, VULKAN_SDK_VAR, resolve_executable,
};
