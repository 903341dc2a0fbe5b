//! Compiler executable resolution

use crate::{Backend, ShaderOptions};
use std::env::consts::EXE_SUFFIX;
use std::path::PathBuf;

/// Environment variable naming the Vulkan SDK root
pub const VULKAN_SDK_VAR: &str = "VULKAN_SDK";

/// DXC build used for SPIR-V when no Vulkan SDK is installed, relative to
/// the working directory the compiler is launched from.
pub const DXC_FALLBACK_DIR: &str = "../../../DXC";

/// Locates the Vulkan SDK, whose DXC build carries the SPIR-V backend.
///
/// Any `Fn() -> Option<PathBuf>` is a locator, so tests can pin a path:
///
/// ```
/// use shaderdrv::{ShaderOptions, resolve_executable};
/// use std::path::PathBuf;
///
/// let mut options = ShaderOptions::new();
/// options.set_spirv(true);
///
/// let sdk = || Some(PathBuf::from("/opt/vulkan"));
/// let exe = resolve_executable(&options, &sdk);
/// assert!(exe.starts_with("/opt/vulkan/bin"));
/// ```
pub trait SdkLocator {
    /// Returns the SDK root, or `None` when it is not installed.
    fn vulkan_sdk(&self) -> Option<PathBuf>;
}

impl<F> SdkLocator for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn vulkan_sdk(&self) -> Option<PathBuf> {
        self()
    }
}

/// Reads the SDK root from the `VULKAN_SDK` environment variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSdkLocator;

impl SdkLocator for EnvSdkLocator {
    fn vulkan_sdk(&self) -> Option<PathBuf> {
        std::env::var_os(VULKAN_SDK_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}

/// Returns the executable to launch for the configured backend.
///
/// Bare names are looked up on the search path by the OS. Only DXC with
/// SPIR-V output consults the locator.
pub fn resolve_executable(options: &ShaderOptions, locator: &dyn SdkLocator) -> PathBuf {
    match options.backend() {
        Backend::Dxc if options.spirv() => {
            let dxc = format!("dxc{EXE_SUFFIX}");
            match locator.vulkan_sdk() {
                Some(sdk) => sdk.join("bin").join(dxc),
                None => PathBuf::from(DXC_FALLBACK_DIR).join(dxc),
            }
        }
        backend => PathBuf::from(backend.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn no_sdk() -> Option<PathBuf> {
        None
    }

    fn options(backend: &str, spirv: bool) -> ShaderOptions {
        let mut options = ShaderOptions::new();
        options.set_backend(backend).unwrap();
        options.set_spirv(spirv);
        options
    }

    #[test]
    fn test_bare_names() {
        let sdk = || Some(PathBuf::from("/sdk"));
        assert_eq!(resolve_executable(&options("dxc", false), &sdk), Path::new("dxc"));
        assert_eq!(resolve_executable(&options("fxc", false), &sdk), Path::new("fxc"));
        assert_eq!(resolve_executable(&options("fxc", true), &sdk), Path::new("fxc"));
        assert_eq!(resolve_executable(&options("glslc", true), &sdk), Path::new("glslc"));
    }

    #[test]
    fn test_dxc_spirv_prefers_sdk() {
        let sdk = || Some(PathBuf::from("/opt/vulkan"));
        let exe = resolve_executable(&options("dxc", true), &sdk);
        assert_eq!(exe, Path::new("/opt/vulkan/bin").join(format!("dxc{EXE_SUFFIX}")));
    }

    #[test]
    fn test_dxc_spirv_fallback() {
        let exe = resolve_executable(&options("dxc", true), &no_sdk);
        assert_eq!(exe, Path::new("../../../DXC").join(format!("dxc{EXE_SUFFIX}")));
    }
}
