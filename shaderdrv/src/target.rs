//! Shader target types (stage, backend, profile)

use crate::ConfigWarning;
use std::fmt;
use std::str::FromStr;

/// Pipeline stage a shader is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderStage {
    /// Vertex shader
    #[default]
    Vertex,
    /// Pixel (fragment) shader
    Pixel,
    /// Geometry shader
    Geometry,
    /// Hull (tessellation control) shader
    Hull,
    /// Domain (tessellation evaluation) shader
    Domain,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::Pixel,
        ShaderStage::Geometry,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Compute,
    ];

    /// Returns the DirectX target prefix (vs, ps, gs, hs, ds, cs)
    pub fn prefix(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Geometry => "gs",
            ShaderStage::Hull => "hs",
            ShaderStage::Domain => "ds",
            ShaderStage::Compute => "cs",
        }
    }

    /// Returns the glslc stage name (vert, frag, geom, tesc, tese, comp)
    pub fn vulkan_name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Pixel => "frag",
            ShaderStage::Geometry => "geom",
            ShaderStage::Hull => "tesc",
            ShaderStage::Domain => "tese",
            ShaderStage::Compute => "comp",
        }
    }

    /// Returns the name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Pixel => "Pixel",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Hull => "Hull",
            ShaderStage::Domain => "Domain",
            ShaderStage::Compute => "Compute",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderStage {
    type Err = ConfigWarning;

    /// Case-insensitive match against the stage names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShaderStage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigWarning::UnknownStage(s.to_string()))
    }
}

/// Flag grammar shared by a group of backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendFamily {
    /// HLSL compilers taking `-T <stage>_<model>` (DXC, FXC)
    DirectX,
    /// GLSL compiler emitting SPIR-V (glslc)
    Vulkan,
}

/// External shader compiler toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// DirectX Shader Compiler (DXIL, or SPIR-V with `-spirv`)
    #[default]
    Dxc,
    /// Legacy DirectX compiler (DXBC, shader model 5.x only)
    Fxc,
    /// Shaderc GLSL compiler
    Glslc,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Dxc, Backend::Fxc, Backend::Glslc];

    pub fn family(&self) -> BackendFamily {
        match self {
            Backend::Dxc | Backend::Fxc => BackendFamily::DirectX,
            Backend::Glslc => BackendFamily::Vulkan,
        }
    }

    pub fn is_directx(&self) -> bool {
        self.family() == BackendFamily::DirectX
    }

    /// Returns the lowercase name, which is also the executable name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Dxc => "dxc",
            Backend::Fxc => "fxc",
            Backend::Glslc => "glslc",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = ConfigWarning;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::ALL
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigWarning::UnknownBackend(s.to_string()))
    }
}

/// DirectX shader model version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ShaderModel {
    /// Shader Model 5.0
    SM5_0,
    /// Shader Model 5.1
    SM5_1,
    /// Shader Model 6.0
    #[default]
    SM6_0,
    /// Shader Model 6.1
    SM6_1,
    /// Shader Model 6.2
    SM6_2,
    /// Shader Model 6.3
    SM6_3,
    /// Shader Model 6.4
    SM6_4,
    /// Shader Model 6.5
    SM6_5,
    /// Shader Model 6.6
    SM6_6,
}

impl ShaderModel {
    pub const ALL: [ShaderModel; 9] = [
        ShaderModel::SM5_0,
        ShaderModel::SM5_1,
        ShaderModel::SM6_0,
        ShaderModel::SM6_1,
        ShaderModel::SM6_2,
        ShaderModel::SM6_3,
        ShaderModel::SM6_4,
        ShaderModel::SM6_5,
        ShaderModel::SM6_6,
    ];

    /// Returns the profile suffix used in `-T` (5_0, 5_1, 6_0, etc.)
    pub fn suffix(&self) -> &'static str {
        match self {
            ShaderModel::SM5_0 => "5_0",
            ShaderModel::SM5_1 => "5_1",
            ShaderModel::SM6_0 => "6_0",
            ShaderModel::SM6_1 => "6_1",
            ShaderModel::SM6_2 => "6_2",
            ShaderModel::SM6_3 => "6_3",
            ShaderModel::SM6_4 => "6_4",
            ShaderModel::SM6_5 => "6_5",
            ShaderModel::SM6_6 => "6_6",
        }
    }

    /// Returns the dotted version string accepted by `--profile`
    pub fn version(&self) -> &'static str {
        match self {
            ShaderModel::SM5_0 => "5.0",
            ShaderModel::SM5_1 => "5.1",
            ShaderModel::SM6_0 => "6.0",
            ShaderModel::SM6_1 => "6.1",
            ShaderModel::SM6_2 => "6.2",
            ShaderModel::SM6_3 => "6.3",
            ShaderModel::SM6_4 => "6.4",
            ShaderModel::SM6_5 => "6.5",
            ShaderModel::SM6_6 => "6.6",
        }
    }

    /// FXC only understands the 5.x models
    pub fn is_fxc_compatible(&self) -> bool {
        matches!(self, ShaderModel::SM5_0 | ShaderModel::SM5_1)
    }
}

impl fmt::Display for ShaderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ShaderModel {
    type Err = ConfigWarning;

    /// Exact match against the dotted version strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShaderModel::ALL
            .into_iter()
            .find(|model| model.version() == s)
            .ok_or_else(|| ConfigWarning::UnknownProfile {
                backend: Backend::Dxc,
                profile: s.to_string(),
            })
    }
}

/// Vulkan target environment passed to glslc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VulkanEnv {
    Vulkan1_0,
    Vulkan1_1,
    Vulkan1_2,
}

impl VulkanEnv {
    pub fn version(&self) -> &'static str {
        match self {
            VulkanEnv::Vulkan1_0 => "1.0",
            VulkanEnv::Vulkan1_1 => "1.1",
            VulkanEnv::Vulkan1_2 => "1.2",
        }
    }
}

impl fmt::Display for VulkanEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vulkan{}", self.version())
    }
}

/// SPIR-V version targeted by glslc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SpirvVersion {
    Spv1_0,
    Spv1_1,
    Spv1_2,
    Spv1_3,
    Spv1_4,
    #[default]
    Spv1_5,
}

impl SpirvVersion {
    pub const ALL: [SpirvVersion; 6] = [
        SpirvVersion::Spv1_0,
        SpirvVersion::Spv1_1,
        SpirvVersion::Spv1_2,
        SpirvVersion::Spv1_3,
        SpirvVersion::Spv1_4,
        SpirvVersion::Spv1_5,
    ];

    pub fn version(&self) -> &'static str {
        match self {
            SpirvVersion::Spv1_0 => "1.0",
            SpirvVersion::Spv1_1 => "1.1",
            SpirvVersion::Spv1_2 => "1.2",
            SpirvVersion::Spv1_3 => "1.3",
            SpirvVersion::Spv1_4 => "1.4",
            SpirvVersion::Spv1_5 => "1.5",
        }
    }

    /// Fixed SPIR-V to Vulkan environment table. Several versions share an environment.
    pub fn target_env(&self) -> VulkanEnv {
        match self {
            SpirvVersion::Spv1_0 => VulkanEnv::Vulkan1_0,
            SpirvVersion::Spv1_1 | SpirvVersion::Spv1_2 => VulkanEnv::Vulkan1_1,
            SpirvVersion::Spv1_3 | SpirvVersion::Spv1_4 | SpirvVersion::Spv1_5 => {
                VulkanEnv::Vulkan1_2
            }
        }
    }
}

impl fmt::Display for SpirvVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spv{}", self.version())
    }
}

impl FromStr for SpirvVersion {
    type Err = ConfigWarning;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpirvVersion::ALL
            .into_iter()
            .find(|version| version.version() == s)
            .ok_or_else(|| ConfigWarning::UnknownProfile {
                backend: Backend::Glslc,
                profile: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let dx: Vec<_> = ShaderStage::ALL.iter().map(|s| s.prefix()).collect();
        let vk: Vec<_> = ShaderStage::ALL.iter().map(|s| s.vulkan_name()).collect();
        assert_eq!(dx, ["vs", "ps", "gs", "hs", "ds", "cs"]);
        assert_eq!(vk, ["vert", "frag", "geom", "tesc", "tese", "comp"]);
    }

    #[test]
    fn test_stage_parse_is_case_insensitive() {
        assert_eq!("pixel".parse::<ShaderStage>().unwrap(), ShaderStage::Pixel);
        assert_eq!("COMPUTE".parse::<ShaderStage>().unwrap(), ShaderStage::Compute);
        assert_eq!("hUlL".parse::<ShaderStage>().unwrap(), ShaderStage::Hull);
        assert!("fragment".parse::<ShaderStage>().is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("DXC".parse::<Backend>().unwrap(), Backend::Dxc);
        assert_eq!("fxc".parse::<Backend>().unwrap(), Backend::Fxc);
        assert_eq!("GlslC".parse::<Backend>().unwrap(), Backend::Glslc);
        assert_eq!(
            "slangc".parse::<Backend>(),
            Err(ConfigWarning::UnknownBackend("slangc".to_string()))
        );
    }

    #[test]
    fn test_backend_family() {
        assert_eq!(Backend::Dxc.family(), BackendFamily::DirectX);
        assert_eq!(Backend::Fxc.family(), BackendFamily::DirectX);
        assert_eq!(Backend::Glslc.family(), BackendFamily::Vulkan);
    }

    #[test]
    fn test_shader_model_strings() {
        assert_eq!("6.3".parse::<ShaderModel>().unwrap().suffix(), "6_3");
        assert_eq!(ShaderModel::SM5_1.to_string(), "5_1");
        assert!("6_3".parse::<ShaderModel>().is_err());
        assert!("6.7".parse::<ShaderModel>().is_err());
    }

    #[test]
    fn test_fxc_compatible_models() {
        let fxc: Vec<_> = ShaderModel::ALL
            .into_iter()
            .filter(ShaderModel::is_fxc_compatible)
            .collect();
        assert_eq!(fxc, [ShaderModel::SM5_0, ShaderModel::SM5_1]);
    }

    #[test]
    fn test_spirv_target_env_table() {
        let envs: Vec<_> = SpirvVersion::ALL
            .iter()
            .map(|v| v.target_env().to_string())
            .collect();
        assert_eq!(
            envs,
            ["vulkan1.0", "vulkan1.1", "vulkan1.1", "vulkan1.2", "vulkan1.2", "vulkan1.2"]
        );
        assert_eq!(SpirvVersion::Spv1_4.to_string(), "spv1.4");
    }
}
