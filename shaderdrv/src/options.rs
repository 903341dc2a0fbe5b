//! Shader compile options

use crate::{
    Backend, BackendFamily, CompileFlags, ConfigWarning, Error, Result, ShaderModel, ShaderStage,
    SpirvVersion, path,
};
use log::warn;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Profile of the active backend family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Shader model for DXC / FXC
    DirectX(ShaderModel),
    /// SPIR-V version for glslc
    Vulkan(SpirvVersion),
}

/// Configuration for compiling a single shader.
///
/// Setters take loosely-typed input and never fail hard. An unrecognized
/// value keeps the previous setting and comes back as a [`ConfigWarning`],
/// which is also logged and kept in [`ShaderOptions::warnings`].
///
/// # Example
/// ```
/// use shaderdrv::{Backend, ShaderOptions, ShaderStage};
///
/// let mut options = ShaderOptions::new();
/// options.set_backend("fxc").unwrap();
/// options.set_stage("pixel").unwrap();
/// assert!(options.set_profile("6.0").is_err());
///
/// assert_eq!(options.backend(), Backend::Fxc);
/// assert_eq!(options.stage(), ShaderStage::Pixel);
/// assert_eq!(options.warnings().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShaderOptions {
    backend: Backend,
    stage: ShaderStage,
    shader_model: ShaderModel,
    spirv_version: SpirvVersion,
    spirv: bool,
    flags: CompileFlags,
    output_dir: PathBuf,
    include_paths: Vec<PathBuf>,
    input_file: PathBuf,
    warnings: Vec<ConfigWarning>,
}

impl ShaderOptions {
    /// Creates options with the defaults: DXC, vertex stage, SM 6.0, SPIR-V 1.5, no SPIR-V codegen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the backend by name (case-insensitive).
    pub fn set_backend(&mut self, name: &str) -> std::result::Result<(), ConfigWarning> {
        let parsed = name.parse::<Backend>();
        self.apply(parsed, |options, backend| options.backend = backend)
    }

    /// Selects the stage by name (case-insensitive).
    pub fn set_stage(&mut self, name: &str) -> std::result::Result<(), ConfigWarning> {
        let parsed = name.parse::<ShaderStage>();
        self.apply(parsed, |options, stage| options.stage = stage)
    }

    /// Selects the profile, validated against the backend selected so far.
    ///
    /// DXC takes shader models 5.0 through 6.6, FXC only 5.0 and 5.1, glslc
    /// SPIR-V versions 1.0 through 1.5. Set the backend first: a profile set
    /// before it is validated against the default backend.
    pub fn set_profile(&mut self, text: &str) -> std::result::Result<(), ConfigWarning> {
        let backend = self.backend;
        let rejected = || ConfigWarning::UnknownProfile {
            backend,
            profile: text.to_string(),
        };

        let parsed = match backend {
            Backend::Dxc => text.parse::<ShaderModel>().map(Profile::DirectX),
            Backend::Fxc => text
                .parse::<ShaderModel>()
                .ok()
                .filter(ShaderModel::is_fxc_compatible)
                .map(Profile::DirectX)
                .ok_or_else(rejected),
            Backend::Glslc => text.parse::<SpirvVersion>().map(Profile::Vulkan),
        }
        .map_err(|_| rejected());

        self.apply(parsed, |options, profile| match profile {
            Profile::DirectX(model) => options.shader_model = model,
            Profile::Vulkan(version) => options.spirv_version = version,
        })
    }

    /// Requests SPIR-V output. Only DXC emits SPIR-V; FXC still switches
    /// the defines and the output extension. Ignored by glslc.
    pub fn set_spirv(&mut self, spirv: bool) {
        self.spirv = spirv;
    }

    pub fn set_flags(&mut self, flags: CompileFlags) {
        self.flags = flags;
    }

    pub fn set_output_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.output_dir = dir.into();
    }

    /// Replaces the include directories. Order is kept and duplicates are allowed.
    pub fn set_include_paths<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_paths = paths.into_iter().map(Into::into).collect();
    }

    pub fn set_input_file<P: Into<PathBuf>>(&mut self, file: P) {
        self.input_file = file.into();
    }

    /// Converts every stored path to absolute form.
    ///
    /// Fails only if the current directory cannot be read or the input file
    /// has no name to derive the output file from. Calling it again on
    /// normalized options changes nothing.
    pub fn normalize_paths(&mut self) -> Result<()> {
        self.output_dir = path::absolute(&self.output_dir)?;
        self.include_paths = self
            .include_paths
            .iter()
            .map(|dir| path::absolute(dir))
            .collect::<Result<_>>()?;
        self.input_file = path::absolute(&self.input_file)?;

        if self.input_file.file_stem().is_none() {
            return Err(Error::MissingFileStem(self.input_file.clone()));
        }
        Ok(())
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn family(&self) -> BackendFamily {
        self.backend.family()
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Returns the profile that applies to the active backend family
    pub fn profile(&self) -> Profile {
        match self.family() {
            BackendFamily::DirectX => Profile::DirectX(self.shader_model),
            BackendFamily::Vulkan => Profile::Vulkan(self.spirv_version),
        }
    }

    pub fn shader_model(&self) -> ShaderModel {
        self.shader_model
    }

    pub fn spirv_version(&self) -> SpirvVersion {
        self.spirv_version
    }

    pub fn spirv(&self) -> bool {
        self.spirv
    }

    pub fn flags(&self) -> CompileFlags {
        self.flags
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    /// Warnings raised by the setters so far, oldest first
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// True when the compiler is asked to emit SPIR-V rather than DirectX bytecode
    pub fn emits_spirv(&self) -> bool {
        !self.backend.is_directx() || self.spirv
    }

    /// Returns `.cso` for DirectX bytecode and `.spv` for SPIR-V
    pub fn output_extension(&self) -> &'static str {
        if self.emits_spirv() { ".spv" } else { ".cso" }
    }

    /// Returns the flag that names the output file (`-Fo` or `-o`)
    pub fn output_flag_prefix(&self) -> &'static str {
        match self.family() {
            BackendFamily::DirectX => "-Fo",
            BackendFamily::Vulkan => "-o",
        }
    }

    /// Returns `<output_dir>/<input stem><extension>`
    pub fn output_file(&self) -> PathBuf {
        let mut name = OsString::from(self.input_file.file_stem().unwrap_or_default());
        name.push(self.output_extension());
        self.output_dir.join(name)
    }

    fn apply<T>(
        &mut self,
        parsed: std::result::Result<T, ConfigWarning>,
        set: impl FnOnce(&mut Self, T),
    ) -> std::result::Result<(), ConfigWarning> {
        match parsed {
            Ok(value) => {
                set(self, value);
                Ok(())
            }
            Err(warning) => {
                warn!("{}", warning);
                self.warnings.push(warning.clone());
                Err(warning)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = ShaderOptions::new();
        assert_eq!(options.backend(), Backend::Dxc);
        assert_eq!(options.stage(), ShaderStage::Vertex);
        assert_eq!(options.profile(), Profile::DirectX(ShaderModel::SM6_0));
        assert_eq!(options.spirv_version(), SpirvVersion::Spv1_5);
        assert!(!options.spirv());
        assert!(options.warnings().is_empty());
    }

    #[test]
    fn test_unknown_backend_keeps_previous() {
        let mut options = ShaderOptions::new();
        options.set_backend("glslc").unwrap();
        assert_eq!(
            options.set_backend("metal"),
            Err(ConfigWarning::UnknownBackend("metal".into()))
        );
        assert_eq!(options.backend(), Backend::Glslc);
    }

    #[test]
    fn test_unknown_stage_keeps_previous() {
        let mut options = ShaderOptions::new();
        options.set_stage("Domain").unwrap();
        assert!(options.set_stage("Mesh").is_err());
        assert_eq!(options.stage(), ShaderStage::Domain);
    }

    #[test]
    fn test_fxc_rejects_shader_model_6() {
        let mut options = ShaderOptions::new();
        options.set_backend("fxc").unwrap();
        options.set_profile("5.0").unwrap();
        assert_eq!(
            options.set_profile("6.0"),
            Err(ConfigWarning::UnknownProfile {
                backend: Backend::Fxc,
                profile: "6.0".into(),
            })
        );
        assert_eq!(options.shader_model(), ShaderModel::SM5_0);

        options.set_backend("dxc").unwrap();
        options.set_profile("6.0").unwrap();
        assert_eq!(options.shader_model(), ShaderModel::SM6_0);
    }

    #[test]
    fn test_profile_validated_against_current_backend() {
        let mut options = ShaderOptions::new();
        // Still DXC, so a SPIR-V version is rejected
        assert!(options.set_profile("1.3").is_err());
        options.set_backend("glslc").unwrap();
        options.set_profile("1.3").unwrap();
        assert_eq!(options.profile(), Profile::Vulkan(SpirvVersion::Spv1_3));
        assert!(options.set_profile("6.5").is_err());
        assert_eq!(options.shader_model(), ShaderModel::SM6_0);
    }

    #[test]
    fn test_warnings_are_recorded_in_order() {
        let mut options = ShaderOptions::new();
        let _ = options.set_backend("hlslcc");
        let _ = options.set_stage("Task");
        options.set_stage("compute").unwrap();
        assert_eq!(
            options.warnings(),
            [
                ConfigWarning::UnknownBackend("hlslcc".into()),
                ConfigWarning::UnknownStage("Task".into()),
            ]
        );
    }

    #[test]
    fn test_output_extension_matrix() {
        let cases = [
            ("dxc", false, ".cso"),
            ("dxc", true, ".spv"),
            ("fxc", false, ".cso"),
            ("fxc", true, ".spv"),
            ("glslc", false, ".spv"),
            ("glslc", true, ".spv"),
        ];
        for (backend, spirv, ext) in cases {
            let mut options = ShaderOptions::new();
            options.set_backend(backend).unwrap();
            options.set_spirv(spirv);
            assert_eq!(options.output_extension(), ext, "{backend} spirv={spirv}");
        }
    }

    #[test]
    fn test_output_flag_prefix() {
        let mut options = ShaderOptions::new();
        assert_eq!(options.output_flag_prefix(), "-Fo");
        options.set_backend("glslc").unwrap();
        assert_eq!(options.output_flag_prefix(), "-o");
    }

    #[cfg(unix)]
    #[test]
    fn test_output_file_uses_input_stem() {
        let mut options = ShaderOptions::new();
        options.set_output_dir("/out");
        options.set_input_file("/src/shaders/lighting.ps.hlsl");
        options.normalize_paths().unwrap();
        assert_eq!(options.output_file(), PathBuf::from("/out/lighting.ps.cso"));
    }

    #[test]
    fn test_normalize_paths_is_idempotent() {
        let mut options = ShaderOptions::new();
        options.set_output_dir("build/../out");
        options.set_include_paths(["inc", "./inc", "inc"]);
        options.set_input_file("src/tri.vert");
        options.normalize_paths().unwrap();

        let first = options.clone();
        options.normalize_paths().unwrap();
        assert_eq!(options.output_file(), first.output_file());
        assert_eq!(options.include_paths(), first.include_paths());
        assert_eq!(options.include_paths().len(), 3);
        assert!(options.output_dir().is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_file_stem() {
        let mut options = ShaderOptions::new();
        options.set_input_file("/");
        assert!(matches!(
            options.normalize_paths(),
            Err(Error::MissingFileStem(_))
        ));
    }
}
