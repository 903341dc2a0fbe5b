//! Optional compile flags

use crate::BackendFamily;
use bitflags::bitflags;

bitflags! {
    /// Extra switches forwarded to the external compiler.
    ///
    /// Empty by default; an empty set adds nothing to the command line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompileFlags: u32 {
        /// Embed debug information (`-Zi` / `-g`)
        const DEBUG_INFO = 1 << 0;

        /// Disable optimization passes (`-Od` / `-O0`)
        const SKIP_OPTIMIZATION = 1 << 1;

        /// Treat warnings as errors (`-WX` / `-Werror`)
        const WARNINGS_ARE_ERRORS = 1 << 2;
    }
}

impl CompileFlags {
    /// Returns the switches for the given flag grammar, in a fixed order.
    pub fn switches(&self, family: BackendFamily) -> Vec<&'static str> {
        let table: [(CompileFlags, &str, &str); 3] = [
            (CompileFlags::DEBUG_INFO, "-Zi", "-g"),
            (CompileFlags::SKIP_OPTIMIZATION, "-Od", "-O0"),
            (CompileFlags::WARNINGS_ARE_ERRORS, "-WX", "-Werror"),
        ];

        table
            .into_iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, dx, vk)| match family {
                BackendFamily::DirectX => dx,
                BackendFamily::Vulkan => vk,
            })
            .collect()
    }
}

impl Default for CompileFlags {
    fn default() -> Self {
        CompileFlags::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_flags_combine() {
        let flags = CompileFlags::DEBUG_INFO | CompileFlags::WARNINGS_ARE_ERRORS;
        assert!(flags.contains(CompileFlags::DEBUG_INFO));
        assert!(flags.contains(CompileFlags::WARNINGS_ARE_ERRORS));
        assert!(!flags.contains(CompileFlags::SKIP_OPTIMIZATION));
    }

    #[test]
    fn test_switches_per_family() {
        let flags = CompileFlags::all();
        assert_eq!(flags.switches(BackendFamily::DirectX), ["-Zi", "-Od", "-WX"]);
        assert_eq!(flags.switches(BackendFamily::Vulkan), ["-g", "-O0", "-Werror"]);
        assert!(CompileFlags::default().switches(BackendFamily::DirectX).is_empty());
    }
}
