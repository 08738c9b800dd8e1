//! Option validation.
//!
//! Narrows a requested option set to what applies on the target platform and
//! rejects combinations the library cannot be built with. Rules run in a
//! fixed order and the first rejection wins.

use thiserror::Error;

use crate::core::options::OptionSet;
use crate::core::platform::{Compiler, CompilerVersion, CppStandard, PlatformDescriptor};
use crate::core::rules::PlatformRules;

/// Oldest C++ standard the library compiles with.
pub const MIN_CPP_STANDARD: CppStandard = CppStandard::Cpp11;

/// Oldest GCC major version the library compiles with.
pub const MIN_GCC_MAJOR: u64 = 5;

/// A terminal rejection of a (platform, options) pair.
///
/// Not retryable: the caller has to change the platform or the options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("minimum language standard not met: requires {required} or newer, got {actual}")]
    MinimumStandardNotMet {
        required: CppStandard,
        actual: CppStandard,
    },

    #[error("shared build unsupported on {os}")]
    SharedBuildUnsupported { os: String },

    #[error("compiler too old: gcc {actual} found, gcc >= {minimum} required")]
    CompilerTooOld {
        actual: CompilerVersion,
        minimum: u64,
    },
}

/// Validate and narrow the requested options for a platform.
///
/// `fPIC` is dropped without notice where it does not apply (Windows, shared
/// builds).
pub fn validate(
    platform: &PlatformDescriptor,
    requested: &OptionSet,
) -> Result<OptionSet, ConfigurationError> {
    let rules = PlatformRules::for_platform(platform);
    let mut options = *requested;

    if !rules.supports_fpic {
        options.remove_fpic();
    }

    if options.shared {
        options.remove_fpic();
    }

    if let Some(cppstd) = platform.cppstd {
        if cppstd < MIN_CPP_STANDARD {
            return Err(ConfigurationError::MinimumStandardNotMet {
                required: MIN_CPP_STANDARD,
                actual: cppstd,
            });
        }
    }

    if options.shared && !rules.supports_shared {
        return Err(ConfigurationError::SharedBuildUnsupported {
            os: platform.os.to_string(),
        });
    }

    if platform.compiler == Compiler::Gcc
        && platform.compiler_version < CompilerVersion::new(MIN_GCC_MAJOR, 0, 0)
    {
        return Err(ConfigurationError::CompilerTooOld {
            actual: platform.compiler_version.clone(),
            minimum: MIN_GCC_MAJOR,
        });
    }

    tracing::debug!("validated options for {}: {}", platform, options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::OperatingSystem;

    fn platform(os: OperatingSystem, compiler: Compiler, version: &str) -> PlatformDescriptor {
        PlatformDescriptor::new(os, compiler, version.parse().unwrap())
    }

    fn all_option_sets() -> Vec<OptionSet> {
        let mut sets = Vec::new();
        for shared in [false, true] {
            for fpic in [None, Some(false), Some(true)] {
                sets.push(OptionSet::new(shared, fpic));
            }
        }
        sets
    }

    #[test]
    fn test_windows_always_drops_fpic() {
        let win = platform(OperatingSystem::Windows, Compiler::VisualStudio, "16");
        for opts in all_option_sets().into_iter().filter(|o| !o.shared) {
            let narrowed = validate(&win, &opts).unwrap();
            assert_eq!(narrowed.fpic, None);
        }
    }

    #[test]
    fn test_shared_always_drops_fpic() {
        for os in [
            OperatingSystem::Linux,
            OperatingSystem::Macos,
            OperatingSystem::FreeBSD,
        ] {
            let p = platform(os, Compiler::Clang, "14");
            for fpic in [None, Some(false), Some(true)] {
                let narrowed = validate(&p, &OptionSet::new(true, fpic)).unwrap();
                assert!(narrowed.shared);
                assert_eq!(narrowed.fpic, None);
            }
        }
    }

    #[test]
    fn test_static_linux_keeps_fpic_value() {
        let p = platform(OperatingSystem::Linux, Compiler::Gcc, "9");
        let narrowed = validate(&p, &OptionSet::new(false, Some(false))).unwrap();
        assert_eq!(narrowed, OptionSet::new(false, Some(false)));
    }

    #[test]
    fn test_windows_shared_rejected() {
        let win = platform(OperatingSystem::Windows, Compiler::VisualStudio, "16");
        let err = validate(&win, &OptionSet::new(true, None)).unwrap_err();
        assert!(matches!(err, ConfigurationError::SharedBuildUnsupported { .. }));
        assert!(err.to_string().contains("shared build unsupported"));
    }

    #[test]
    fn test_old_gcc_rejected() {
        let p = platform(OperatingSystem::Linux, Compiler::Gcc, "4");
        let err = validate(&p, &OptionSet::default()).unwrap_err();
        assert!(err.to_string().contains("compiler too old"));

        let p = platform(OperatingSystem::Linux, Compiler::Gcc, "4.9.4");
        assert!(validate(&p, &OptionSet::default()).is_err());

        let p = platform(OperatingSystem::Linux, Compiler::Gcc, "5");
        assert!(validate(&p, &OptionSet::default()).is_ok());

        // Version floor only applies to gcc
        let p = platform(OperatingSystem::Linux, Compiler::Clang, "4");
        assert!(validate(&p, &OptionSet::default()).is_ok());
    }

    #[test]
    fn test_old_cppstd_rejected() {
        let p =
            platform(OperatingSystem::Linux, Compiler::Gcc, "9").with_cppstd(CppStandard::Cpp98);
        let err = validate(&p, &OptionSet::default()).unwrap_err();
        assert!(err.to_string().contains("minimum language standard not met"));

        let p =
            platform(OperatingSystem::Linux, Compiler::Gcc, "9").with_cppstd(CppStandard::Cpp11);
        assert!(validate(&p, &OptionSet::default()).is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Both the standard and shared-on-Windows rules fail; the standard
        // check runs first.
        let p = platform(OperatingSystem::Windows, Compiler::Gcc, "4")
            .with_cppstd(CppStandard::Cpp98);
        let err = validate(&p, &OptionSet::new(true, None)).unwrap_err();
        assert!(matches!(err, ConfigurationError::MinimumStandardNotMet { .. }));

        let p = platform(OperatingSystem::Windows, Compiler::Gcc, "4");
        let err = validate(&p, &OptionSet::new(true, None)).unwrap_err();
        assert!(matches!(err, ConfigurationError::SharedBuildUnsupported { .. }));
    }

    #[test]
    fn test_rejects_iff_rule_matches() {
        let oses = [
            OperatingSystem::Linux,
            OperatingSystem::Windows,
            OperatingSystem::Macos,
        ];
        let compilers = [
            (Compiler::Gcc, "4.8"),
            (Compiler::Gcc, "9"),
            (Compiler::Clang, "3"),
            (Compiler::VisualStudio, "16"),
        ];
        let stds = [None, Some(CppStandard::Cpp98), Some(CppStandard::Cpp17)];

        for os in oses {
            for (compiler, version) in &compilers {
                for cppstd in stds {
                    for opts in all_option_sets() {
                        let mut p = platform(os, compiler.clone(), version);
                        p.cppstd = cppstd;

                        let expect_reject = (os == OperatingSystem::Windows && opts.shared)
                            || (*compiler == Compiler::Gcc
                                && p.compiler_version < CompilerVersion::new(5, 0, 0))
                            || cppstd.is_some_and(|s| s < CppStandard::Cpp11);

                        assert_eq!(
                            validate(&p, &opts).is_err(),
                            expect_reject,
                            "platform {} options {}",
                            p,
                            opts
                        );
                    }
                }
            }
        }
    }
}
