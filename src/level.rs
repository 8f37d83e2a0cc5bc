//! Build-time extension level.
//!
//! Every operation with more than one implementation picks its strategy from
//! [`LEVEL`]. The constant is resolved from `cfg!(target_feature = ...)` when the
//! crate is compiled, so `match LEVEL { .. }` folds away and the choice never
//! shows up as a runtime branch or in a function signature.
//!
//! # Levels
//!
//! - x86/x86_64 with SSE4.1, aarch64 with NEON, wasm32 with `simd128`:
//!   [`ExtensionLevel::Extended`]
//! - everything else: [`ExtensionLevel::Baseline`]
//!
//! The `force-baseline` feature pins the level to `Baseline`, which is how the
//! fallback sequences are exercised on modern hardware.

/// Instruction-set capability class a build was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionLevel {
    /// No native rounding; integer multiply and some shifts use fallback sequences.
    Baseline,
    /// Native round-to-nearest-even and vector integer multiply.
    Extended,
}

impl ExtensionLevel {
    /// Human-readable name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ExtensionLevel::Baseline => "baseline",
            ExtensionLevel::Extended => "extended",
        }
    }
}

const fn compiled_level() -> ExtensionLevel {
    if cfg!(feature = "force-baseline") {
        return ExtensionLevel::Baseline;
    }
    if cfg!(any(
        all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse4.1"
        ),
        all(target_arch = "aarch64", target_feature = "neon"),
        all(target_arch = "wasm32", target_feature = "simd128")
    )) {
        ExtensionLevel::Extended
    } else {
        ExtensionLevel::Baseline
    }
}

/// The extension level this crate was compiled for.
pub const LEVEL: ExtensionLevel = compiled_level();

/// Build-time level next to what the running CPU could support.
///
/// Purely diagnostic: operations keep using [`LEVEL`]. Useful to notice a
/// binary built for a generic target running on a machine that would benefit
/// from `-C target-cpu=native`.
#[cfg(feature = "detect")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Level baked into this build.
    pub build: ExtensionLevel,
    /// Level the current CPU reports.
    pub runtime: ExtensionLevel,
}

#[cfg(feature = "detect")]
impl Capabilities {
    /// Probe the running CPU.
    pub fn detect() -> Self {
        let caps = Capabilities {
            build: LEVEL,
            runtime: Self::detect_runtime(),
        };

        log::debug!(
            "lanewise: build level {}, runtime level {}",
            caps.build.name(),
            caps.runtime.name()
        );
        if caps.runtime > caps.build {
            log::debug!("lanewise: CPU supports extended operations this build does not use");
        }

        caps
    }

    /// True when the CPU could run a build with a higher level than this one.
    pub fn underused(&self) -> bool {
        self.runtime > self.build
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_runtime() -> ExtensionLevel {
        use archmage::SimdToken;

        // x86-64-v2 includes SSE4.1
        if archmage::X64V2Token::try_new().is_some() {
            ExtensionLevel::Extended
        } else {
            ExtensionLevel::Baseline
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn detect_runtime() -> ExtensionLevel {
        use archmage::SimdToken;

        if archmage::NeonToken::try_new().is_some() {
            ExtensionLevel::Extended
        } else {
            ExtensionLevel::Baseline
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn detect_runtime() -> ExtensionLevel {
        LEVEL
    }
}
