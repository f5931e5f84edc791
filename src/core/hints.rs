//=========================================================================
// Graphics API Hints
//=========================================================================
//
// Creation-time configuration handed to `WindowComponent::create`.
// Backends validate these against what they can actually provide and
// reject anything else with `UnsupportedConfiguration`.
//
//=========================================================================

//=== ContextDepthBits ====================================================

/// Requested depth buffer precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextDepthBits {
    None,
    Depth16,
    Depth24,
    Depth32,
}

impl ContextDepthBits {
    pub fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Depth16 => 16,
            Self::Depth24 => 24,
            Self::Depth32 => 32,
        }
    }
}

//=== ContextStencilBits ==================================================

/// Requested stencil buffer precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextStencilBits {
    None,
    Stencil1,
    Stencil8,
}

impl ContextStencilBits {
    pub fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Stencil1 => 1,
            Self::Stencil8 => 8,
        }
    }
}

//=== OpenGlProfile =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenGlProfile {
    /// Let the driver pick.
    None,
    Core,
    Compatibility,
}

//=== GlVersion ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

//=== ColorBits ===========================================================

/// Per-channel color buffer precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorBits {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl ColorBits {
    pub const RGBA8: Self = Self {
        red: 8,
        green: 8,
        blue: 8,
        alpha: 8,
    };

    pub fn channels(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

//=== OpenGlHints =========================================================

/// OpenGL context and framebuffer configuration.
///
/// # Default Values
///
/// - **Version**: 3.3, core profile
/// - **Color**: RGBA8, depth 24, stencil 8
/// - **Multisamples**: 0 (disabled)
/// - **Double buffering** on, sRGB/debug/forward-compatible off
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenGlHints {
    pub version: GlVersion,
    pub color_bits: ColorBits,
    pub depth_bits: ContextDepthBits,
    pub stencil_bits: ContextStencilBits,
    pub multisamples: u8,
    pub profile: OpenGlProfile,
    pub debug: bool,
    pub forward_compatible: bool,
    pub srgb_framebuffer: bool,
    pub double_buffer: bool,
}

impl Default for OpenGlHints {
    fn default() -> Self {
        Self {
            version: GlVersion::new(3, 3),
            color_bits: ColorBits::RGBA8,
            depth_bits: ContextDepthBits::Depth24,
            stencil_bits: ContextStencilBits::Stencil8,
            multisamples: 0,
            profile: OpenGlProfile::Core,
            debug: false,
            forward_compatible: false,
            srgb_framebuffer: false,
            double_buffer: true,
        }
    }
}

impl OpenGlHints {
    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.version = GlVersion::new(major, minor);
        self
    }

    pub fn with_color_bits(mut self, color_bits: ColorBits) -> Self {
        self.color_bits = color_bits;
        self
    }

    pub fn with_depth_bits(mut self, depth_bits: ContextDepthBits) -> Self {
        self.depth_bits = depth_bits;
        self
    }

    pub fn with_stencil_bits(mut self, stencil_bits: ContextStencilBits) -> Self {
        self.stencil_bits = stencil_bits;
        self
    }

    pub fn with_multisamples(mut self, multisamples: u8) -> Self {
        self.multisamples = multisamples;
        self
    }

    pub fn with_profile(mut self, profile: OpenGlProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_forward_compatible(mut self, forward_compatible: bool) -> Self {
        self.forward_compatible = forward_compatible;
        self
    }

    pub fn with_srgb_framebuffer(mut self, srgb: bool) -> Self {
        self.srgb_framebuffer = srgb;
        self
    }

    pub fn with_double_buffer(mut self, double_buffer: bool) -> Self {
        self.double_buffer = double_buffer;
        self
    }
}

//=== GraphicsApiHints ====================================================

/// Graphics API the window will be used with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GraphicsApiHints {
    /// No graphics API surface is requested.
    #[default]
    None,
    Vulkan,
    OpenGl(OpenGlHints),
}

impl GraphicsApiHints {
    /// Short name for error messages.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vulkan => "Vulkan",
            Self::OpenGl(_) => "OpenGL",
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hints_request_core_33() {
        let hints = OpenGlHints::default();
        assert_eq!(hints.version, GlVersion::new(3, 3));
        assert_eq!(hints.profile, OpenGlProfile::Core);
        assert_eq!(hints.depth_bits.bits(), 24);
        assert_eq!(hints.stencil_bits.bits(), 8);
    }

    #[test]
    fn builder_overrides_fields() {
        let hints = OpenGlHints::default()
            .with_version(4, 6)
            .with_multisamples(4)
            .with_debug(true)
            .with_depth_bits(ContextDepthBits::Depth32);

        assert_eq!(hints.version, GlVersion::new(4, 6));
        assert_eq!(hints.multisamples, 4);
        assert!(hints.debug);
        assert_eq!(hints.depth_bits, ContextDepthBits::Depth32);
    }

    #[test]
    fn versions_order_lexicographically() {
        assert!(GlVersion::new(3, 2) < GlVersion::new(3, 3));
        assert!(GlVersion::new(2, 9) < GlVersion::new(3, 0));
    }
}
