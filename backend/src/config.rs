use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Core,
    Compatibility,
}

/// Version, profile and stencil depth of a rendering context.
///
/// Built from a [`WindowConfig`] as a request, and read back from the driver
/// once the context exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttributes {
    pub gl_major: u8,
    pub gl_minor: u8,
    pub profile: Profile,
    pub stencil_bits: u8,
}

impl ContextAttributes {
    /// True when a context with these attributes honours `requested`:
    /// same profile, at least the requested version and stencil depth.
    pub fn satisfies(&self, requested: &ContextAttributes) -> bool {
        self.profile == requested.profile
            && (self.gl_major, self.gl_minor) >= (requested.gl_major, requested.gl_minor)
            && self.stencil_bits >= requested.stencil_bits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub centered: bool,
    pub resizable: bool,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub profile: Profile,
    pub stencil_bits: u8,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Dom".to_string(),
            width: 900,
            height: 560,
            centered: true,
            resizable: true,
            gl_major: 3,
            gl_minor: 2,
            profile: Profile::Core,
            stencil_bits: 8,
            vsync: false,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.title.trim().is_empty() {
            return Err(BackendError::Init("window title is empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BackendError::Init(format!(
                "window size {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        if self.gl_major == 0 {
            return Err(BackendError::Init(format!(
                "OpenGL version {}.{} is not a valid version",
                self.gl_major, self.gl_minor
            )));
        }
        Ok(())
    }

    pub fn attributes(&self) -> ContextAttributes {
        ContextAttributes {
            gl_major: self.gl_major,
            gl_minor: self.gl_minor,
            profile: self.profile,
            stencil_bits: self.stencil_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_lesson_window() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Dom");
        assert_eq!((config.width, config.height), (900, 560));
        assert!(config.centered && config.resizable);
        assert!(!config.vsync);
        assert_eq!(
            config.attributes(),
            ContextAttributes {
                gl_major: 3,
                gl_minor: 2,
                profile: Profile::Core,
                stencil_bits: 8,
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_windows() {
        let empty_title = WindowConfig {
            title: "  ".to_string(),
            ..WindowConfig::default()
        };
        assert!(matches!(empty_title.validate(), Err(BackendError::Init(_))));

        let zero_width = WindowConfig {
            width: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(zero_width.validate(), Err(BackendError::Init(_))));

        let no_version = WindowConfig {
            gl_major: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(no_version.validate(), Err(BackendError::Init(_))));
    }

    #[test]
    fn negotiated_attributes_must_not_downgrade() {
        let requested = WindowConfig::default().attributes();
        assert!(requested.satisfies(&requested));

        let newer = ContextAttributes {
            gl_major: 4,
            gl_minor: 1,
            ..requested
        };
        assert!(newer.satisfies(&requested));

        let older = ContextAttributes {
            gl_minor: 1,
            ..requested
        };
        assert!(!older.satisfies(&requested));

        let compat = ContextAttributes {
            profile: Profile::Compatibility,
            ..requested
        };
        assert!(!compat.satisfies(&requested));

        let no_stencil = ContextAttributes {
            stencil_bits: 0,
            ..requested
        };
        assert!(!no_stencil.satisfies(&requested));
    }
}
