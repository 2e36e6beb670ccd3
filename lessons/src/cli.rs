use backend::{ExitPolicy, Profile, WindowConfig};
use clap::{ArgAction, Parser};

/// Window and context options shared by every lesson binary.
#[derive(Debug, Parser)]
pub struct LessonArgs {
    /// Window title
    #[arg(long, default_value = "Dom")]
    pub title: String,

    #[arg(long, default_value_t = 900)]
    pub width: u32,

    #[arg(long, default_value_t = 560)]
    pub height: u32,

    /// OpenGL version to request, as MAJOR.MINOR
    #[arg(long = "gl-version", value_parser = parse_gl_version, default_value = "3.2")]
    pub gl_version: (u8, u8),

    /// Request a compatibility profile instead of core
    #[arg(long)]
    pub compat: bool,

    /// Stencil buffer depth in bits
    #[arg(long, default_value_t = 8)]
    pub stencil: u8,

    /// Synchronize buffer swaps with the display refresh
    #[arg(long)]
    pub vsync: bool,

    /// Stop after this many key, mouse button or quit events instead of on quit
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub exit_after: Option<u32>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl LessonArgs {
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            gl_major: self.gl_version.0,
            gl_minor: self.gl_version.1,
            profile: if self.compat {
                Profile::Compatibility
            } else {
                Profile::Core
            },
            stencil_bits: self.stencil,
            vsync: self.vsync,
            ..WindowConfig::default()
        }
    }

    pub fn exit_policy(&self) -> ExitPolicy {
        match self.exit_after {
            Some(n) => ExitPolicy::AfterClassified(n),
            None => ExitPolicy::Quit,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn parse_gl_version(s: &str) -> Result<(u8, u8), String> {
    let (major, minor) = s
        .split_once('.')
        .ok_or_else(|| format!("'{s}' is not of the form MAJOR.MINOR"))?;
    let major: u8 = major
        .trim()
        .parse()
        .map_err(|e| format!("bad major version '{major}': {e}"))?;
    let minor: u8 = minor
        .trim()
        .parse()
        .map_err(|e| format!("bad minor version '{minor}': {e}"))?;
    if major == 0 {
        return Err(format!("OpenGL {major}.{minor} does not exist"));
    }
    Ok((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions() {
        assert_eq!(parse_gl_version("3.2"), Ok((3, 2)));
        assert_eq!(parse_gl_version("4.6"), Ok((4, 6)));
        assert!(parse_gl_version("3").is_err());
        assert!(parse_gl_version("three.two").is_err());
        assert!(parse_gl_version("0.9").is_err());
    }

    #[test]
    fn defaults_match_the_sample_window() {
        let args = LessonArgs::try_parse_from(["lesson"]).expect("defaults parse");
        assert_eq!(args.window_config(), WindowConfig::default());
        assert_eq!(args.exit_policy(), ExitPolicy::Quit);
        assert_eq!(args.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn overrides_flow_into_the_config() {
        let args = LessonArgs::try_parse_from([
            "lesson",
            "--title",
            "Triangle",
            "--width",
            "640",
            "--gl-version",
            "4.1",
            "--compat",
            "--stencil",
            "0",
            "--exit-after",
            "3",
            "-vv",
        ])
        .expect("args parse");

        let config = args.window_config();
        assert_eq!(config.title, "Triangle");
        assert_eq!((config.width, config.height), (640, 560));
        assert_eq!((config.gl_major, config.gl_minor), (4, 1));
        assert_eq!(config.profile, Profile::Compatibility);
        assert_eq!(config.stencil_bits, 0);
        assert_eq!(args.exit_policy(), ExitPolicy::AfterClassified(3));
        assert_eq!(args.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn exit_after_zero_is_rejected() {
        assert!(LessonArgs::try_parse_from(["lesson", "--exit-after", "0"]).is_err());
    }
}
