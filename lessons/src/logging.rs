use fern::colors::{Color, ColoredLevelConfig};
use log::{debug, LevelFilter};

/// Crates whose records follow the requested level. Everything else stays at warn.
const LESSON_TARGETS: [&str; 6] = [
    "backend",
    "lessons",
    "context",
    "triangle",
    "colored_triangle",
    "quad",
];

pub fn set_up_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let levels = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                levels.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn);

    LESSON_TARGETS
        .iter()
        .fold(dispatch, |dispatch, target| dispatch.level_for(*target, level))
        .chain(std::io::stdout())
        .apply()?;

    debug!("set up logging at {level}");
    Ok(())
}
