use fern::Dispatch;

use crate::modules::config::Config;

pub fn level_filter(verbosity: &str) -> log::LevelFilter {
    match verbosity {
        "OFF" => log::LevelFilter::Off,
        "ERROR" => log::LevelFilter::Error,
        "WARN" => log::LevelFilter::Warn,
        "DEBUG" => log::LevelFilter::Debug,
        "TRACE" => log::LevelFilter::Trace,
        // default to info
        _ => log::LevelFilter::Info,
    }
}

pub fn setup_logging(config: &Config) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(level_filter(&config.logging_level))
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn);

    let formatted = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(std::io::stdout())
        .chain(fern::log_file(&config.log_file)?);

    base_config
        .chain(formatted)
        .apply()?;

    Ok(())
}
