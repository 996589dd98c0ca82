/// Initializes the logging system from `log4rs.yaml` in the working
/// directory. Prefer `init_for_app_in` for programmatic control.
///
/// # Errors
/// Returns an error if the config file cannot be loaded.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default())?;
    Ok(())
}

/// Initializes logging to `{app_name}_logs/{app_name}.log` under the
/// current directory.
///
/// # Errors
/// Returns an error if the directory cannot be created or the logger
/// fails to initialize.
pub fn init_for_app(app_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    init_for_app_in(std::path::Path::new("."), app_name)
}

/// Initializes logging to `{base}/{app_name}_logs/{app_name}.log`.
///
/// # Errors
/// Returns an error if the directory cannot be created or the logger
/// fails to initialize.
pub fn init_for_app_in(
    base_dir: &std::path::Path,
    app_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let log_dir = base_dir.join(format!("{app_name}_logs"));
    std::fs::create_dir_all(&log_dir)?;
    let logfile = log_dir.join(format!("{app_name}.log"));
    let encoder =
        Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}"));
    let file_appender = FileAppender::builder().encoder(encoder).build(logfile)?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(Root::builder().appender("file").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
