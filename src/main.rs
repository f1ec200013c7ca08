use anyhow::Result;
use clap::{App as Cli, Arg};
use log::*;
use paystell::app::App;
use paystell::config::Config;
use paystell::error::{AppError, AppResult};
use paystell::logger;
use paystell::utils::validation::PasswordPolicy;

#[tokio::main]
async fn main() -> Result<()> {
    let relaxed_help = format!(
        "Drops the special character rule. {}",
        PasswordPolicy::Relaxed.requirement()
    );
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("failure-rate")
                .long("failure-rate")
                .value_name("P")
                .help("Chance between 0 and 1 that a simulated call fails")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .help("Seeds failure injection for reproducible runs")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("delay")
                .long("delay")
                .value_name("MS")
                .help("Simulated backend latency in milliseconds")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("relaxed-passwords")
                .long("relaxed-passwords")
                .help(&relaxed_help),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(rate) = matches.value_of("failure-rate") {
        config.failure_probability = parse_arg("failure-rate", rate)?;
    }
    if let Some(seed) = matches.value_of("seed") {
        config.seed = Some(parse_arg("seed", seed)?);
    }
    if let Some(delay) = matches.value_of("delay") {
        config.submit_delay_ms = parse_arg("delay", delay)?;
    }
    if matches.is_present("relaxed-passwords") {
        config.password_policy = PasswordPolicy::Relaxed;
    }
    config.validate().map_err(AppError::from)?;

    logger::init(config.level_filter().map_err(AppError::from)?)?;
    debug!("Loaded configuration from {:?}.", config.file_path());

    App::start(config).await
}

fn parse_arg<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::Input(format!("invalid value '{}' for --{}", value, name)))
}
