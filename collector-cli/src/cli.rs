use std::{
    env,
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use clap::Parser;
use tracing::info;

use collector_core::{Config, OpenWeatherClient, Overrides, Settings, append_record};

/// Flags that take a value in the following token.
const VALUE_FLAGS: [&str; 5] = ["--city", "--country", "--api-key", "--output", "--config"];

/// Tokens handed to clap untouched.
const BUILTIN_FLAGS: [&str; 4] = ["--help", "-h", "--version", "-V"];

/// Top-level CLI struct.
///
/// Unrecognised flags are ignored rather than rejected, so the command can
/// sit in scheduler job definitions that tack on bookkeeping arguments.
#[derive(Debug, Parser)]
#[command(
    name = "weather-collector",
    version,
    about = "Collect one current-weather observation into a CSV log"
)]
pub struct Cli {
    /// City to query.
    #[arg(long)]
    pub city: Option<String>,

    /// Country code paired with the city.
    #[arg(long)]
    pub country: Option<String>,

    /// OpenWeatherMap API key.
    #[arg(long)]
    pub api_key: Option<String>,

    /// CSV file the observation is appended to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Config file to read instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, dropping tokens that are not ours.
    ///
    /// Scheduler job definitions tack bookkeeping arguments onto the
    /// command line, anywhere in it; an unknown token must not shadow the
    /// flags around it. The argument list is reduced to known tokens
    /// before clap sees it, so position does not matter.
    pub fn parse_tolerant() -> Self {
        Self::parse_from(known_args(env::args_os()))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        info!("Weather data collector started");

        let Self {
            city,
            country,
            api_key,
            output,
            config: config_path,
        } = self;

        let config = Config::load(config_path.as_deref())?;
        let settings = Settings::resolve(
            Overrides {
                city,
                country,
                api_key,
                output,
            },
            &config,
        )?;

        let client = OpenWeatherClient::new(settings.api_key.clone())?;
        let record = client
            .fetch_current(&settings.city, &settings.country)
            .await?;
        append_record(&settings.output, &record)?;

        info!("SUCCESS: weather data collection completed");
        Ok(())
    }
}

/// Keep `argv[0]`, the known flags with their values, and clap's built-in
/// flags; drop everything else. A known flag at the very end, with no
/// value left to consume, is dropped as well.
fn known_args(raw: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut raw = raw.into_iter();
    let mut kept: Vec<OsString> = raw.next().into_iter().collect();

    while let Some(token) = raw.next() {
        if wants_value(&token) {
            // The value may be any byte sequence, e.g. a path.
            if let Some(value) = raw.next() {
                kept.push(token);
                kept.push(value);
            }
        } else if keep_verbatim(&token) {
            kept.push(token);
        }
    }

    kept
}

fn wants_value(token: &OsStr) -> bool {
    token
        .to_str()
        .is_some_and(|text| VALUE_FLAGS.contains(&text))
}

fn keep_verbatim(token: &OsStr) -> bool {
    token.to_str().is_some_and(|text| {
        BUILTIN_FLAGS.contains(&text)
            || text
                .split_once('=')
                .is_some_and(|(name, _)| VALUE_FLAGS.contains(&name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }

    #[test]
    fn unknown_tokens_are_dropped_wherever_they_appear() {
        let kept = known_args(args(&[
            "weather-collector",
            "--jenkins-run",
            "42",
            "--city",
            "Berlin",
            "--bogus",
            "value",
            "--output",
            "out.csv",
            "trailing",
        ]));

        assert_eq!(
            kept,
            args(&[
                "weather-collector",
                "--city",
                "Berlin",
                "--output",
                "out.csv"
            ])
        );
    }

    #[test]
    fn inline_values_and_builtin_flags_pass_through() {
        let kept = known_args(args(&[
            "weather-collector",
            "--city=Berlin",
            "--noise",
            "--help",
        ]));

        assert_eq!(kept, args(&["weather-collector", "--city=Berlin", "--help"]));
    }

    #[test]
    fn flag_without_a_value_at_the_end_is_dropped() {
        let kept = known_args(args(&["weather-collector", "--country", "NO", "--city"]));
        assert_eq!(kept, args(&["weather-collector", "--country", "NO"]));
    }

    #[test]
    fn parsing_survives_interleaved_noise() {
        let cli = Cli::parse_from(known_args(args(&[
            "weather-collector",
            "--purge-cache",
            "--api-key",
            "k",
            "--retry-count",
            "3",
            "--output",
            "data/run.csv",
        ])));

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.output, Some(PathBuf::from("data/run.csv")));
        assert!(cli.city.is_none());
    }
}
