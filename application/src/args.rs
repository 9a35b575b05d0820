//! [`Args`] definitions.

use clap::Parser;

/// Reporting server of the rental reconciliation engine.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Path to the JSON snapshot to serve, overriding the configured one.
    #[arg(short, long)]
    pub snapshot: Option<String>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults_config_path() {
        let args = Args::try_parse_from(["rental-reports"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert_eq!(args.snapshot, None);
    }

    #[test]
    fn overrides_snapshot_path() {
        let args = Args::try_parse_from([
            "rental-reports",
            "-c",
            "prod.toml",
            "--snapshot",
            "/var/lib/rentals/today.json",
        ])
        .unwrap();

        assert_eq!(args.config, "prod.toml");
        assert_eq!(args.snapshot.as_deref(), Some("/var/lib/rentals/today.json"));
    }
}
