use clap::Parser;

use crate::catalog::Subcommand;
use crate::eval::Thresholds;

/// Icinga/Nagios check plugin for HPE MSA 2050 and Dell ME5 series
/// storage arrays.
#[derive(Debug, Parser)]
#[command(
    name = "check_msa_storage",
    version,
    about,
    after_help = "Examples:\n  \
        check_msa_storage --hostname storage.example.com --username monitor --password secret --subcommand system\n  \
        check_msa_storage --hostname storage.example.com --username monitor --password secret --subcommand controllers\n  \
        check_msa_storage --hostname storage.example.com --username monitor --password secret --subcommand disks \
        --warning-temperature 40 --critical-temperature 50 --warning-life-left 85\n  \
        check_msa_storage --hostname storage.example.com --username monitor --password secret --subcommand ports \
        --ignore A3 --ignore A4"
)]
pub struct Cli {
    /// Array hostname or FQDN
    #[arg(long)]
    pub hostname: String,

    /// Management API user
    #[arg(long)]
    pub username: String,

    /// Management API password
    #[arg(long)]
    pub password: String,

    /// Check to run
    #[arg(long, value_enum)]
    pub subcommand: Subcommand,

    /// Network timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Skip TLS certificate verification (arrays ship self-signed certificates)
    #[arg(long)]
    pub insecure: bool,

    /// Entity name to skip; may be given multiple times
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Print the per-entity field tables after the summary
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Warning threshold for disk or sensor temperature in degrees C
    #[arg(long)]
    pub warning_temperature: Option<f64>,

    /// Critical threshold for disk or sensor temperature in degrees C
    #[arg(long)]
    pub critical_temperature: Option<f64>,

    /// Warning threshold for pool or volume usage in percent of the total size
    #[arg(long)]
    pub warning_usage: Option<f64>,

    /// Critical threshold for pool or volume usage in percent of the total size
    #[arg(long)]
    pub critical_usage: Option<f64>,

    /// Warning threshold for remaining SSD life in percent (alerts below)
    #[arg(long)]
    pub warning_life_left: Option<f64>,

    /// Warning threshold for disk power on hours
    #[arg(long)]
    pub warning_power_on_hours: Option<f64>,

    /// Warning threshold for fan speed in rpm (alerts below)
    #[arg(long)]
    pub warning_fan_speed: Option<f64>,

    /// Warning threshold for media errors on either disk port
    #[arg(long)]
    pub warning_media_errors: Option<f64>,

    /// Warning threshold for non-media errors on either disk port
    #[arg(long)]
    pub warning_nonmedia_errors: Option<f64>,

    /// Warning threshold for block reassignments on either disk port
    #[arg(long)]
    pub warning_block_reassigns: Option<f64>,

    /// Warning threshold for bad blocks on either disk port
    #[arg(long)]
    pub warning_bad_blocks: Option<f64>,
}

impl Cli {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            warning_temperature: self.warning_temperature,
            critical_temperature: self.critical_temperature,
            warning_usage: self.warning_usage,
            critical_usage: self.critical_usage,
            warning_life_left: self.warning_life_left,
            warning_power_on_hours: self.warning_power_on_hours,
            warning_fan_speed: self.warning_fan_speed,
            warning_media_errors: self.warning_media_errors,
            warning_nonmedia_errors: self.warning_nonmedia_errors,
            warning_block_reassigns: self.warning_block_reassigns,
            warning_bad_blocks: self.warning_bad_blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "check_msa_storage",
            "--hostname",
            "array.example.com",
            "--username",
            "monitor",
            "--password",
            "secret",
        ]
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommand_names() {
        let mut args = base_args();
        args.extend(["--subcommand", "sensor-status"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.subcommand, Subcommand::SensorStatus);
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        let mut args = base_args();
        args.extend(["--subcommand", "teapots"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_malformed_threshold_is_rejected() {
        let mut args = base_args();
        args.extend(["--subcommand", "disks", "--warning-temperature", "hot"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_ignore_repeats() {
        let mut args = base_args();
        args.extend(["--subcommand", "ports", "--ignore", "A3", "--ignore", "A4"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.ignore, vec!["A3", "A4"]);
    }

    #[test]
    fn test_thresholds_carry_over() {
        let mut args = base_args();
        args.extend([
            "--subcommand",
            "disks",
            "--warning-temperature",
            "40",
            "--critical-temperature",
            "50",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        let thresholds = cli.thresholds();
        assert_eq!(thresholds.warning_temperature, Some(40.0));
        assert_eq!(thresholds.critical_temperature, Some(50.0));
        assert_eq!(thresholds.warning_usage, None);
    }
}
