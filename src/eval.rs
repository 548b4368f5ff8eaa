//! Threshold evaluation: turns parsed entity records into a [`Report`]
//! using the catalog's token tables and the caller-supplied bounds.

use tracing::debug;

use crate::catalog::{
    disk_group_status_description, Direction, Subcommand, ThresholdKind, TokenCheck,
};
use crate::error::CheckError;
use crate::perfdata::{PerfMetric, Unit};
use crate::report::{EntityStatus, Report};
use crate::response::EntityRecord;
use crate::severity::Severity;

/// Caller-supplied bounds. `None` means that level is never triggered by
/// the bound; only token checks or the other bound can still raise the
/// severity.
#[derive(Clone, Debug, Default)]
pub struct Thresholds {
    pub warning_temperature: Option<f64>,
    pub critical_temperature: Option<f64>,
    pub warning_usage: Option<f64>,
    pub critical_usage: Option<f64>,
    pub warning_life_left: Option<f64>,
    pub warning_power_on_hours: Option<f64>,
    pub warning_fan_speed: Option<f64>,
    pub warning_media_errors: Option<f64>,
    pub warning_nonmedia_errors: Option<f64>,
    pub warning_block_reassigns: Option<f64>,
    pub warning_bad_blocks: Option<f64>,
}

impl Thresholds {
    fn bounds(&self, kind: ThresholdKind) -> (Option<f64>, Option<f64>) {
        match kind {
            ThresholdKind::Temperature => (self.warning_temperature, self.critical_temperature),
            ThresholdKind::LifeLeft => (self.warning_life_left, None),
            ThresholdKind::PowerOnHours => (self.warning_power_on_hours, None),
            ThresholdKind::FanSpeed => (self.warning_fan_speed, None),
            ThresholdKind::MediaErrors => (self.warning_media_errors, None),
            ThresholdKind::NonmediaErrors => (self.warning_nonmedia_errors, None),
            ThresholdKind::BlockReassigns => (self.warning_block_reassigns, None),
            ThresholdKind::BadBlocks => (self.warning_bad_blocks, None),
        }
    }

    /// Rejects bound pairs where the warning level could never fire.
    /// Runs before any network call.
    pub fn validate(&self) -> Result<(), CheckError> {
        let pairs = [
            (
                "temperature",
                self.warning_temperature,
                self.critical_temperature,
            ),
            ("usage", self.warning_usage, self.critical_usage),
        ];
        for (name, warning, critical) in pairs {
            if let (Some(w), Some(c)) = (warning, critical) {
                if w >= c {
                    return Err(CheckError::InvalidArgument(format!(
                        "warning-{name} must be lower than critical-{name}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Classifies a numeric value against optional bounds, direction-adjusted:
/// `>=` when higher figures are worse, `<=` for inverted metrics.
pub fn classify_numeric(
    value: f64,
    warning: Option<f64>,
    critical: Option<f64>,
    direction: Direction,
) -> Severity {
    let beyond = |bound: f64| match direction {
        Direction::HigherIsWorse => value >= bound,
        Direction::LowerIsWorse => value <= bound,
    };

    if critical.is_some_and(beyond) {
        Severity::Critical
    } else if warning.is_some_and(beyond) {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Classifies a status token against its finite lookup table. Tokens
/// outside the table are UNKNOWN; the array vocabulary is closed and
/// anything else means we cannot judge the entity.
pub fn classify_token(check: &TokenCheck, token: &str) -> Severity {
    if check.ok.contains(&token) {
        Severity::Ok
    } else if check.warning.contains(&token) {
        Severity::Warning
    } else if check.critical.contains(&token) {
        Severity::Critical
    } else {
        Severity::Unknown
    }
}

/// Joins the `disks` and `disk-statistics` responses by position; the
/// array reports both in slot order.
pub fn merge_disk_statistics(
    mut disks: Vec<EntityRecord>,
    stats: Vec<EntityRecord>,
) -> Result<Vec<EntityRecord>, CheckError> {
    if disks.len() != stats.len() {
        return Err(CheckError::Parse(format!(
            "disk and disk-statistics object counts differ ({} vs {})",
            disks.len(),
            stats.len()
        )));
    }
    for (disk, stat) in disks.iter_mut().zip(stats) {
        disk.merge(stat);
    }
    Ok(disks)
}

/// Walks the records and produces the final report: one entity per
/// record in response order, severities folded in monotonically,
/// perfdata for every numeric metric that was actually evaluated.
pub fn evaluate(
    sub: Subcommand,
    records: &[EntityRecord],
    thresholds: &Thresholds,
    ignore: &[String],
) -> Report {
    let spec = sub.query();
    let mut report = Report::new();

    for (index, record) in records.iter().enumerate() {
        let name = record.get(spec.name_label).map(str::to_string);
        if let Some(name) = &name {
            if ignore.iter().any(|i| i.eq_ignore_ascii_case(name)) {
                debug!(entity = %name, "skipped on request");
                continue;
            }
        }

        let mut entity = match name {
            Some(name) => EntityStatus::new(name),
            None => {
                // No identifying field: report the record positionally and
                // flag it, the array answer is not judgeable.
                let mut entity = EntityStatus::new(format!("{} #{}", spec.endpoint, index + 1));
                entity.observe(Severity::Unknown);
                entity
            }
        };

        if record.is_empty() {
            entity.observe(Severity::Unknown);
            report.push(entity);
            continue;
        }

        for (label, value) in record.fields() {
            if let Some(value) = value {
                entity.push_detail(label, value);
            }
        }

        for check in spec.token_checks {
            let severity = match record.get(check.label) {
                Some(token) => classify_token(check, token),
                None => Severity::Unknown,
            };
            entity.observe(severity);
        }

        if sub == Subcommand::DiskGroups {
            if let Some(desc) = record
                .get("disk-group status")
                .and_then(disk_group_status_description)
            {
                entity.push_detail("disk-group status description", desc);
            }
        }

        for check in spec.numeric_checks {
            let (warning, critical) = thresholds.bounds(check.kind);
            if warning.is_none() && critical.is_none() {
                continue;
            }
            if let Some(needle) = check.name_contains {
                if !entity.name().contains(needle) {
                    continue;
                }
            }

            match record
                .get(check.label)
                .and_then(|raw| numeric_value(raw, check.strip_suffix))
            {
                Some(value) => {
                    entity.observe(classify_numeric(value, warning, critical, check.direction));
                    report.push_metric(
                        PerfMetric::new(format!("{} {}", entity.name(), check.perf_label), value)
                            .with_unit(check.unit)
                            .with_bounds(warning, critical)
                            .with_range(check.min, check.max),
                    );
                }
                None => entity.observe(Severity::Unknown),
            }
        }

        if let Some(usage) = &spec.usage {
            let (warning, critical) = (thresholds.warning_usage, thresholds.critical_usage);
            if warning.is_some() || critical.is_some() {
                let total = record
                    .get(usage.total)
                    .and_then(|raw| numeric_value(raw, Some("GB")));
                let counterpart = record
                    .get(usage.counterpart)
                    .and_then(|raw| numeric_value(raw, Some("GB")));

                match (total, counterpart) {
                    (Some(total), Some(counterpart)) if total > 0.0 => {
                        let used = if usage.counterpart_is_free {
                            round1(total - counterpart)
                        } else {
                            round1(counterpart)
                        };
                        let warn_gb = warning.map(|p| round1(total / 100.0 * p));
                        let crit_gb = critical.map(|p| round1(total / 100.0 * p));

                        entity.observe(classify_numeric(
                            used,
                            warn_gb,
                            crit_gb,
                            Direction::HigherIsWorse,
                        ));
                        report.push_metric(
                            PerfMetric::new(format!("{} GB", entity.name()), used)
                                .with_bounds(warn_gb, crit_gb)
                                .with_range(Some(0.0), Some(total)),
                        );
                    }
                    _ => entity.observe(Severity::Unknown),
                }
            }
        }

        if sub == Subcommand::VolumeStatistics {
            if let Some(iops) = record.get("iops").and_then(|raw| numeric_value(raw, None)) {
                report.push_metric(
                    PerfMetric::new(format!("{} iops", entity.name()), iops)
                        .with_range(Some(0.0), None),
                );
            }
            if let Some((speed, unit)) = record.get("bytes-per-second").and_then(parse_rate) {
                // The array reports KB or MB per second; normalize to MB.
                let megabytes = if unit == "KB" {
                    round2(speed / 1024.0)
                } else {
                    speed
                };
                report.push_metric(
                    PerfMetric::new(format!("{} transfer speed", entity.name()), megabytes)
                        .with_unit(Unit::Megabytes)
                        .with_range(Some(0.0), None),
                );
            }
        }

        report.push(entity);
    }

    report
}

fn numeric_value(raw: &str, strip_suffix: Option<&str>) -> Option<f64> {
    let mut s = raw.trim();
    if let Some(suffix) = strip_suffix {
        s = s.strip_suffix(suffix).unwrap_or(s).trim_end();
    }
    s.parse().ok()
}

fn parse_rate(raw: &str) -> Option<(f64, &str)> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let value: f64 = raw[..end].parse().ok()?;
    Some((value, raw[end..].trim()))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&'static str, &str)]) -> EntityRecord {
        EntityRecord::from_pairs(
            pairs
                .iter()
                .map(|(l, v)| (*l, Some(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn test_numeric_band_boundaries() {
        // v < w => OK; w <= v < c => WARNING; v >= c => CRITICAL
        let classify = |v| classify_numeric(v, Some(15.0), Some(30.0), Direction::HigherIsWorse);
        assert_eq!(classify(12.0), Severity::Ok);
        assert_eq!(classify(15.0), Severity::Warning);
        assert_eq!(classify(18.0), Severity::Warning);
        assert_eq!(classify(30.0), Severity::Critical);
        assert_eq!(classify(35.0), Severity::Critical);
    }

    #[test]
    fn test_numeric_inverted_direction() {
        let classify = |v| classify_numeric(v, Some(30.0), Some(15.0), Direction::LowerIsWorse);
        assert_eq!(classify(35.0), Severity::Ok);
        assert_eq!(classify(30.0), Severity::Warning);
        assert_eq!(classify(20.0), Severity::Warning);
        assert_eq!(classify(15.0), Severity::Critical);
        assert_eq!(classify(10.0), Severity::Critical);
    }

    #[test]
    fn test_absent_bounds_never_trigger() {
        assert_eq!(
            classify_numeric(9000.0, None, None, Direction::HigherIsWorse),
            Severity::Ok
        );
        assert_eq!(
            classify_numeric(9000.0, Some(100.0), None, Direction::HigherIsWorse),
            Severity::Warning
        );
    }

    #[test]
    fn test_token_table() {
        let check = TokenCheck {
            label: "controller health",
            ok: &["OK"],
            warning: &["Degraded"],
            critical: &["Fault"],
        };
        assert_eq!(classify_token(&check, "OK"), Severity::Ok);
        assert_eq!(classify_token(&check, "Degraded"), Severity::Warning);
        assert_eq!(classify_token(&check, "Fault"), Severity::Critical);
        assert_eq!(classify_token(&check, "Banana"), Severity::Unknown);
    }

    #[test]
    fn test_validate_rejects_inverted_pairs() {
        let thresholds = Thresholds {
            warning_temperature: Some(60.0),
            critical_temperature: Some(50.0),
            ..Thresholds::default()
        };
        assert!(matches!(
            thresholds.validate(),
            Err(CheckError::InvalidArgument(_))
        ));

        let thresholds = Thresholds {
            warning_usage: Some(85.0),
            critical_usage: Some(95.0),
            ..Thresholds::default()
        };
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_system_single_entity() {
        let records = vec![record(&[
            ("product id", "MSA 2050 SAN"),
            ("system health", "OK"),
            ("other MC status", "Operational"),
        ])];
        let report = evaluate(
            Subcommand::System,
            &records,
            &Thresholds::default(),
            &[],
        );
        assert_eq!(report.render(false), "OK - MSA 2050 SAN is OK.");
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_controllers_keep_order_and_aggregate() {
        let records = vec![
            record(&[
                ("controller id", "A"),
                ("controller health", "OK"),
                ("controller status", "Operational"),
                ("controller redundancy status", "Redundant"),
                ("controller redundancy mode", "Active-Active ULP"),
                ("controller failed", "No"),
            ]),
            record(&[
                ("controller id", "B"),
                ("controller health", "Fault"),
                ("controller status", "Down"),
                ("controller redundancy status", "Down"),
                ("controller redundancy mode", "Down"),
                ("controller failed", "Yes"),
            ]),
        ];
        let report = evaluate(
            Subcommand::Controllers,
            &records,
            &Thresholds::default(),
            &[],
        );
        assert_eq!(
            report.render(false),
            "OK - A is OK.\nCRITICAL - B is CRITICAL."
        );
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_missing_token_field_is_unknown() {
        // Health field missing entirely from controller A.
        let records = vec![record(&[
            ("controller id", "A"),
            ("controller status", "Operational"),
            ("controller redundancy status", "Redundant"),
            ("controller redundancy mode", "Active-Active ULP"),
            ("controller failed", "No"),
        ])];
        let report = evaluate(
            Subcommand::Controllers,
            &records,
            &Thresholds::default(),
            &[],
        );
        assert_eq!(report.overall(), Severity::Unknown);
    }

    #[test]
    fn test_fault_controller_pages_despite_unparsable_sibling() {
        let records = vec![
            record(&[("controller id", "A"), ("controller health", "Fault")]),
            record(&[("controller id", "B")]),
        ];
        let report = evaluate(
            Subcommand::Controllers,
            &records,
            &Thresholds::default(),
            &[],
        );
        assert_eq!(report.overall(), Severity::Critical);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_ignored_entities_are_skipped() {
        let records = vec![
            record(&[("fru name", "RAID_IOM"), ("fru status", "Fault")]),
            record(&[("fru name", "CHASSIS_MIDPLANE"), ("fru status", "OK")]),
        ];
        let report = evaluate(
            Subcommand::Frus,
            &records,
            &Thresholds::default(),
            &["raid_iom".to_string()],
        );
        assert_eq!(report.render(false), "OK - CHASSIS_MIDPLANE is OK.");
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_disk_temperature_thresholds_and_perfdata() {
        let records = vec![record(&[
            ("disk id", "disk_01.01"),
            ("disk status", "Up"),
            ("disk health", "OK"),
            ("disk temperature", "52 C"),
        ])];
        let thresholds = Thresholds {
            warning_temperature: Some(40.0),
            critical_temperature: Some(50.0),
            ..Thresholds::default()
        };
        let report = evaluate(Subcommand::Disks, &records, &thresholds, &[]);
        assert_eq!(report.overall(), Severity::Critical);
        assert!(report
            .render(false)
            .contains("| 'disk_01.01 temperature'=52;40;50;0"));
    }

    #[test]
    fn test_life_left_lower_is_worse() {
        let records = vec![record(&[
            ("disk id", "disk_01.02"),
            ("disk status", "Up"),
            ("disk health", "OK"),
            ("disk life left", "85%"),
        ])];
        let thresholds = Thresholds {
            warning_life_left: Some(90.0),
            ..Thresholds::default()
        };
        let report = evaluate(Subcommand::Disks, &records, &thresholds, &[]);
        assert_eq!(report.overall(), Severity::Warning);
        assert!(report
            .render(false)
            .contains("'disk_01.02 life left'=85%;90;;0;100"));
    }

    #[test]
    fn test_pool_usage_derived_from_size_pair() {
        let records = vec![record(&[
            ("pool name", "A"),
            ("pool health", "OK"),
            ("pool size", "1000.0GB"),
            ("pool available", "100.0GB"),
        ])];
        let thresholds = Thresholds {
            warning_usage: Some(85.0),
            critical_usage: Some(95.0),
            ..Thresholds::default()
        };
        let report = evaluate(Subcommand::Pools, &records, &thresholds, &[]);
        // 900 GB used of 1000 GB: above the 850 warning bound, below 950.
        assert_eq!(report.overall(), Severity::Warning);
        assert!(report.render(false).contains("'A GB'=900;850;950;0;1000"));
    }

    #[test]
    fn test_volume_usage_counts_allocated() {
        let records = vec![record(&[
            ("volume name", "vol1"),
            ("volume health", "OK"),
            ("volume size", "200.0GB"),
            ("volume allocated size", "198.0GB"),
        ])];
        let thresholds = Thresholds {
            warning_usage: Some(85.0),
            critical_usage: Some(95.0),
            ..Thresholds::default()
        };
        let report = evaluate(Subcommand::Volumes, &records, &thresholds, &[]);
        assert_eq!(report.overall(), Severity::Critical);
    }

    #[test]
    fn test_sensor_check_only_touches_temperature_sensors() {
        let records = vec![
            record(&[
                ("sensor name", "CPU Temperature-Ctlr A"),
                ("sensor value", "72 C"),
                ("sensor status", "OK"),
            ]),
            record(&[
                ("sensor name", "Capacitor Cell 1 Voltage-Ctlr A"),
                ("sensor value", "2.48"),
                ("sensor status", "OK"),
            ]),
        ];
        let thresholds = Thresholds {
            warning_temperature: Some(70.0),
            critical_temperature: Some(80.0),
            ..Thresholds::default()
        };
        let report = evaluate(Subcommand::SensorStatus, &records, &thresholds, &[]);
        assert_eq!(report.overall(), Severity::Warning);
        let rendered = report.render(false);
        assert!(rendered.contains("'CPU Temperature-Ctlr A temperature'=72;70;80;0"));
        assert!(!rendered.contains("Voltage-Ctlr A temperature"));
    }

    #[test]
    fn test_volume_statistics_rates() {
        let records = vec![record(&[
            ("volume name", "vol1"),
            ("bytes-per-second", "512.0KB"),
            ("iops", "42"),
        ])];
        let report = evaluate(
            Subcommand::VolumeStatistics,
            &records,
            &Thresholds::default(),
            &[],
        );
        let rendered = report.render(false);
        assert!(rendered.starts_with("OK - vol1 is OK."));
        assert!(rendered.contains("'vol1 iops'=42;;;0"));
        assert!(rendered.contains("'vol1 transfer speed'=0.5MB;;;0"));
    }

    #[test]
    fn test_merge_length_mismatch_is_parse_error() {
        let disks = vec![record(&[("disk id", "disk_01.01")])];
        let stats = Vec::new();
        assert!(matches!(
            merge_disk_statistics(disks, stats),
            Err(CheckError::Parse(_))
        ));
    }

    #[test]
    fn test_record_without_name_is_unknown() {
        let records = vec![EntityRecord::from_pairs(vec![
            ("fru name", None),
            ("fru status", Some("OK".to_string())),
        ])];
        let report = evaluate(Subcommand::Frus, &records, &Thresholds::default(), &[]);
        assert_eq!(report.overall(), Severity::Unknown);
        assert!(report.render(false).starts_with("UNKNOWN - frus #1 is UNKNOWN."));
    }

    #[test]
    fn test_unset_thresholds_emit_no_perfdata() {
        let records = vec![record(&[
            ("disk id", "disk_01.01"),
            ("disk status", "Up"),
            ("disk health", "OK"),
            ("disk temperature", "52 C"),
        ])];
        let report = evaluate(Subcommand::Disks, &records, &Thresholds::default(), &[]);
        assert_eq!(report.overall(), Severity::Ok);
        assert!(!report.render(false).contains('|'));
    }

    #[test]
    fn test_disk_group_description_in_details() {
        let records = vec![record(&[
            ("disk-group name", "dgA01"),
            ("disk-group health", "OK"),
            ("disk-group status", "FTDN"),
        ])];
        let report = evaluate(
            Subcommand::DiskGroups,
            &records,
            &Thresholds::default(),
            &[],
        );
        assert_eq!(report.overall(), Severity::Warning);
        assert!(report
            .render(true)
            .contains("Fault tolerant with a down disk"));
    }
}
