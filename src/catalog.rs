//! Static per-subcommand tables: which API query to issue, which fields to
//! pull out of every returned object, and how to classify them.
//!
//! The only thing that varies across subcommands is this data, so the
//! whole catalog is declarative; the evaluator in [`crate::eval`] walks
//! these tables instead of branching per subcommand.

use clap::ValueEnum;

use crate::perfdata::Unit;

/// One of the fixed check categories. Each maps to exactly one API query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Subcommand {
    Controllers,
    DiskGroups,
    Disks,
    Fans,
    Frus,
    NetworkParameters,
    Pools,
    Ports,
    PowerSupplies,
    SensorStatus,
    System,
    Volumes,
    VolumeStatistics,
}

impl Subcommand {
    pub fn query(self) -> &'static QuerySpec {
        match self {
            Subcommand::Controllers => &CONTROLLERS,
            Subcommand::DiskGroups => &DISK_GROUPS,
            Subcommand::Disks => &DISKS,
            Subcommand::Fans => &FANS,
            Subcommand::Frus => &FRUS,
            Subcommand::NetworkParameters => &NETWORK_PARAMETERS,
            Subcommand::Pools => &POOLS,
            Subcommand::Ports => &PORTS,
            Subcommand::PowerSupplies => &POWER_SUPPLIES,
            Subcommand::SensorStatus => &SENSOR_STATUS,
            Subcommand::System => &SYSTEM,
            Subcommand::Volumes => &VOLUMES,
            Subcommand::VolumeStatistics => &VOLUME_STATISTICS,
        }
    }
}

/// Field to extract from each OBJECT: display label plus the `name`
/// attribute of the PROPERTY element carrying it.
pub struct FieldSpec {
    pub label: &'static str,
    pub property: &'static str,
}

const fn field(label: &'static str, property: &'static str) -> FieldSpec {
    FieldSpec { label, property }
}

/// Finite token -> severity table for one field. A token in none of the
/// three sets classifies as UNKNOWN, as does an absent field.
pub struct TokenCheck {
    pub label: &'static str,
    pub ok: &'static [&'static str],
    pub warning: &'static [&'static str],
    pub critical: &'static [&'static str],
}

/// The `health` property uses the same token set on every object type.
const fn health(label: &'static str) -> TokenCheck {
    TokenCheck {
        label,
        ok: &["OK"],
        warning: &["Degraded"],
        critical: &["Fault"],
    }
}

/// Documented direction of badness for a numeric metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    HigherIsWorse,
    LowerIsWorse,
}

/// Which caller-supplied threshold pair applies to a numeric check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdKind {
    Temperature,
    LifeLeft,
    PowerOnHours,
    FanSpeed,
    MediaErrors,
    NonmediaErrors,
    BlockReassigns,
    BadBlocks,
}

/// Numeric field comparison, direction-adjusted: `>=` for higher-is-worse
/// bounds, `<=` for inverted metrics such as remaining SSD life.
pub struct NumericCheck {
    pub label: &'static str,
    /// Short metric name appended to the entity name in perfdata labels.
    pub perf_label: &'static str,
    pub kind: ThresholdKind,
    pub direction: Direction,
    /// Unit suffix the array appends to the raw value, e.g. `%` or ` C`.
    pub strip_suffix: Option<&'static str>,
    /// Restricts the check to entities whose name contains this needle
    /// (temperature sensors among voltage and charge sensors).
    pub name_contains: Option<&'static str>,
    pub unit: Unit,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Capacity usage derived from a pair of size fields (GB strings), with
/// thresholds given as percent of the total.
pub struct UsageCheck {
    pub total: &'static str,
    pub counterpart: &'static str,
    /// Whether the counterpart field is remaining space (pools) rather
    /// than consumed space (volumes).
    pub counterpart_is_free: bool,
}

/// Everything needed to run and judge one subcommand.
pub struct QuerySpec {
    /// Path element after `/api/show/`.
    pub endpoint: &'static str,
    /// `basetype` attribute of the OBJECT elements to collect.
    pub basetype: &'static str,
    /// Label of the field identifying the entity.
    pub name_label: &'static str,
    pub fields: &'static [FieldSpec],
    pub token_checks: &'static [TokenCheck],
    pub numeric_checks: &'static [NumericCheck],
    pub usage: Option<UsageCheck>,
}

pub static SYSTEM: QuerySpec = QuerySpec {
    endpoint: "system",
    basetype: "system",
    name_label: "product id",
    fields: &[
        field("product id", "product-id"),
        field("system name", "system-name"),
        field("midplane serial number", "midplane-serial-number"),
        field("system health", "health"),
        field("system health reason", "health-reason"),
        field("other MC status", "other-MC-status"),
    ],
    token_checks: &[
        health("system health"),
        TokenCheck {
            label: "other MC status",
            ok: &["Operational"],
            warning: &["Not Communicating"],
            critical: &["Not Operational"],
        },
    ],
    numeric_checks: &[],
    usage: None,
};

pub static CONTROLLERS: QuerySpec = QuerySpec {
    endpoint: "controllers",
    basetype: "controllers",
    name_label: "controller id",
    fields: &[
        field("controller id", "controller-id"),
        field("controller model", "model"),
        field("controller status", "status"),
        field("controller health", "health"),
        field("controller redundancy status", "redundancy-status"),
        field("controller redundancy mode", "redundancy-mode"),
        field("controller failed", "failed-over"),
        field("controller failed reason", "fail-over-reason"),
        field("controller serial", "serial-number"),
        field("disk number", "disks"),
        field("ip address", "ip-address"),
        field("mac address", "mac-address"),
        field("controller health reason", "health-reason"),
        field("controller health recommendation", "health-recommendation"),
    ],
    token_checks: &[
        health("controller health"),
        TokenCheck {
            label: "controller status",
            ok: &["Operational"],
            warning: &["Not Installed"],
            critical: &["Down"],
        },
        TokenCheck {
            label: "controller redundancy status",
            ok: &["Redundant"],
            warning: &["Operational but not redundant"],
            critical: &["Down"],
        },
        TokenCheck {
            label: "controller redundancy mode",
            ok: &["Active-Active ULP"],
            warning: &["Failed Over", "Single Controller"],
            critical: &["Down"],
        },
        TokenCheck {
            label: "controller failed",
            ok: &["No"],
            warning: &[],
            critical: &["Yes"],
        },
    ],
    numeric_checks: &[],
    usage: None,
};

pub static DISK_GROUPS: QuerySpec = QuerySpec {
    endpoint: "disk-groups",
    basetype: "disk-groups",
    name_label: "disk-group name",
    fields: &[
        field("disk-group name", "name"),
        field("disk-group health", "health"),
        field("disk-group status", "status"),
        field("disk-group raid type", "raidtype"),
        field("disk-group related pool", "pool"),
        field("disk-group disk count", "diskcount"),
        field("disk-group size", "size"),
        field("disk-group available", "freespace"),
        field("disk-group current job", "current-job"),
        field("disk-group health reason", "health-reason"),
        field("disk-group health recomm.", "health-recommendation"),
    ],
    token_checks: &[
        health("disk-group health"),
        TokenCheck {
            label: "disk-group status",
            ok: &["FTOL"],
            warning: &["UP", "FTDN", "STOP", "MSNG"],
            critical: &["CRIT", "DMGD", "OFFL", "QTCR", "QTDN", "QTOF", "QTUN"],
        },
    ],
    numeric_checks: &[],
    usage: None,
};

/// Vendor-documented meaning of the disk-group status codes, surfaced in
/// the verbose detail table for non-OK groups.
pub fn disk_group_status_description(code: &str) -> Option<&'static str> {
    let description = match code {
        "CRIT" => "Critical. The disk group is online but isn't fault tolerant because some of its disks are down.",
        "DMGD" => "Damaged. The disk group is online and fault tolerant, but some of its disks are damaged.",
        "FTDN" => "Fault tolerant with a down disk. The disk group is online and fault tolerant, but some of its disks are down.",
        "FTOL" => "Fault tolerant and online.",
        "MSNG" => "Missing. The disk group is online and fault tolerant, but some of its disks are missing.",
        "OFFL" => "Offline. Either the disk group is using offline initialization, or its disks are down and data may be lost.",
        "QTCR" => "Quarantined critical. The disk group is critical with at least one inaccessible disk.",
        "QTDN" => "Quarantined with a down disk. The disk group is fault tolerant but degraded.",
        "QTOF" => "Quarantined offline. The disk group is offline with multiple inaccessible disks causing user data to be incomplete.",
        "QTUN" => "Quarantined unsupported. The disk group contains data in a format that is not supported by this system.",
        "STOP" => "The disk group is stopped.",
        "UNKN" => "Unknown.",
        "UP" => "Up. The disk group is online and does not have fault-tolerant attributes.",
        _ => return None,
    };
    Some(description)
}

pub static DISKS: QuerySpec = QuerySpec {
    endpoint: "disks",
    basetype: "drives",
    name_label: "disk id",
    fields: &[
        field("disk id", "durable-id"),
        field("disk slot", "slot"),
        field("disk status", "status"),
        field("disk health", "health"),
        field("disk life left", "ssd-life-left"),
        field("disk power on hours", "power-on-hours"),
        field("disk model", "model"),
        field("disk serial", "serial-number"),
        field("disk architecture", "architecture"),
        field("disk interface", "interface"),
        field("disk transfer rate", "transfer-rate"),
        field("disk size", "size"),
        field("disk temperature", "temperature"),
        field("disk owner controller", "owner"),
        field("disk pool usage", "usage"),
        field("disk pool", "storage-pool-name"),
        field("disk disk-group usage", "disk-group"),
    ],
    token_checks: &[
        TokenCheck {
            label: "disk status",
            ok: &["Up"],
            warning: &["Warning", "Disconnected"],
            critical: &["Error"],
        },
        health("disk health"),
    ],
    numeric_checks: &[
        NumericCheck {
            label: "disk life left",
            perf_label: "life left",
            kind: ThresholdKind::LifeLeft,
            direction: Direction::LowerIsWorse,
            strip_suffix: Some("%"),
            name_contains: None,
            unit: Unit::Percentage,
            min: Some(0.0),
            max: Some(100.0),
        },
        NumericCheck {
            label: "disk power on hours",
            perf_label: "power on hours",
            kind: ThresholdKind::PowerOnHours,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "disk temperature",
            perf_label: "temperature",
            kind: ThresholdKind::Temperature,
            direction: Direction::HigherIsWorse,
            strip_suffix: Some(" C"),
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Media Errors Port 1",
            perf_label: "Media Errors Port 1",
            kind: ThresholdKind::MediaErrors,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Media Errors Port 2",
            perf_label: "Media Errors Port 2",
            kind: ThresholdKind::MediaErrors,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Non-media Errors Port 1",
            perf_label: "Non-media Errors Port 1",
            kind: ThresholdKind::NonmediaErrors,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Non-media Errors Port 2",
            perf_label: "Non-media Errors Port 2",
            kind: ThresholdKind::NonmediaErrors,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Block Reassignments Port 1",
            perf_label: "Block Reassignments Port 1",
            kind: ThresholdKind::BlockReassigns,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Block Reassignments Port 2",
            perf_label: "Block Reassignments Port 2",
            kind: ThresholdKind::BlockReassigns,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Bad Blocks Port 1",
            perf_label: "Bad Blocks Port 1",
            kind: ThresholdKind::BadBlocks,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
        NumericCheck {
            label: "Bad Blocks Port 2",
            perf_label: "Bad Blocks Port 2",
            kind: ThresholdKind::BadBlocks,
            direction: Direction::HigherIsWorse,
            strip_suffix: None,
            name_contains: None,
            unit: Unit::None,
            min: Some(0.0),
            max: None,
        },
    ],
    usage: None,
};

/// Companion query merged into the `disks` records by position; the array
/// reports drives and drive statistics in the same order.
pub static DISK_STATISTICS: QuerySpec = QuerySpec {
    endpoint: "disk-statistics",
    basetype: "disk-statistics",
    name_label: "disk id",
    fields: &[
        field("disk id", "durable-id"),
        field("Media Errors Port 1", "number-of-media-errors-1"),
        field("Media Errors Port 2", "number-of-media-errors-2"),
        field("Non-media Errors Port 1", "number-of-nonmedia-errors-1"),
        field("Non-media Errors Port 2", "number-of-nonmedia-errors-2"),
        field("Block Reassignments Port 1", "number-of-block-reassigns-1"),
        field("Block Reassignments Port 2", "number-of-block-reassigns-2"),
        field("Bad Blocks Port 1", "number-of-bad-blocks-1"),
        field("Bad Blocks Port 2", "number-of-bad-blocks-2"),
    ],
    token_checks: &[],
    numeric_checks: &[],
    usage: None,
};

pub static FANS: QuerySpec = QuerySpec {
    endpoint: "fans",
    basetype: "fan",
    name_label: "fan name",
    fields: &[
        field("fan name", "name"),
        field("fan health", "health"),
        field("fan status 1", "status"),
        field("fan status 2", "status-ses"),
        field("fan speed", "speed"),
        field("fan location", "location"),
        field("fan position", "position"),
        field("fan health reason", "health-reason"),
        field("fan health recomm.", "health-recommendation"),
    ],
    token_checks: &[
        health("fan health"),
        TokenCheck {
            label: "fan status 1",
            ok: &["Up"],
            warning: &["Off", "Missing"],
            critical: &["Error"],
        },
        TokenCheck {
            label: "fan status 2",
            ok: &["OK"],
            warning: &["Warning", "Unrecoverable"],
            critical: &["Critical"],
        },
    ],
    numeric_checks: &[NumericCheck {
        label: "fan speed",
        perf_label: "speed",
        kind: ThresholdKind::FanSpeed,
        direction: Direction::LowerIsWorse,
        strip_suffix: None,
        name_contains: None,
        unit: Unit::None,
        min: Some(0.0),
        max: None,
    }],
    usage: None,
};

pub static FRUS: QuerySpec = QuerySpec {
    endpoint: "frus",
    basetype: "enclosure-fru",
    name_label: "fru name",
    fields: &[
        field("fru name", "name"),
        field("fru description", "description"),
        field("fru part number", "part-number"),
        field("fru serial number", "serial-number"),
        field("fru manufacturing date", "mfg-date"),
        field("fru location", "fru-location"),
        field("fru status", "fru-status"),
    ],
    token_checks: &[TokenCheck {
        label: "fru status",
        ok: &["OK"],
        warning: &["Invalid Data", "Absent"],
        critical: &["Fault"],
    }],
    numeric_checks: &[],
    usage: None,
};

pub static NETWORK_PARAMETERS: QuerySpec = QuerySpec {
    endpoint: "network-parameters",
    basetype: "network-parameters",
    name_label: "management port",
    fields: &[
        field("management port", "durable-id"),
        field("management port ip address", "ip-address"),
        field("management port health", "health"),
    ],
    token_checks: &[health("management port health")],
    numeric_checks: &[],
    usage: None,
};

pub static POOLS: QuerySpec = QuerySpec {
    endpoint: "pools",
    basetype: "pools",
    name_label: "pool name",
    fields: &[
        field("pool name", "name"),
        field("pool health", "health"),
        field("pool serial", "serial-number"),
        field("pool owner controller", "owner"),
        field("pool type", "storage-type"),
        field("pool size", "total-size"),
        field("pool available", "total-avail"),
        field("pool health reason", "health-reason"),
        field("pool health recommendation", "health-recommendation"),
    ],
    token_checks: &[health("pool health")],
    numeric_checks: &[],
    usage: Some(UsageCheck {
        total: "pool size",
        counterpart: "pool available",
        counterpart_is_free: true,
    }),
};

pub static PORTS: QuerySpec = QuerySpec {
    endpoint: "ports",
    basetype: "port",
    name_label: "FC port name",
    fields: &[
        field("FC port name", "port"),
        field("FC port type", "port-type"),
        field("FC port status", "status"),
        field("FC port health", "health"),
        field("FC port actual speed", "actual-speed"),
    ],
    token_checks: &[
        TokenCheck {
            label: "FC port status",
            ok: &["Up"],
            warning: &["Warning", "Disconnected"],
            critical: &["Error"],
        },
        health("FC port health"),
    ],
    numeric_checks: &[],
    usage: None,
};

pub static POWER_SUPPLIES: QuerySpec = QuerySpec {
    endpoint: "power-supplies",
    basetype: "power-supplies",
    name_label: "psu name",
    fields: &[
        field("psu name", "name"),
        field("psu description", "description"),
        field("psu part number", "part-number"),
        field("psu serial number", "serial-number"),
        field("psu manufacturing date", "mfg-date"),
        field("psu location", "location"),
        field("psu status", "status"),
        field("psu health", "health"),
        field("psu health reason", "health-reason"),
        field("psu health recommendation", "health-recommendation"),
    ],
    token_checks: &[
        health("psu health"),
        TokenCheck {
            label: "psu status",
            ok: &["Up"],
            warning: &["Off", "Missing"],
            critical: &["Error"],
        },
    ],
    numeric_checks: &[],
    usage: None,
};

pub static SENSOR_STATUS: QuerySpec = QuerySpec {
    endpoint: "sensor-status",
    basetype: "sensors",
    name_label: "sensor name",
    fields: &[
        field("sensor name", "sensor-name"),
        field("sensor value", "value"),
        field("sensor status", "status"),
    ],
    token_checks: &[TokenCheck {
        label: "sensor status",
        ok: &["OK"],
        warning: &["Warning", "Unrecoverable"],
        critical: &["Critical"],
    }],
    numeric_checks: &[NumericCheck {
        label: "sensor value",
        perf_label: "temperature",
        kind: ThresholdKind::Temperature,
        direction: Direction::HigherIsWorse,
        strip_suffix: Some(" C"),
        name_contains: Some("Temperature"),
        unit: Unit::None,
        min: Some(0.0),
        max: None,
    }],
    usage: None,
};

pub static VOLUMES: QuerySpec = QuerySpec {
    endpoint: "volumes",
    basetype: "volumes",
    name_label: "volume name",
    fields: &[
        field("volume name", "volume-name"),
        field("volume health", "health"),
        field("volume size", "total-size"),
        field("volume allocated size", "allocated-size"),
        field("virtual disk name", "virtual-disk-name"),
        field("storage pool name", "storage-pool-name"),
        field("raid type", "raidtype"),
        field("volume health reason", "health-reason"),
        field("volume health recommendation", "health-recommendation"),
    ],
    token_checks: &[health("volume health")],
    numeric_checks: &[],
    usage: Some(UsageCheck {
        total: "volume size",
        counterpart: "volume allocated size",
        counterpart_is_free: false,
    }),
};

pub static VOLUME_STATISTICS: QuerySpec = QuerySpec {
    endpoint: "volume-statistics",
    basetype: "volume-statistics",
    name_label: "volume name",
    fields: &[
        field("volume name", "volume-name"),
        field("bytes-per-second", "bytes-per-second"),
        field("iops", "iops"),
    ],
    token_checks: &[],
    numeric_checks: &[],
    usage: None,
};
