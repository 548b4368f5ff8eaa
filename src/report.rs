use std::fmt::Write as _;
use std::process;

use crate::perfdata::PerfMetric;
use crate::severity::Severity;

/// Width of the label column in the verbose field tables.
const DETAIL_COLUMN: usize = 40;

/// Aggregated state of a single monitored entity, e.g. one controller,
/// one disk or one pool.
///
/// Starts out OK; every classified field is folded in via [`observe`],
/// which can only raise the severity.
///
/// [`observe`]: EntityStatus::observe
#[derive(Clone, Debug)]
pub struct EntityStatus {
    name: String,
    severity: Severity,
    saw_critical: bool,
    details: Vec<(String, String)>,
}

impl EntityStatus {
    pub fn new(name: impl Into<String>) -> Self {
        EntityStatus {
            name: name.into(),
            severity: Severity::Ok,
            saw_critical: false,
            details: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregate severity of the entity. A definitive CRITICAL finding
    /// wins over UNKNOWN fields: the operator should see the failure, not
    /// the gap in the data next to it.
    pub fn severity(&self) -> Severity {
        if self.saw_critical {
            Severity::Critical
        } else {
            self.severity
        }
    }

    /// Folds one field classification into the entity state. Monotonic:
    /// the severity never decreases.
    pub fn observe(&mut self, severity: Severity) {
        if severity == Severity::Critical {
            self.saw_critical = true;
        }
        if severity > self.severity {
            self.severity = severity;
        }
    }

    /// Records a field for the verbose detail table. Values are kept
    /// verbatim as returned by the array.
    pub fn push_detail(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.details.push((label.into(), value.into()));
    }

    fn summary_line(&self) -> String {
        let severity = self.severity();
        format!("{} - {} is {}.", severity, self.name, severity)
    }
}

/// Full result of one probe run, ready to print in the plugin format:
/// one summary line per entity in response order, perfdata appended to
/// the first line after `|`, and optional per-entity field tables.
#[derive(Debug, Default)]
pub struct Report {
    entities: Vec<EntityStatus>,
    perfdata: Vec<PerfMetric>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    pub fn push(&mut self, entity: EntityStatus) {
        self.entities.push(entity);
    }

    pub fn push_metric(&mut self, metric: PerfMetric) {
        self.perfdata.push(metric);
    }

    pub fn entities(&self) -> &[EntityStatus] {
        &self.entities
    }

    /// Maximum severity over all entities, with UNKNOWN outranking
    /// CRITICAL only when no entity produced a definitive CRITICAL
    /// finding. A report without any entity is UNKNOWN: no definitive
    /// check succeeded.
    pub fn overall(&self) -> Severity {
        if self
            .entities
            .iter()
            .any(|e| e.severity() == Severity::Critical)
        {
            return Severity::Critical;
        }
        self.entities
            .iter()
            .map(EntityStatus::severity)
            .max()
            .unwrap_or(Severity::Unknown)
    }

    pub fn exit_code(&self) -> i32 {
        self.overall().exit_code()
    }

    pub fn render(&self, verbose: bool) -> String {
        if self.entities.is_empty() {
            return format!("{} - no matching objects in the array response.", Severity::Unknown);
        }

        let mut lines: Vec<String> = self
            .entities
            .iter()
            .map(EntityStatus::summary_line)
            .collect();

        if !self.perfdata.is_empty() {
            let tokens: Vec<String> = self.perfdata.iter().map(PerfMetric::to_token).collect();
            let first = &mut lines[0];
            first.push_str(" | ");
            first.push_str(&tokens.join(" "));
        }

        let mut out = lines.join("\n");

        if verbose {
            for entity in &self.entities {
                if entity.details.is_empty() {
                    continue;
                }
                out.push('\n');
                for (label, value) in &entity.details {
                    let _ = write!(out, "\n{:<width$}{}", label, value, width = DETAIL_COLUMN);
                }
            }
        }

        out
    }

    /// Prints the rendered report and exits with the overall state's code.
    pub fn print_and_exit(&self, verbose: bool) -> ! {
        println!("{}", self.render(verbose));
        process::exit(self.exit_code());
    }
}
