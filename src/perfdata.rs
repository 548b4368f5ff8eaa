use std::fmt;

/// Unit suffix attached to a perfdata value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    None,
    Percentage,
    Megabytes,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::None => "",
            Unit::Percentage => "%",
            Unit::Megabytes => "MB",
        };
        f.write_str(s)
    }
}

/// One token in the `label=value[unit];warn;crit;min;max` perfdata grammar.
///
/// The trailing positions are optional; empty trailing fields are trimmed
/// so `PerfMetric::new("test", 12.0).with_bounds(Some(14.0), None)` renders
/// as `test=12;14`.
#[derive(Clone, Debug)]
pub struct PerfMetric {
    label: String,
    value: f64,
    unit: Unit,
    warning: Option<f64>,
    critical: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl PerfMetric {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        PerfMetric {
            label: label.into(),
            value,
            unit: Unit::None,
            warning: None,
            critical: None,
            min: None,
            max: None,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_bounds(mut self, warning: Option<f64>, critical: Option<f64>) -> Self {
        self.warning = warning;
        self.critical = critical;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Renders the token. Labels containing `=` or `'` are sanitized and
    /// labels containing spaces are quoted, as required by the plugin
    /// output format.
    pub fn to_token(&self) -> String {
        let label = self.label.replace('=', "_").replace('\'', "''");
        let label = if label.contains(' ') {
            format!("'{}'", label)
        } else {
            label
        };

        let mut s = format!("{}={}{}", label, self.value, self.unit);
        for part in [self.warning, self.critical, self.min, self.max] {
            s.push(';');
            if let Some(v) = part {
                s.push_str(&v.to_string());
            }
        }
        s.trim_end_matches(';').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{PerfMetric, Unit};

    #[test]
    fn test_plain_token() {
        let m = PerfMetric::new("test", 12.0);
        assert_eq!(m.to_token(), "test=12");
    }

    #[test]
    fn test_trailing_fields_are_trimmed() {
        let m = PerfMetric::new("test", 12.0)
            .with_bounds(Some(14.0), None)
            .with_range(Some(0.0), None);
        assert_eq!(m.to_token(), "test=12;14;;0");
    }

    #[test]
    fn test_full_token_with_unit() {
        let m = PerfMetric::new("life left", 85.0)
            .with_unit(Unit::Percentage)
            .with_bounds(Some(70.0), None)
            .with_range(Some(0.0), Some(100.0));
        assert_eq!(m.to_token(), "'life left'=85%;70;;0;100");
    }

    #[test]
    fn test_label_sanitization() {
        let cases = [
            ("test", "test=0"),
            ("test=a", "test_a=0"),
            ("te'st", "te''st=0"),
            ("te st", "'te st'=0"),
        ];
        for (label, expected) in cases {
            assert_eq!(PerfMetric::new(label, 0.0).to_token(), expected);
        }
    }

    #[test]
    fn test_fractional_value() {
        let m = PerfMetric::new("used", 10.5).with_range(Some(0.0), Some(1196.9));
        assert_eq!(m.to_token(), "used=10.5;;;0;1196.9");
    }
}
