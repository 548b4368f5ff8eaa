//! Generation of an Icinga `CheckCommand` object from the clap command
//! definition, so the plugin can be dropped into an Icinga 2 zone without
//! hand-writing the command configuration.

use std::fmt::Write as _;

use crate::error::CheckError;

/// Environment variable that switches the binary into config-generation
/// mode instead of running a check.
pub const GENERATE_ENV: &str = "GENERATE_ICINGA_COMMAND";

/// Renders an Icinga `CheckCommand` object for the given clap command.
/// Every long option becomes an argument wired to a custom variable of
/// the same name with dashes replaced by underscores.
pub fn command_config(name: &str, cmd: &clap::Command) -> Result<String, CheckError> {
    let exe = std::env::current_exe()
        .map_err(|e| CheckError::InvalidArgument(format!("cannot resolve executable path: {e}")))?;
    let exe = exe
        .to_str()
        .ok_or_else(|| CheckError::InvalidArgument("executable path is not UTF-8".into()))?;

    let mut out = format!("object CheckCommand \"{name}\" {{\n");
    let _ = writeln!(out, "  command = [ \"{exe}\" ]");
    out.push_str("  arguments = {\n");

    for arg in cmd.get_arguments() {
        let Some(long) = arg.get_long() else {
            continue;
        };
        let var = long.replace('-', "_");

        let _ = writeln!(out, "    \"--{long}\" = {{");
        if is_flag(arg) {
            let _ = writeln!(out, "      set_if = \"${var}$\"");
        } else {
            let _ = writeln!(out, "      value = \"${var}$\"");
        }
        if let Some(help) = arg.get_help() {
            let _ = writeln!(out, "      description = \"{}\"", escape(&help.to_string()));
        }
        out.push_str("    }\n");
    }
    out.push_str("  }\n");

    for arg in cmd.get_arguments() {
        let Some(long) = arg.get_long() else {
            continue;
        };
        if let Some(default) = arg.get_default_values().first().and_then(|v| v.to_str()) {
            let var = long.replace('-', "_");
            let _ = writeln!(out, "  vars.{var} = \"{}\"", escape(default));
        }
    }

    out.push_str("}\n");
    Ok(out)
}

/// Prints the command config and exits 0 when [`GENERATE_ENV`] is set.
pub fn print_config_if_requested(name: &str, cmd: &clap::Command) -> Result<(), CheckError> {
    if std::env::var_os(GENERATE_ENV).is_none() {
        return Ok(());
    }

    println!("{}", command_config(name, cmd)?.trim());
    std::process::exit(0);
}

fn is_flag(arg: &clap::Arg) -> bool {
    let values = arg.get_possible_values();
    values.len() == 2
        && values.iter().any(|v| v.get_name() == "true")
        && values.iter().any(|v| v.get_name() == "false")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$")
}
