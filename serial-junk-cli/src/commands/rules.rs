use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serial_junk_core::DeriveRules;

use crate::CliError;
use crate::config::{RulesOrigin, resolve_rules, rules_path};

/// Print the effective rules and where they came from.
///
/// This is the command's output, not a log line, so it goes straight to
/// stdout regardless of `--quiet` or `--verbose`.
pub(crate) fn run_rules_show(rules_flag: Option<&Path>) -> Result<(), CliError> {
    let (rules, origin) = resolve_rules(rules_flag)?;
    print!("{}", render_rules(&rules, &origin)?);
    Ok(())
}

fn render_rules(rules: &DeriveRules, origin: &RulesOrigin) -> Result<String, CliError> {
    Ok(format!(
        "# {}\n{}",
        origin.if_supports_color(Stdout, |t| t.dimmed()),
        rules.to_toml_string()?
    ))
}

pub(crate) fn run_rules_path() {
    println!("{}", rules_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_rules_load_back() {
        let rules = DeriveRules::default();
        let text = render_rules(&rules, &RulesOrigin::Defaults).unwrap();
        let text = strip_ansi_escapes::strip_str(&text);
        assert!(text.starts_with("# built-in defaults\n"));
        assert_eq!(DeriveRules::from_toml_str(&text, "rendered").unwrap(), rules);
    }
}
