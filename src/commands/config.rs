//! Config subcommands handler

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use mediasync::config::migrate_config;
use mediasync::theme::{ansi, current_theme};

use super::{config_path, load_config};

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_override: Option<&Path>) -> Result<()> {
    let config = load_config(config_override)?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Print the resolved configuration file path.
pub fn handle_path(config_override: Option<&Path>) -> Result<()> {
    println!("{}", config_path(config_override)?.display());
    Ok(())
}

/// Migrate the config file by adding missing fields.
///
/// A missing file is created with full defaults. Changes are previewed
/// and applied after confirmation, or directly with `--yes`.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(config_override: Option<&Path>, yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = config_path(config_override)?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    if !file_exists {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create with default settings.")
        );
        println!();
        print_diff_preview(&result.content, &[], true);
        println!();

        if !yes && !prompt_confirmation(&format!("Create {}?", config_path.display()))? {
            println!("{}", theme.primary_text("No changes made."));
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, &result.content)?;
        println!(
            "{}",
            theme.success_text("Config file created successfully.")
        );
        return Ok(());
    }

    let total_fields = result.added_fields.len();
    let total_sections = result.sections_added.len();
    if total_sections > 0 {
        println!(
            "{}",
            theme.primary_text(&format!(
                "Found {} missing field(s) in {} new section(s):",
                total_fields, total_sections
            ))
        );
    } else {
        println!(
            "{}",
            theme.primary_text(&format!("Found {} missing field(s):", total_fields))
        );
    }
    println!();

    print_diff_preview(&result.content, &result.added_fields, false);
    println!();

    if !yes
        && !prompt_confirmation(&format!(
            "Apply these changes to {}?",
            config_path.display()
        ))?
    {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    fs::write(&config_path, &result.content)?;
    println!("{}", theme.success_text("Config updated successfully."));

    Ok(())
}

/// Lines of a diff-style preview for the migrated content.
///
/// Added fields get a `+` prefix; for new files every non-empty line does.
fn diff_preview_lines(
    new_content: &str,
    added_fields: &[String],
    is_new_file: bool,
    color: bool,
) -> Vec<String> {
    let (green, reset) = if color {
        (ansi::GREEN, ansi::RESET)
    } else {
        ("", "")
    };
    let mut lines = Vec::new();
    let mut current_section = String::new();
    let mut pending_header: Option<String> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            current_section = section.to_string();
            let section_prefix = format!("{}.", section);
            let has_additions = added_fields.iter().any(|f| f.starts_with(&section_prefix));
            pending_header = (is_new_file || has_additions).then(|| line.to_string());
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let is_added = trimmed.find('=').is_some_and(|eq| {
            let key = trimmed[..eq].trim();
            added_fields.contains(&format!("{}.{}", current_section, key))
        });

        if is_new_file || is_added {
            if let Some(header) = pending_header.take() {
                lines.push(format!("{}+ {}{}", green, header, reset));
            }
            lines.push(format!("{}+ {}{}", green, line, reset));
        }
    }
    lines
}

fn print_diff_preview(new_content: &str, added_fields: &[String], is_new_file: bool) {
    let color = current_theme().color;
    for line in diff_preview_lines(new_content, added_fields, is_new_file, color) {
        println!("{}", line);
    }
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_marks_only_added_fields() {
        let content = "[sync]\nseek_tolerance_secs = 1.0\nbuffering_progress_cap = 99.0\n\n[logging]\nlevel = \"warn\"\n";
        let added = vec![
            "sync.buffering_progress_cap".to_string(),
            "logging.level".to_string(),
        ];
        let lines = diff_preview_lines(content, &added, false, false);
        assert_eq!(
            lines,
            vec![
                "+ [sync]",
                "+ buffering_progress_cap = 99.0",
                "+ [logging]",
                "+ level = \"warn\"",
            ]
        );
    }

    #[test]
    fn preview_for_new_file_shows_everything() {
        let content = "[logging]\nlevel = \"warn\"\n";
        let lines = diff_preview_lines(content, &[], true, false);
        assert_eq!(lines, vec!["+ [logging]", "+ level = \"warn\""]);
    }

    #[test]
    fn colored_preview_uses_green() {
        let lines = diff_preview_lines("[logging]\nlevel = \"warn\"\n", &[], true, true);
        assert!(lines.iter().all(|l| l.starts_with(ansi::GREEN)));
    }
}
