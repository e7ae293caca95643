//! Colorful console output for roster solves.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::time::Duration;

use crate::model::ModelStats;
use crate::projection::ScheduleResult;
use crate::solver::SolveStatus;

/// ASCII art banner for server and bench startup.
pub fn print_banner() {
    let banner = r#"
  ____  _     _  __ _     ____           _
 / ___|| |__ (_)/ _| |_  |  _ \ ___  ___| |_ ___ _ __
 \___ \| '_ \| | |_| __| | |_) / _ \/ __| __/ _ \ '__|
  ___) | | | | |  _| |_  |  _ < (_) \__ \ ||  __/ |
 |____/|_| |_|_|_|  \__| |_| \_\___/|___/\__\___|_|
"#;
    println!("{}", banner.cyan().bold());
    println!(
        "  {} {}\n",
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black(),
        "Shift Roster".bright_cyan()
    );
}

/// Prints the size of the roster problem.
pub fn print_problem(employees: usize, shifts: usize, days: usize) {
    println!(
        "{} {} {} Problem: employees ({}), shifts ({}), days ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Model]".bright_cyan(),
        employees.to_formatted_string(&Locale::en).bright_yellow(),
        shifts.to_formatted_string(&Locale::en).bright_yellow(),
        days.to_formatted_string(&Locale::en).bright_yellow()
    );
}

/// Prints the size of the built model.
pub fn print_model(stats: &ModelStats, build_time: Duration) {
    println!(
        "{} {} {} Built in ({}): variables ({}), constraints ({}), objective terms ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Model]".bright_cyan(),
        format_duration(build_time).yellow(),
        stats.variables.to_formatted_string(&Locale::en).bright_yellow(),
        stats.constraints.to_formatted_string(&Locale::en).bright_yellow(),
        stats.objective_terms.to_formatted_string(&Locale::en).bright_yellow()
    );
}

/// Prints solver completion summary.
pub fn print_solving_ended(total_duration: Duration, objective: f64, status: SolveStatus) {
    println!(
        "{} {} {} Solving ended: time spent ({}), objective ({}), status ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_duration(total_duration).yellow(),
        format!("{objective:.1}").bright_magenta().bold(),
        status.as_str().white()
    );

    // 60 chars wide, 56 char content area
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════╗".bright_cyan());

    let status_text = match status {
        SolveStatus::Optimal => "✓ OPTIMAL ROSTER FOUND",
        SolveStatus::Feasible => "~ FEASIBLE ROSTER (optimality not proven)",
    };
    let status_colored = match status {
        SolveStatus::Optimal => status_text.bright_green().bold().to_string(),
        SolveStatus::Feasible => status_text.yellow().bold().to_string(),
    };
    print_centered(status_text, &status_colored);

    println!("{}", "╠══════════════════════════════════════════════════════════╣".bright_cyan());
    print_row("Objective:", &format!("{objective:.1}"));
    print_row("Solving Time:", &format!("{:.2}s", total_duration.as_secs_f64()));
    println!("{}", "╚══════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

/// Prints the failure box when no roster could be produced.
pub fn print_solving_failed(reason: &str) {
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════╗".bright_cyan());
    let text = "✗ NO ROSTER";
    print_centered(text, &text.bright_red().bold().to_string());
    println!("{}", "╠══════════════════════════════════════════════════════════╣".bright_cyan());
    print_row("Reason:", reason);
    println!("{}", "╚══════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

/// Prints one line per day with the employees on each shift.
pub fn print_roster(result: &ScheduleResult) {
    for day in result.days() {
        let shifts: Vec<String> = day
            .shifts
            .iter()
            .map(|(shift, ids)| {
                format!("{} {}", format!("{shift:>5}:").bright_black(), ids.join(" "))
            })
            .collect();
        println!(
            "    {} {:>7} │ {}",
            "→".bright_blue(),
            day.label().white(),
            shifts.join(" │ ")
        );
    }
}

fn print_centered(plain: &str, colored: &str) {
    let padding = 56usize.saturating_sub(plain.chars().count());
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    println!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    );
}

fn print_row(label: &str, value: &str) {
    println!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    );
}

/// Formats a duration nicely.
fn format_duration(d: Duration) -> String {
    let total_ms = d.as_millis();
    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Returns a timestamp string.
fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{}.{:03}", d.as_secs(), d.subsec_millis()))
        .unwrap_or_else(|_| "0.000".to_string())
}
