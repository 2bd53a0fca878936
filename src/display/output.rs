use crate::analysis::champion_stats::{UsageReport, UsageRow};
use crate::analysis::session::PlayerAnalysis;
use crate::scrim::{PickCount, ScrimSummary};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct UsageTableRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
    wins: String,
    losses: String,
    win_rate: String,
}

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
}

fn usage_rows(rows: &[UsageRow], top_n: usize) -> Vec<UsageTableRow> {
    rows.iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, row)| {
            let win_rate = format!("{:.0}%", row.win_rate * 100.0);
            UsageTableRow {
                rank: format!("{}", idx + 1),
                champion: row.champion.clone(),
                games: row.games.to_string(),
                wins: row.wins.to_string().green().to_string(),
                losses: row.losses.to_string().red().to_string(),
                win_rate: if row.win_rate >= 0.5 {
                    win_rate.green().to_string()
                } else {
                    win_rate.red().to_string()
                },
            }
        })
        .collect()
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_player_analysis(analysis: &PlayerAnalysis, top_n: usize) {
    println!(
        "\n{}",
        format!("🎮 Champion usage for {}", analysis.handle).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if let Some(error) = &analysis.error {
        display_error(&error.to_string());
        println!("{}\n", "No data available or failed to fetch.".yellow());
        return;
    }

    display_usage_report(&analysis.report, top_n);
}

pub fn display_usage_report(report: &UsageReport, top_n: usize) {
    if report.is_empty() {
        println!(
            "{}",
            "No match data available for the selected queues.".yellow()
        );
    } else {
        print_table(usage_rows(&report.rows, top_n));
        if report.rows.len() > top_n {
            println!("  … {} more champions", report.rows.len() - top_n);
        }
    }

    println!(
        "\n{} {} matches analysed",
        "📈".bold(),
        report.matches_processed
    );
    for notice in &report.notices {
        display_warning(notice);
    }
    if report.cancelled {
        display_warning("Stopped early at the configured cutoff; results are partial");
    }
    println!();
}

pub fn display_scrim_summary(summary: &ScrimSummary, top_n: usize) {
    println!("\n{}", "🗒️  SCRIM SUMMARY".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if summary.games == 0 {
        println!("{}", "No scrim data available.".yellow());
        return;
    }
    println!("{} {} games\n", "📈 Recorded:".bold(), summary.games);

    println!("{}", "Our champion picks".bold());
    print_table(pick_rows(&summary.our_picks, top_n));

    println!("\n{}", "Opponent champion picks".bold());
    print_table(pick_rows(&summary.their_picks, top_n));

    println!("\n{}", "Our scrim win rates".bold());
    print_table(usage_rows(&summary.our_win_rates, top_n));
    println!();
}

fn pick_rows(picks: &[PickCount], top_n: usize) -> Vec<PickRow> {
    picks
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, pick)| PickRow {
            rank: format!("{}", idx + 1),
            champion: pick.champion.clone(),
            games: pick.games.to_string(),
        })
        .collect()
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
