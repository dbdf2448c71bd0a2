//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fanta_domain::{
    Athlete, AthleteId, LineupEntry, LineupSubmission, OwnerId, PriceBreakdown, Roster, ScoringPeriod,
    TransferWindow,
};
use fanta_manager::{BatchScoreReport, MarketStatus, RepriceReport};
use fanta_scheduler::SchedulerMetrics;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render `value` as JSON, or as the table produced by `table`.
    fn render<T, F>(&self, value: &T, table: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Table => Ok(table()),
        }
    }

    /// Format a roster with its owned athletes.
    pub fn format_roster(&self, roster: &Roster) -> Result<String> {
        self.render(roster, || {
            let mut lines = vec![
                format!("Owner:       {}", roster.owner),
                format!("Budget:      {}", euros(roster.budget)),
                format!("Athletes:    {}", roster.size()),
                format!("Total score: {:.1}", roster.total_score),
            ];

            if roster.owned.is_empty() {
                lines.push(self.colorize("No athletes owned.", "yellow"));
                return lines.join("\n");
            }

            let mut builder = Builder::default();
            builder.push_record(["Athlete", "Position", "Paid"]);
            for owned in &roster.owned {
                builder.push_record([
                    owned.athlete_id.to_string(),
                    owned.position.to_string(),
                    euros(owned.acquisition_price),
                ]);
            }
            lines.push(table(builder));
            lines.join("\n")
        })
    }

    /// Format the athlete list.
    pub fn format_athletes(&self, athletes: &[Athlete]) -> Result<String> {
        self.render(athletes, || {
            if athletes.is_empty() {
                return self.colorize("No athletes found.", "yellow");
            }

            let mut builder = Builder::default();
            builder.push_record(["ID", "Name", "Position", "Age", "Valuation"]);
            for athlete in athletes {
                builder.push_record([
                    athlete.id.to_string(),
                    athlete.name.clone(),
                    athlete.position.to_string(),
                    athlete.age.to_string(),
                    euros(athlete.valuation),
                ]);
            }
            table(builder)
        })
    }

    /// Format the lineup-submission gate.
    pub fn format_submission(&self, submission: &LineupSubmission) -> Result<String> {
        let value = match submission {
            LineupSubmission::Open { period, deadline } => serde_json::json!({
                "open": true,
                "period": period,
                "deadline": deadline,
            }),
            LineupSubmission::Closed(reason) => serde_json::json!({
                "open": false,
                "reason": reason.code(),
            }),
        };

        self.render(&value, || match submission {
            LineupSubmission::Open { period, deadline } => self.success(&format!(
                "Lineups open for period {} until {}",
                period, deadline
            )),
            LineupSubmission::Closed(reason) => {
                self.warning(&format!("Lineups closed: {}", reason))
            }
        })
    }

    /// Format a stored lineup.
    pub fn format_lineup(&self, period: u32, entry: &LineupEntry) -> Result<String> {
        self.render(entry, || {
            let starters = &entry.lineup.starters;
            let mut builder = Builder::default();
            builder.push_record(["Role", "Athletes"]);
            builder.push_record(["GK".to_string(), join_ids(&starters.goalkeeper)]);
            builder.push_record(["DEF".to_string(), join_ids(&starters.defender)]);
            builder.push_record(["MID".to_string(), join_ids(&starters.midfielder)]);
            builder.push_record(["ATT".to_string(), join_ids(&starters.attacker)]);
            builder.push_record(["Bench".to_string(), join_ids(&entry.lineup.bench)]);

            format!(
                "Period {} ({})\n{}",
                period,
                entry.formation,
                table(builder)
            )
        })
    }

    /// Format a single roster score.
    pub fn format_score(&self, owner: &OwnerId, period: u32, score: f64) -> Result<String> {
        let value = serde_json::json!({
            "owner": owner,
            "period": period,
            "score": score,
        });
        self.render(&value, || {
            self.success(&format!("{} scored {:.1} in period {}", owner, score, period))
        })
    }

    /// Format a league-wide scoring report.
    pub fn format_batch(&self, report: &BatchScoreReport) -> Result<String> {
        self.render(report, || {
            let mut lines = Vec::new();

            if !report.scored.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Owner", "Score"]);
                for (owner, score) in &report.scored {
                    builder.push_record([owner.to_string(), format!("{:.1}", score)]);
                }
                lines.push(table(builder));
            }

            for (owner, reason) in &report.failed {
                lines.push(self.error(&format!("{}: {}", owner, reason)));
            }

            let summary = format!(
                "Period {}: {} scored, {} without lineup, {} failed",
                report.period,
                report.scored.len(),
                report.skipped_no_lineup,
                report.failed.len()
            );
            lines.push(if report.is_complete() {
                self.success(&summary)
            } else {
                self.warning(&summary)
            });

            lines.join("\n")
        })
    }

    /// Format a price breakdown.
    pub fn format_price(&self, athlete: &Athlete, breakdown: &PriceBreakdown) -> Result<String> {
        self.render(breakdown, || {
            let mut builder = Builder::default();
            builder.push_record(["Factor", "Value"]);
            builder.push_record(["Age".to_string(), format!("{:.2}", breakdown.age_factor)]);
            builder.push_record(["Role".to_string(), format!("{:.2}", breakdown.role_factor)]);
            builder.push_record([
                "Performance".to_string(),
                format!("{:.2}", breakdown.performance_factor),
            ]);
            builder.push_record(["Price".to_string(), euros(breakdown.price)]);

            format!("{} ({})\n{}", athlete.name, athlete.id, table(builder))
        })
    }

    /// Format a repricing report.
    pub fn format_reprice(&self, report: &RepriceReport) -> Result<String> {
        self.render(report, || {
            self.success(&format!(
                "Repriced {} athlete(s), {} unchanged",
                report.updated, report.unchanged
            ))
        })
    }

    /// Format the market status.
    pub fn format_market(&self, status: &MarketStatus) -> Result<String> {
        self.render(status, || {
            let next = status
                .next_opening
                .map(|at| format!(" (next opening: {})", at))
                .unwrap_or_default();
            if status.is_open {
                self.success(&format!("Market is open{}", next))
            } else {
                self.warning(&format!("Market is closed{}", next))
            }
        })
    }

    /// Format a created window.
    pub fn format_window(&self, window: &TransferWindow) -> Result<String> {
        self.render(window, || {
            self.success(&format!(
                "Transfer window {} from {} to {}",
                window.id, window.start, window.end
            ))
        })
    }

    /// Format a created period.
    pub fn format_period(&self, period: &ScoringPeriod) -> Result<String> {
        self.render(period, || {
            self.success(&format!(
                "Period {} from {} to {}",
                period.number, period.start, period.end
            ))
        })
    }

    /// Format scheduler metrics.
    pub fn format_metrics(&self, metrics: &SchedulerMetrics) -> Result<String> {
        let value = serde_json::json!({
            "windows_opened": metrics.windows_opened,
            "windows_closed": metrics.windows_closed,
            "periods_activated": metrics.periods_activated,
            "periods_completed": metrics.periods_completed,
            "periods_settled": metrics.periods_settled,
            "rosters_scored": metrics.rosters_scored,
            "roster_failures": metrics.roster_failures,
            "athletes_repriced": metrics.athletes_repriced,
            "sweep_count": metrics.sweep_count,
            "total_runtime_ms": metrics.total_runtime_ms,
        });
        self.render(&value, || metrics.summary())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join_ids(ids: &[AthleteId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Format an amount in euros with thousands separators.
pub fn euros(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(" €");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanta_domain::Position;

    fn athlete() -> Athlete {
        Athlete::new(AthleteId::new(276), "Lautaro", Position::Attacker, 26)
            .with_valuation(7_100_000)
    }

    #[test]
    fn test_euros() {
        assert_eq!(euros(0), "0 €");
        assert_eq!(euros(999), "999 €");
        assert_eq!(euros(7_100_000), "7,100,000 €");
        assert_eq!(euros(300_000_000), "300,000,000 €");
    }

    #[test]
    fn test_athletes_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_athletes(&[athlete()]).unwrap();
        assert!(output.contains("Valuation"));
        assert!(output.contains("Lautaro"));
        assert!(output.contains("7,100,000 €"));
    }

    #[test]
    fn test_athletes_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_athletes(&[athlete()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["valuation"], 7_100_000);
    }

    #[test]
    fn test_empty_roster() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let roster = Roster::new(OwnerId::new("alice").unwrap());
        let output = formatter.format_roster(&roster).unwrap();
        assert!(output.contains("300,000,000 €"));
        assert!(output.contains("No athletes owned"));
    }

    #[test]
    fn test_closed_submission_json_carries_code() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let submission = LineupSubmission::Closed(fanta_domain::GateReason::PeriodActive);
        let output = formatter.format_submission(&submission).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["open"], false);
        assert_eq!(value["reason"], fanta_domain::GateReason::PeriodActive.code());
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
