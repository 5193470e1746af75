use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focus_reminder_core::storage::DATE_FORMAT;
use focus_reminder_core::{Config, CsvActivityLog};

#[derive(Subcommand)]
pub enum LogAction {
    /// Show the activity recorded on one day
    Show {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Print records as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List the days that have an activity log
    Days,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let log = CsvActivityLog::new(config.log_dir()?);

    match action {
        LogAction::Show { date, json } => {
            let date = match date {
                Some(text) => NaiveDate::parse_from_str(&text, DATE_FORMAT)
                    .map_err(|e| format!("invalid date '{text}': {e}"))?,
                None => Local::now().date_naive(),
            };
            let records = log.read_day(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No activity recorded on {}", date.format(DATE_FORMAT));
                return Ok(());
            }
            for record in &records {
                if record.remarks.is_empty() {
                    println!("{}  {:<18} {}", record.timestamp_text(), record.kind.as_str(), record.detail);
                } else {
                    println!(
                        "{}  {:<18} {} ({})",
                        record.timestamp_text(),
                        record.kind.as_str(),
                        record.detail,
                        record.remarks
                    );
                }
            }
        }
        LogAction::Days => {
            for day in log.days()? {
                println!("{}", day.format(DATE_FORMAT));
            }
        }
    }
    Ok(())
}
