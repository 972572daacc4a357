use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::core::report::{self, ReportOptions};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::report_view::print_report;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { event, json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let ev = EventLogic::get(&mut pool, event)?;

        let opts = ReportOptions {
            chart_color: cfg.chart_color.clone(),
        };
        let rep = report::execute(&pool, Some(&ev.name), &opts)?;

        if *json {
            let out = serde_json::to_string_pretty(&rep)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_report(&format!("{} ({})", ev.title, ev.name), &rep);
        }
    }

    Ok(())
}
