//! Replay command (`order-board replay`)
//!
//! Runs a scripted session against a fresh board and reports how each step
//! went, followed by the final board.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;

use super::print_json;
use crate::config::Config;
use crate::controller::{BoardSnapshot, HandleResult, OrderBoard};
use crate::error::Result;
use crate::page::capitalize;
use crate::script::{Script, StepReport};

pub struct ReplayOptions {
    pub script: PathBuf,
    pub json: bool,
    pub html: bool,
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    steps: &'a [StepReport],
    board: BoardSnapshot,
}

pub fn cmd_replay(config: Config, options: ReplayOptions) -> Result<()> {
    let script = Script::load(&options.script)?;
    let mut board = OrderBoard::new(config)?;
    let reports = script.run(&mut board)?;

    if options.json {
        return print_json(&ReplayOutput {
            steps: &reports,
            board: board.snapshot(),
        });
    }

    if options.html {
        println!("{}", board.to_html());
        return Ok(());
    }

    for report in &reports {
        println!("{}", format_step(report));
    }
    if !reports.is_empty() {
        println!();
    }
    print!("{}", format_board(&board.snapshot()));
    Ok(())
}

fn format_step(report: &StepReport) -> String {
    let label = format!("{:>3}. {:<7}", report.step, report.action);
    let status = match (&report.error, report.result) {
        (Some(error), _) => format!("error: {error}").red().to_string(),
        (None, HandleResult::Handled) => "ok".green().to_string(),
        (None, HandleResult::Ignored) => "ignored".dimmed().to_string(),
    };
    format!("{label} {status}")
}

fn format_board(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();
    for column in &snapshot.columns {
        let heading = format!("{} ({})", capitalize(&column.name), column.orders.len());
        out.push_str(&format!("{}\n", heading.bold()));
        for order in &column.orders {
            out.push_str(&format!(
                "  {}  {}  table {}\n",
                order.id.as_str().cyan(),
                order.title,
                order.table
            ));
        }
    }
    out
}
