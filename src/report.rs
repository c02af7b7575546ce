//! Console renderings of query results and table summaries.

use serde::Serialize;
use std::fmt::Write as _;

use crate::{format_state_vector, IdPair, QueryResult, SeedDatabase};

const TABLE_HEADER: &str = "WaitMilliseconds Seed     State                                ";
const TABLE_RULE: &str = "---------------- -------- -------------------------------------";

/// One fixed-width result line.
pub fn format_row(result: &QueryResult) -> String {
    format!(
        "{:>16} {:08X} {}",
        result.distance,
        result.seed,
        format_state_vector(&result.state)
    )
}

/// Fixed-width table of results, with header and rule.
pub fn render_table(results: &[QueryResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TABLE_HEADER}");
    let _ = writeln!(out, "{TABLE_RULE}");
    for r in results {
        let _ = writeln!(out, "{}", format_row(r));
    }
    out
}

#[derive(Serialize)]
struct JsonRow {
    distance: u64,
    seed: String,
    state: String,
}

/// Results as a pretty JSON array with hex seed and state strings.
pub fn render_json(results: &[QueryResult]) -> Result<String, serde_json::Error> {
    let rows: Vec<JsonRow> = results
        .iter()
        .map(|r| JsonRow {
            distance: r.distance,
            seed: format!("{:08X}", r.seed),
            state: format_state_vector(&r.state),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Summary of a loaded table.
#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub target: IdPair,
    pub timeout: u32,
    pub entries: usize,
    pub min_advance: Option<u32>,
    pub max_advance: Option<u32>,
}

impl TableSummary {
    pub fn of(db: &SeedDatabase) -> Self {
        let bounds = db.advance_bounds();
        Self {
            target: db.target(),
            timeout: db.timeout(),
            entries: db.len(),
            min_advance: bounds.map(|b| b.0),
            max_advance: bounds.map(|b| b.1),
        }
    }

    pub fn render(&self) -> String {
        let advances = match (self.min_advance, self.max_advance) {
            (Some(lo), Some(hi)) => format!("{lo}..={hi}"),
            _ => "-".to_string(),
        };
        format!(
            "tid {} sid {}\ntimeout {}\nentries {}\nadvances {}\n",
            self.target.low, self.target.high, self.timeout, self.entries, advances
        )
    }
}
