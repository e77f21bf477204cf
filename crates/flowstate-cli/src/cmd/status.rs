//! `flow status`: per-state counts for a date range.
//!
//! The quick orientation view: how many workflows need a human, how many
//! the agent is still working on, how many are done.

use super::Context;
use crate::output::{pretty_rule, pretty_section, render_mode};
use chrono::{DateTime, Utc};
use clap::Args;
use flowstate_core::extract::DateRange;
use flowstate_core::infer::WorkflowState;
use flowstate_core::present::{state_icon, state_label, state_tone};
use flowstate_core::summary::{Dashboard, StateCounts, StateFilter};
use serde::Serialize;
use std::io::{self, Write};

/// Arguments for `flow status`.
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Creation window: last-24h, last-7d, last-30d, all-time.
    #[arg(short, long)]
    pub range: Option<DateRange>,
}

/// Full status output payload.
#[derive(Debug, Serialize)]
struct StatusOutput {
    range: DateRange,
    now: DateTime<Utc>,
    counts: StateCounts,
}

fn write_text(status: &StatusOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "range  {}", status.range)?;
    writeln!(w, "all  {}", status.counts.all)?;
    for state in WorkflowState::ALL {
        writeln!(
            w,
            "{state}  {}",
            status.counts.get(StateFilter::State(state))
        )?;
    }
    Ok(())
}

fn write_pretty(status: &StatusOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Workflows: {}", status.range.label()))?;
    for state in WorkflowState::ALL {
        let label = format!("{} {}", state_icon(state), state_label(state));
        writeln!(
            w,
            "{}{:>6}",
            state_tone(state).paint(&format!("{label:<20}")),
            status.counts.get(StateFilter::State(state))
        )?;
    }
    pretty_rule(w)?;
    writeln!(w, "{:<20}{:>6}", "Total", status.counts.all)
}

/// Execute `flow status`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or output rendering fails.
pub fn run_status(args: &StatusArgs, ctx: &Context) -> anyhow::Result<()> {
    let dataset = ctx.load_dataset()?;
    let range = args.range.unwrap_or(ctx.config.dashboard.default_range);
    let dashboard = Dashboard::build(&dataset, &ctx.config.links, range, ctx.now);

    let status = StatusOutput {
        range,
        now: ctx.now,
        counts: dashboard.counts(),
    };
    render_mode(ctx.output, &status, write_text, write_pretty)
}
