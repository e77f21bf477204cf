//! `flow list`: dashboard rows for one state tab and date range.

use super::Context;
use crate::output::{OutputMode, Renderable, or_dash, pretty_rule, render_mode, write_list};
use chrono::{DateTime, Utc};
use clap::Args;
use flowstate_core::extract::{DateRange, Priority};
use flowstate_core::infer::WorkflowState;
use flowstate_core::present::{priority_tone, state_icon, state_label, state_tone};
use flowstate_core::summary::{Dashboard, StateCounts, StateFilter, WorkflowSummary};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// State tab: all, automation_working, needs_user_input, completed.
    /// Defaults to `[dashboard] default_state` in the project config.
    #[arg(short, long)]
    pub state: Option<StateFilter>,

    /// Creation window: last-24h, last-7d, last-30d, all-time.
    #[arg(short, long)]
    pub range: Option<DateRange>,
}

/// `flow list` payload.
#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    state: StateFilter,
    range: DateRange,
    now: DateTime<Utc>,
    counts: StateCounts,
    workflows: Vec<&'a WorkflowSummary>,
}

/// Tabs in display order.
const TABS: [StateFilter; 4] = [
    StateFilter::State(WorkflowState::NeedsUserInput),
    StateFilter::State(WorkflowState::AutomationWorking),
    StateFilter::State(WorkflowState::Completed),
    StateFilter::All,
];

const fn tab_label(filter: StateFilter) -> &'static str {
    match filter {
        StateFilter::All => "All",
        StateFilter::State(state) => state_label(state),
    }
}

impl Renderable for WorkflowSummary {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let tone = state_tone(self.state);
        let badge = self.priority.map_or_else(String::new, |p| {
            format!(
                "{} ",
                priority_tone(Some(p)).paint(&format!("[{}]", p.badge()))
            )
        });
        writeln!(
            w,
            "{} {}{}",
            tone.paint(&format!("{} {}", state_icon(self.state), state_label(self.state))),
            badge,
            self.name
        )?;
        writeln!(w, "    {}  ({})", self.reason, or_dash(&self.last_activity))?;
        if let Some(url) = &self.issue_url {
            writeln!(w, "    issue: {url}")?;
        }
        if let Some(url) = &self.code_review_url {
            writeln!(w, "    pr:    {url}")?;
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            self.id,
            self.state,
            self.priority.map_or("-", Priority::badge),
            or_dash(&self.last_activity),
            self.reason
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATE", "PRIORITY", "LAST_ACTIVITY", "REASON"]
    }
}

fn render_tabs(w: &mut dyn Write, selected: StateFilter, counts: &StateCounts) -> io::Result<()> {
    let tabs: Vec<String> = TABS
        .iter()
        .map(|&tab| {
            let label = format!("{} ({})", tab_label(tab), counts.get(tab));
            if tab == selected {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect();
    writeln!(w, "{}", tabs.join("  "))
}

/// Execute `flow list`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or output rendering fails.
pub fn run_list(args: &ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let dataset = ctx.load_dataset()?;
    let filter = args.state.unwrap_or(ctx.config.dashboard.default_state);
    let range = args.range.unwrap_or(ctx.config.dashboard.default_range);

    let dashboard = Dashboard::build(&dataset, &ctx.config.links, range, ctx.now);
    let payload = ListOutput {
        state: filter,
        range,
        now: ctx.now,
        counts: dashboard.counts(),
        workflows: dashboard.filtered(filter),
    };

    render_mode(
        ctx.output,
        &payload,
        |p, w| {
            let c = &p.counts;
            writeln!(
                w,
                "counts  all={}  needs_user_input={}  automation_working={}  completed={}",
                c.all, c.needs_user_input, c.automation_working, c.completed
            )?;
            write_list(w, &p.workflows, OutputMode::Text)
        },
        |p, w| {
            render_tabs(w, p.state, &p.counts)?;
            pretty_rule(w)?;
            if p.workflows.is_empty() {
                writeln!(w, "No workflows in this view.")?;
            } else {
                write_list(w, &p.workflows, OutputMode::Pretty)?;
            }
            pretty_rule(w)?;
            writeln!(w, "{}", p.range.label())
        },
    )
}
