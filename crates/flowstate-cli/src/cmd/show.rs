//! `flow show`: detail view for a single workflow.

use super::Context;
use crate::output::{
    CliError, fail, or_dash, pretty_kv, pretty_rule, pretty_section, render_mode,
};
use clap::Args;
use flowstate_core::extract::Priority;
use flowstate_core::present::{priority_tone, state_icon, state_label, state_tone, state_tooltip};
use flowstate_core::summary::WorkflowDetail;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Workflow id as it appears in `flow list`.
    pub id: String,
}

fn or_none(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("(none)")
}

fn write_text(detail: &WorkflowDetail, w: &mut dyn Write) -> io::Result<()> {
    let s = &detail.summary;
    writeln!(w, "id  {}", s.id)?;
    writeln!(w, "name  {}", s.name)?;
    writeln!(w, "state  {}", s.state)?;
    writeln!(w, "reason  {}", s.reason)?;
    writeln!(w, "priority  {}", s.priority.map_or("-", Priority::badge))?;
    writeln!(w, "issue_url  {}", s.issue_url.as_deref().unwrap_or("-"))?;
    writeln!(
        w,
        "code_review_url  {}",
        s.code_review_url.as_deref().unwrap_or("-")
    )?;
    writeln!(w, "last_activity  {}", or_dash(&s.last_activity))?;
    writeln!(w, "events  {}", s.event_count)?;
    for event in &detail.events {
        writeln!(w, "{event}")?;
    }
    Ok(())
}

fn write_pretty(detail: &WorkflowDetail, w: &mut dyn Write) -> io::Result<()> {
    let s = &detail.summary;
    pretty_section(w, &format!("{}  ({})", s.name, s.id))?;
    pretty_kv(
        w,
        "State",
        state_tone(s.state).paint(&format!("{} {}", state_icon(s.state), state_label(s.state))),
    )?;
    pretty_kv(w, "Meaning", state_tooltip(s.state))?;
    pretty_kv(w, "Reason", s.reason.to_string())?;
    pretty_kv(
        w,
        "Priority",
        s.priority.map_or_else(
            || "(none)".to_string(),
            |p| priority_tone(Some(p)).paint(p.badge()),
        ),
    )?;
    pretty_kv(w, "Issue", or_none(s.issue_url.as_deref()))?;
    pretty_kv(w, "Pull request", or_none(s.code_review_url.as_deref()))?;
    pretty_kv(w, "Last activity", or_none(Some(&s.last_activity)))?;
    pretty_kv(
        w,
        "Created",
        s.created_at.map_or_else(
            || "(unknown)".to_string(),
            |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    )?;
    writeln!(w)?;

    pretty_section(w, &format!("Timeline ({} events)", detail.events.len()))?;
    if detail.events.is_empty() {
        writeln!(w, "No activity yet.")?;
    }
    for event in &detail.events {
        writeln!(w, "{event}")?;
    }
    pretty_rule(w)
}

/// Execute `flow show <id>`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, the workflow id is not
/// in the dataset, or output rendering fails.
pub fn run_show(args: &ShowArgs, ctx: &Context) -> anyhow::Result<()> {
    let dataset = ctx.load_dataset()?;
    let detail = WorkflowDetail::compute(&dataset, args.id.trim(), &ctx.config.links, ctx.now)
        .map_err(|err| fail(ctx.output, &CliError::from(&err)))?;

    render_mode(ctx.output, &detail, write_text, write_pretty)
}
