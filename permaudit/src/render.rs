//! Human-readable report output for `--format text`.

use std::io::{self, Write};

use claude_settings::PermissionEntry;

use crate::report::fetch::{DomainRecommendation, FetchReport};
use crate::report::tools::{Recommendation, Report};
use crate::style;

const ENTRY_WIDTH: usize = 40;

pub fn render_report(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let meta = &report.metadata;
    writeln!(
        out,
        "{} {}",
        style::bold("permaudit tools"),
        style::dim(&format!(
            "{} · last {} days · {} files · {} tool calls",
            meta.analysis_date, meta.days_analyzed, meta.files_scanned, meta.total_tool_calls
        ))
    )?;

    let recs = &report.recommendations;
    section(out, "Add to allow", recs.add.len())?;
    for rec in &recs.add {
        recommendation_line(out, rec)?;
    }

    section(out, "Review", recs.review.len())?;
    for rec in &recs.review {
        recommendation_line(out, rec)?;
    }

    section(out, "Unused", recs.unused.len())?;
    for unused in &recs.unused {
        writeln!(
            out,
            "  {:<6} {:<ENTRY_WIDTH$} {}",
            unused.list,
            unused.entry,
            style::dim(&unused.note)
        )?;
    }

    if !recs.bare_entry_warnings.is_empty() {
        section(out, "Bare entries", recs.bare_entry_warnings.len())?;
        for tool in &recs.bare_entry_warnings {
            writeln!(
                out,
                "  {} {}",
                style::yellow(tool),
                style::dim("matches every invocation of the tool")
            )?;
        }
    }

    Ok(())
}

pub fn render_fetch_report(report: &FetchReport, out: &mut impl Write) -> io::Result<()> {
    let meta = &report.metadata;
    writeln!(
        out,
        "{} {}",
        style::bold("permaudit fetch"),
        style::dim(&format!(
            "{} · last {} days · {} files · {} WebFetch · {} Fetch",
            meta.analysis_date,
            meta.days_analyzed,
            meta.files_scanned,
            meta.webfetch_calls,
            meta.fetch_calls
        ))
    )?;

    let recs = &report.recommendations;
    section(out, "Add to allow", recs.add.len())?;
    for rec in &recs.add {
        domain_line(out, rec)?;
    }

    section(out, "Review", recs.review.len())?;
    for rec in &recs.review {
        domain_line(out, rec)?;
    }

    section(out, "Unused", recs.unused.len())?;
    for unused in &recs.unused {
        writeln!(
            out,
            "  {:<ENTRY_WIDTH$} {}",
            unused.domain,
            style::dim(&unused.note)
        )?;
    }

    if !recs.add_to_sandbox.is_empty() {
        section(out, "Add to sandbox", recs.add_to_sandbox.len())?;
        for rec in &recs.add_to_sandbox {
            domain_line(out, rec)?;
        }
    }

    Ok(())
}

fn section(out: &mut impl Write, title: &str, count: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", style::header(title), style::dim(&format!("({count})")))
}

fn recommendation_line(out: &mut impl Write, rec: &Recommendation) -> io::Result<()> {
    let entry = PermissionEntry::new(rec.tool_name, rec.pattern.as_str()).to_string();
    writeln!(
        out,
        "  {:>5}  {:<ENTRY_WIDTH$} {} {}",
        rec.count,
        entry,
        style::category(rec.category, &format!("{:<7}", rec.category)),
        style::dim(&rec.reason)
    )
}

fn domain_line(out: &mut impl Write, rec: &DomainRecommendation) -> io::Result<()> {
    writeln!(
        out,
        "  {:>5}  {:<ENTRY_WIDTH$} {} {}",
        rec.count,
        rec.domain,
        style::category(rec.category, &format!("{:<7}", rec.category)),
        style::dim(&rec.reason)
    )
}
