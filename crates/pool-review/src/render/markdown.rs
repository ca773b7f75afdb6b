//! Markdown rendering
//!
//! Lays a [`ReviewReport`] out as a pull request comment: a changed items
//! table, nested where-used and derived lists with changed items in bold,
//! and detail tables for parts, entities and units.

use crate::report::{
    DerivedSection, EntityDetail, PartDetail, ReviewReport, UnitDetail, WhereUsedRow,
};
use crate::validator::LintWarning;
use std::fmt::{self, Display, Formatter};

/// Render a report as Markdown
#[must_use]
pub fn render_markdown(report: &ReviewReport) -> String {
    Markdown(report).to_string()
}

/// Markdown view of a report
#[derive(Debug, Clone, Copy)]
pub struct Markdown<'a>(pub &'a ReviewReport);

impl Display for Markdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_changed(f, report)?;
        write_non_items(f, report)?;
        write_overview(f, &report.where_used)?;
        write_unassociated(f, report)?;
        if let Some(derived) = &report.derived {
            write_derived(f, derived)?;
        }
        writeln!(f, "# Details")?;
        writeln!(f, "## Parts")?;
        for part in &report.parts {
            write_part(f, part)?;
        }
        writeln!(f, "## Entities")?;
        for entity in &report.entities {
            write_entity(f, entity)?;
        }
        writeln!(f, "## Units")?;
        for unit in &report.units {
            write_unit(f, unit)?;
        }
        write_integrity(f, report)
    }
}

/// Escape a table cell
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Wrap non-empty text in a marker when `cond` holds
fn surround(marker: &str, s: &str, cond: bool) -> String {
    if cond && !s.is_empty() {
        format!("{marker}{s}{marker}")
    } else {
        s.to_string()
    }
}

fn warning_suffix(warnings: &[LintWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!(" (:warning: {})", w.message))
        .collect()
}

fn indent(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_changed(f: &mut Formatter<'_>, report: &ReviewReport) -> fmt::Result {
    writeln!(f, "# Items in this PR")?;
    writeln!(f, "| State | Type | Name | Filename |")?;
    writeln!(f, "| --- | --- | --- | --- |")?;
    for row in &report.changed {
        writeln!(
            f,
            "| {} | {} | {}{} | {} |",
            row.status,
            row.kind,
            cell(&row.name),
            warning_suffix(&row.warnings),
            cell(&row.path)
        )?;
    }
    writeln!(f)
}

fn write_non_items(f: &mut Formatter<'_>, report: &ReviewReport) -> fmt::Result {
    if report.non_items.is_empty() {
        return Ok(());
    }
    writeln!(f, "# Non-items")?;
    for path in &report.non_items {
        writeln!(f, " - {path}")?;
    }
    writeln!(f)
}

fn write_overview(f: &mut Formatter<'_>, rows: &[WhereUsedRow]) -> fmt::Result {
    writeln!(f, "# Parts overview (excluding derived)")?;
    writeln!(f, "Bold items are from this PR")?;
    for row in rows {
        indent(f, row.depth)?;
        let label = format!("{} {}", row.kind, row.name);
        writeln!(
            f,
            "- {}{}",
            surround("**", &label, row.bold),
            warning_suffix(&row.warnings)
        )?;
    }
    writeln!(f)
}

fn write_unassociated(f: &mut Formatter<'_>, report: &ReviewReport) -> fmt::Result {
    if report.unassociated.is_empty() {
        return Ok(());
    }
    writeln!(f, "# Items not associated with any part")?;
    for item in &report.unassociated {
        writeln!(f, " - {} {}", item.kind, item.name)?;
    }
    writeln!(f)
}

fn write_derived(f: &mut Formatter<'_>, derived: &DerivedSection) -> fmt::Result {
    writeln!(f, "# Derived parts")?;
    writeln!(f, "Bold items are from this PR")?;
    for row in &derived.rows {
        indent(f, row.depth)?;
        writeln!(f, "- {}", surround("**", &row.name, row.bold))?;
    }
    writeln!(f)?;

    writeln!(f, "# Parts table")?;
    writeln!(f, "Values in italic are inherited")?;
    writeln!(f, "| MPN | Value | Manufacturer | Datasheet | Description | Tags |")?;
    writeln!(f, "| --- | ----- | ------------ | --------- | ----------- | ---- |")?;
    for row in &derived.table {
        f.write_str("|")?;
        for attr in &row.attributes {
            write!(f, " {} |", surround("*", &cell(&attr.value), attr.inherited))?;
        }
        writeln!(
            f,
            " {} |",
            surround("*", &cell(&row.tags.join(", ")), row.tags_inherited)
        )?;
    }
    writeln!(f)
}

fn write_part(f: &mut Formatter<'_>, part: &PartDetail) -> fmt::Result {
    writeln!(f, "### {}", part.mpn)?;
    if let Some(base) = &part.base_mpn {
        writeln!(f, "Inherits from {base}")?;
    }
    writeln!(f, "| Attribute | Value |")?;
    writeln!(f, "| --- | --- |")?;
    for attr in &part.attributes {
        write!(
            f,
            "| {} | {}{}",
            attr.key,
            cell(&attr.value),
            warning_suffix(&attr.warnings)
        )?;
        if let Some(count) = attr.other_parts {
            write!(f, " ({count} other parts)")?;
        }
        if attr.inherited {
            f.write_str(" (inherited)")?;
        }
        writeln!(f, " |")?;
    }
    writeln!(f, "| Tags | {} |", cell(&part.tags.join(", ")))?;
    writeln!(f)
}

fn write_entity(f: &mut Formatter<'_>, entity: &EntityDetail) -> fmt::Result {
    writeln!(f, "### {}", entity.name)?;
    writeln!(f, "| Attribute | Value |")?;
    writeln!(f, "| --- | --- |")?;
    writeln!(
        f,
        "| Manufacturer | {} ({} other parts) |",
        cell(&entity.manufacturer),
        entity.other_parts
    )?;
    writeln!(f, "| Prefix | {} |", cell(&entity.prefix))?;
    writeln!(f, "| Tags | {} |", cell(&entity.tags.join(", ")))?;
    writeln!(f)?;

    if !entity.gates.is_empty() {
        writeln!(f, "| Gate | Suffix | Swap group | Unit |")?;
        writeln!(f, "| --- | --- | --- | --- |")?;
        for gate in &entity.gates {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                cell(&gate.name),
                cell(&gate.suffix),
                gate.swap_group,
                cell(&gate.unit)
            )?;
        }
    }
    for warning in &entity.warnings {
        writeln!(f, ":warning: {}", warning.message)?;
    }
    writeln!(f)
}

fn write_unit(f: &mut Formatter<'_>, unit: &UnitDetail) -> fmt::Result {
    writeln!(f, "### {}", unit.name)?;
    writeln!(f, "| Attribute | Value |")?;
    writeln!(f, "| --- | --- |")?;
    writeln!(
        f,
        "| Manufacturer | {} ({} other parts) |",
        cell(&unit.manufacturer),
        unit.other_parts
    )?;
    writeln!(f)?;

    if !unit.pins.is_empty() {
        writeln!(f, "| Pin | Direction | Alternate names |")?;
        writeln!(f, "| --- | --- | --- |")?;
        for pin in &unit.pins {
            writeln!(
                f,
                "| {} | {} | {} |",
                cell(&pin.name),
                pin.direction,
                cell(&pin.alternate_names.join(", "))
            )?;
        }
    }
    for warning in &unit.warnings {
        writeln!(f, ":warning: {}", warning.message)?;
    }
    writeln!(f)
}

fn write_integrity(f: &mut Formatter<'_>, report: &ReviewReport) -> fmt::Result {
    if report.integrity.is_empty() {
        return Ok(());
    }
    writeln!(f, "# Integrity warnings")?;
    for warning in &report.integrity {
        writeln!(f, " - {warning}")?;
    }
    Ok(())
}
