//! Terminal rendering of a dashboard.
//!
//! Colors go through `colored`, so `set_override(false)` yields plain text.

use colored::Colorize;
use pickline_core::{Code3, Dashboard, DrawSession, ParsedDate, SearchHits, ShapeInfo};
use unicode_width::UnicodeWidthStr;

/// Codes per line in the prediction grids.
const CODES_PER_LINE: usize = 10;

/// Right-pad `text` to `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn badge(session: DrawSession) -> String {
    let text = pad(session.badge(), 3);
    match session {
        DrawSession::Midday => text.yellow().to_string(),
        DrawSession::Evening => text.blue().to_string(),
        DrawSession::Unknown => text,
    }
}

fn code_cell(code: &Code3, hit: bool) -> String {
    if hit {
        code.as_str().black().on_green().bold().to_string()
    } else {
        code.as_str().to_string()
    }
}

fn code_grid(out: &mut String, codes: &[Code3], hits: Option<&[usize]>) {
    if codes.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".dimmed()));
        return;
    }
    for (row, chunk) in codes.chunks(CODES_PER_LINE).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, code)| {
                let index = row * CODES_PER_LINE + col;
                code_cell(code, hits.is_some_and(|h| h.contains(&index)))
            })
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ")));
    }
}

/// Render the dashboard as terminal text.
pub fn dashboard(dashboard: &Dashboard, hits: Option<&SearchHits>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", dashboard.title.bold().underline()));
    if let Some(updated) = &dashboard.last_updated_display {
        out.push_str(&format!("{} {}\n", "Last updated:".dimmed(), updated));
    }
    out.push('\n');

    // History
    let recent = dashboard.recent();
    out.push_str(&format!("{} {}\n", "▶".blue(), "Recent Draws".green().bold()));
    if recent.is_empty() {
        out.push_str(&format!("  {}\n", "(no history)".dimmed()));
    }
    let date_width = recent
        .iter()
        .map(|e| UnicodeWidthStr::width(e.display_date.as_str()))
        .max()
        .unwrap_or(0);
    for (i, entry) in recent.iter().enumerate() {
        let hit = hits.is_some_and(|h| h.history.contains(&i));
        let code = entry
            .code
            .as_ref()
            .map_or_else(|| "---".dimmed().to_string(), |c| code_cell(c, hit));
        let date = pad(&entry.display_date, date_width);
        let date = if entry.timestamp.is_parsed() {
            date
        } else {
            date.dimmed().to_string()
        };
        out.push_str(&format!("  {}  {}  {}\n", date, badge(entry.session), code));
    }
    let hidden = dashboard.history.len() - recent.len();
    if hidden > 0 {
        out.push_str(&format!("  {}\n", format!("... {} older", hidden).dimmed()));
    }
    out.push('\n');

    // Game 1
    out.push_str(&format!(
        "{} {} {}\n",
        "▶".blue(),
        "Game 1".green().bold(),
        format!("({} codes)", dashboard.game1.len()).dimmed()
    ));
    code_grid(&mut out, dashboard.game1.codes(), hits.map(|h| h.game1.as_slice()));
    out.push('\n');

    // Game 2
    let mut heading = format!("({} codes", dashboard.game2.len());
    if let Some(target) = dashboard.target {
        heading.push_str(&format!(", leading digit {}", target));
    }
    heading.push(')');
    out.push_str(&format!(
        "{} {} {}\n",
        "▶".blue(),
        "Game 2".green().bold(),
        heading.dimmed()
    ));
    code_grid(&mut out, dashboard.game2_display(), hits.map(|h| h.game2.as_slice()));

    if let Some(hits) = hits {
        out.push('\n');
        let summary = match hits.total() {
            0 => format!("No matches for {}", hits.query),
            1 => format!("1 match for {}", hits.query),
            n => format!("{} matches for {}", n, hits.query),
        };
        out.push_str(&format!("{}\n", summary.cyan()));
    }

    out
}

/// Render the shape list for `--shapes`.
pub fn shapes(infos: &[ShapeInfo]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Date Shapes".bold().underline()));
    out.push_str(&format!(
        "{}\n",
        "Tried in this order; the first matching layout decides.".dimmed()
    ));
    out.push('\n');

    for info in infos {
        out.push_str(&format!("  {} {}", "→".cyan(), info.id.yellow()));
        if !info.description.is_empty() {
            out.push_str(&format!(" - {}", info.description));
        }
        out.push('\n');
        if !info.examples.is_empty() {
            let examples: Vec<_> = info
                .examples
                .iter()
                .take(3)
                .map(|e| e.green().to_string())
                .collect();
            let line = format!("e.g. {}", examples.join(", "));
            out.push_str(&format!("      {}\n", line.dimmed()));
        }
    }
    out
}

/// Render the result of `--parse-date`.
pub fn parsed_date(input: &str, parsed: Option<&ParsedDate>) -> String {
    let Some(parsed) = parsed else {
        return format!("{} → {}", input, "unparseable".red());
    };
    let shown = pickline_core::display::month_day_year(parsed.timestamp())
        .unwrap_or_else(|| parsed.millis.to_string());
    let mut detail = parsed.shape.to_string();
    if parsed.ambiguous {
        detail.push_str(", ambiguous");
    }
    format!(
        "{} → {} {} {}",
        input,
        shown.green(),
        format!("({})", detail).dimmed(),
        parsed.millis
    )
}
