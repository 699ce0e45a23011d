//! Terminal output formatting.
//!
//! Everything here draws an already interpreted [`DisplayState`]. Render
//! functions return strings; the `print_*` wrappers write them to stdout.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use lexa_core::interpret::errors::ErrorView;
use lexa_core::interpret::status::{Status, StatusView};
use lexa_core::interpret::tokens::{CountSource, TokenTable};
use lexa_core::profile::{TokenLayout, TokenStyle};
use lexa_core::{DisplayState, Profile};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const INLINE_HEADING: &str = "Command breakdown (lexical analysis):";
const TABLE_HEADING: &str = "Tokens";
const LEXEME_HEADER: &str = "Lexeme";
const TOTALS_LABEL: &str = "Total";
const SUCCESS_LINE: &str = "No lexical, syntax or semantic errors found.";

/// Get terminal width, defaulting to 80.
pub fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Center a plain string within a given visual width.
fn pad_center(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        return s.to_string();
    }
    let left = (width - visual) / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(width - visual - left))
}

fn paint_status(text: &str, status: Status) -> ColoredString {
    match status {
        Status::Correct => text.green().bold(),
        Status::Warning => text.yellow().bold(),
        Status::Error => text.red().bold(),
        Status::Unknown => text.normal(),
    }
}

fn paint_token(lexeme: &str, style: TokenStyle) -> ColoredString {
    match style {
        TokenStyle::Command => lexeme.cyan().bold(),
        TokenStyle::Flag => lexeme.yellow(),
        TokenStyle::Param => lexeme.green(),
        TokenStyle::Keyword => lexeme.magenta().bold(),
        TokenStyle::Identifier => lexeme.blue(),
        TokenStyle::Literal => lexeme.green(),
        TokenStyle::Symbol => lexeme.white(),
        TokenStyle::Plain => lexeme.normal(),
        TokenStyle::Unknown => lexeme.dimmed(),
    }
}

/// Render the status box: icon, label, optional badge, then the message.
pub fn render_status(status: &StatusView, message: Option<&str>) -> String {
    let mut heading = String::new();
    if let Some(icon) = status.icon {
        heading.push_str(icon);
        heading.push(' ');
    }
    heading.push_str(&status.label);
    if let Some(badge) = &status.badge {
        heading.push_str(&format!("  [{}]", badge));
    }

    let mut width = UnicodeWidthStr::width(heading.as_str());
    if let Some(message) = message {
        width = width.max(UnicodeWidthStr::width(message));
    }
    let rule = "─".repeat(width + 2);

    let mut out = String::new();
    out.push_str(&format!("┌{}\n", rule));
    out.push_str(&format!("│ {}\n", paint_status(&heading, status.status)));
    if let Some(message) = message {
        out.push_str(&format!("│ {}\n", message));
    }
    out.push_str(&format!("└{}\n", rule));
    out
}

/// Render tokens as one colored line, wrapped to `width` columns.
pub fn render_inline_tokens(table: &TokenTable, width: usize) -> String {
    let mut out = format!("{}\n", INLINE_HEADING.bold());
    let width = width.max(10);

    let mut line_width = 0;
    for row in &table.rows {
        let token_width = UnicodeWidthStr::width(row.lexeme.as_str());
        if line_width > 0 && line_width + 1 + token_width > width {
            out.push('\n');
            line_width = 0;
        }
        if line_width > 0 {
            out.push(' ');
            line_width += 1;
        }
        out.push_str(&paint_token(&row.lexeme, row.style).to_string());
        line_width += token_width;
    }
    out.push('\n');
    out
}

/// Render tokens as a table with one marked category column per row and a
/// totals row.
pub fn render_token_table(table: &TokenTable) -> String {
    let lexeme_width = table
        .rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.lexeme.as_str()))
        .chain([UnicodeWidthStr::width(LEXEME_HEADER), UnicodeWidthStr::width(TOTALS_LABEL)])
        .max()
        .unwrap_or(0);

    let column_widths: Vec<usize> = table
        .headers
        .iter()
        .zip(&table.totals)
        .map(|(header, total)| {
            UnicodeWidthStr::width(header.as_str())
                .max(total.count.to_string().len())
                .max(3)
        })
        .collect();

    let separator = format!(
        "{}\n",
        "─".repeat(lexeme_width + column_widths.iter().map(|w| w + 3).sum::<usize>())
    );

    let mut out = format!("{}\n", TABLE_HEADING.bold());

    let mut header = pad_right(LEXEME_HEADER, lexeme_width).bold().to_string();
    for (name, &w) in table.headers.iter().zip(&column_widths) {
        header.push_str(" │ ");
        header.push_str(&pad_center(name, w).bold().to_string());
    }
    out.push_str(&header);
    out.push('\n');
    out.push_str(&separator);

    for row in &table.rows {
        let mut line = paint_token(&pad_right(&row.lexeme, lexeme_width), row.style).to_string();
        for (&marked, &w) in row.cells.iter().zip(&column_widths) {
            line.push_str(" │ ");
            line.push_str(&pad_center(if marked { "X" } else { "" }, w));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(&separator);
    let mut totals = pad_right(TOTALS_LABEL, lexeme_width).bold().to_string();
    for (total, &w) in table.totals.iter().zip(&column_widths) {
        totals.push_str(" │ ");
        let cell = pad_center(&total.count.to_string(), w);
        if total.is_consistent() {
            totals.push_str(&cell);
        } else {
            totals.push_str(&cell.yellow().to_string());
        }
    }
    out.push_str(&totals);
    out.push('\n');

    if table.unclassified > 0 {
        out.push_str(&format!(
            "{}\n",
            format!("{} token(s) matched no category", table.unclassified).dimmed()
        ));
    }
    for total in table.count_mismatches() {
        let source = match total.source {
            CountSource::Reported => "reported",
            CountSource::Tallied => "tallied",
        };
        out.push_str(&format!(
            "{}\n",
            format!(
                "{}: {} count {} but {} token(s) listed",
                total.category, source, total.count, total.tallied
            )
            .yellow()
        ));
    }

    out
}

/// Render either the success line or one section per error category.
pub fn render_errors(view: &ErrorView) -> String {
    match view {
        ErrorView::Clean => format!("{} {}\n", "✔".green(), SUCCESS_LINE.green()),
        ErrorView::Errors { sections } => {
            let mut out = String::new();
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!(
                    "{} {}\n",
                    section.label.red().bold(),
                    format!("({})", section.messages.len()).dimmed()
                ));
                for message in &section.messages {
                    out.push_str(&format!("  {} {}\n", "•".red(), message));
                }
            }
            out
        }
    }
}

/// Render a full analysis result.
pub fn render_state(state: &DisplayState, width: usize) -> String {
    let mut blocks: Vec<String> = Vec::new();

    match &state.status {
        Some(status) => blocks.push(render_status(status, state.message.as_deref())),
        None => {
            if let Some(message) = &state.message {
                blocks.push(format!("{}\n", message));
            }
        }
    }

    if let Some(table) = &state.tokens {
        blocks.push(match table.layout {
            TokenLayout::Inline => render_inline_tokens(table, width),
            TokenLayout::Table => render_token_table(table),
        });
    }

    if let Some(errors) = &state.errors {
        blocks.push(render_errors(errors));
    }

    blocks.join("\n")
}

/// Render a transport or server failure as a single line.
pub fn render_network_error(message: &str) -> String {
    format!("{} {}", "✗".red().bold(), message.red())
}

/// Print a full analysis result.
pub fn print_state(state: &DisplayState) {
    print!("{}", render_state(state, term_width()));
}

/// Print a transport or server failure.
pub fn print_network_error(message: &str) {
    eprintln!("{}", render_network_error(message));
}

/// Print the available profiles.
pub fn print_profiles(profiles: &[Profile]) {
    for (i, profile) in profiles.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            profile.name.cyan().bold(),
            format!("({})", profile.title).dimmed()
        );
        println!("  {}: {}", "Request field".bold(), profile.request_field.as_str());
        println!(
            "  {}: {}",
            "Layout".bold(),
            match profile.token_layout {
                TokenLayout::Inline => "inline",
                TokenLayout::Table => "table",
            }
        );
        println!("  {}", "Categories".bold());

        let name_width = profile
            .categories
            .iter()
            .map(|c| UnicodeWidthStr::width(c.name.as_str()))
            .max()
            .unwrap_or(0);
        for category in &profile.categories {
            let mut discriminators: Vec<String> =
                category.codes.iter().map(|c| c.to_string()).collect();
            discriminators.extend(category.aliases.iter().cloned());

            let line = if discriminators.is_empty() {
                category.label().to_string()
            } else {
                format!("{} ({})", category.label(), discriminators.join(", "))
            };
            println!(
                "    {} {}",
                paint_token(&pad_right(&category.name, name_width), category.style),
                line.dimmed()
            );
        }
    }
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
