//! Output formatting for query and lookup results

use crate::index::{Destination, Entry, MatchMode};
use crate::utils::fold_case;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// `--color` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the config's `color` switch and whether stdout is a terminal
    ///
    /// `Always` forces escapes even when `NO_COLOR` or `TERM=dumb` is set.
    pub fn choice(self, config_color: bool, is_terminal: bool) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if config_color && is_terminal => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// Print query results: each label with the matched part highlighted,
/// followed by its destinations
pub fn print_matches(
    entries: &[&Entry],
    term: &str,
    mode: MatchMode,
    color: ColorChoice,
) -> io::Result<()> {
    let mut out = StandardStream::stdout(color);
    write_matches(&mut out, entries, term, mode)
}

/// Print the destinations of one label
pub fn print_lookup(label: &str, destinations: &[Destination], color: ColorChoice) -> io::Result<()> {
    let mut out = StandardStream::stdout(color);
    write_label(&mut out, label, None)?;
    write_destinations(&mut out, destinations)
}

/// Note for a result list cut short by the limit, `None` when complete
pub fn truncation_notice(shown: usize, total: usize) -> Option<String> {
    (total > shown).then(|| format!("... and {} more (use -n 0 to show all)", total - shown))
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value)?;
    writeln!(lock)
}

pub fn write_matches<W: WriteColor>(
    out: &mut W,
    entries: &[&Entry],
    term: &str,
    mode: MatchMode,
) -> io::Result<()> {
    for entry in entries {
        let span = match_span(&entry.label, term, mode);
        write_label(out, &entry.label, span)?;
        write_destinations(out, &entry.destinations)?;
    }
    Ok(())
}

/// Print a label, highlighting `span` (byte range) when given
fn write_label<W: WriteColor>(out: &mut W, label: &str, span: Option<(usize, usize)>) -> io::Result<()> {
    let (start, end) = span.unwrap_or((0, 0));

    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", &label[..start])?;

    if end > start {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", &label[start..end])?;
        out.set_color(ColorSpec::new().set_bold(true))?;
    }

    write!(out, "{}", &label[end..])?;
    out.reset()?;
    writeln!(out)
}

fn write_destinations<W: WriteColor>(out: &mut W, destinations: &[Destination]) -> io::Result<()> {
    for dest in destinations {
        write!(out, "    ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", dest.href())?;
        out.reset()?;
        write!(out, "  {}", dest.display_name)?;

        if let Some(container) = &dest.container_name {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, " ({})", container)?;
            out.reset()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Byte range of `label` matched by `term`, compared case-insensitively
fn match_span(label: &str, term: &str, mode: MatchMode) -> Option<(usize, usize)> {
    let needle = fold_case(term);
    if needle.is_empty() {
        return None;
    }

    let starts: Vec<usize> = match mode {
        MatchMode::Prefix => vec![0],
        MatchMode::Substring => label.char_indices().map(|(i, _)| i).collect(),
    };

    for start in starts {
        let mut folded = String::new();
        for (offset, c) in label[start..].char_indices() {
            folded.extend(c.to_lowercase());
            if !needle.starts_with(folded.as_str()) {
                break;
            }
            if folded.len() == needle.len() {
                return Some((start, start + offset + c.len_utf8()));
            }
        }
    }

    None
}
