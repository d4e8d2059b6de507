//! Converts pager output into owned ratatui lines.
//!
//! Pagers such as `delta` emit ANSI SGR escape sequences (`ESC [ … m`) for
//! colour and emphasis. Those are translated into `ratatui::style::Style`
//! values; every other escape sequence (cursor movement, OSC hyperlinks) is
//! dropped. Lines are `'static` so they can be cached in `AppState` and
//! re-rendered on every frame without re-parsing.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

const ESC: char = '\x1b';
const BEL: char = '\x07';
const TAB_WIDTH: usize = 4;

/// Colours used when the raw diff has to be shown without a pager.
#[derive(Debug, Clone, Copy)]
pub struct DiffPalette {
    pub added: Color,
    pub removed: Color,
    pub hunk_header: Color,
}

impl From<&Theme> for DiffPalette {
    fn from(theme: &Theme) -> Self {
        Self {
            added: theme.diff_added,
            removed: theme.diff_removed,
            hunk_header: theme.diff_hunk_header,
        }
    }
}

/// Parses ANSI-coloured text into styled lines.
///
/// SGR state carries across line breaks, as it does in a real terminal.
pub fn text_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut style = Style::default();
    text.lines().map(|line| parse_line(line, &mut style)).collect()
}

/// Colours an unpaged unified diff by line prefix.
pub fn plain_diff_lines(text: &str, palette: &DiffPalette) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| {
            let style = if line.starts_with("diff --git") {
                Style::default().add_modifier(Modifier::BOLD)
            } else if line.starts_with("@@") {
                Style::default().fg(palette.hunk_header)
            } else if line.starts_with('+') {
                Style::default().fg(palette.added)
            } else if line.starts_with('-') {
                Style::default().fg(palette.removed)
            } else {
                Style::default()
            };
            Line::from(Span::styled(expand_tabs(line), style))
        })
        .collect()
}

fn expand_tabs(line: &str) -> String {
    line.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Parses one line, updating `style` as SGR sequences are encountered.
fn parse_line(line: &str, style: &mut Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut buf = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESC => match chars.next() {
                Some('[') => {
                    let mut params = String::new();
                    let mut final_byte = None;
                    for p in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&p) {
                            final_byte = Some(p);
                            break;
                        }
                        params.push(p);
                    }
                    if final_byte == Some('m') {
                        flush(&mut buf, *style, &mut spans);
                        apply_sgr(&params, style);
                    }
                }
                Some(']') => {
                    // OSC: terminated by BEL or ESC '\'.
                    while let Some(p) = chars.next() {
                        if p == BEL {
                            break;
                        }
                        if p == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' => buf.push_str(&" ".repeat(TAB_WIDTH)),
            c if c.is_control() => {}
            c => buf.push(c),
        }
    }
    flush(&mut buf, *style, &mut spans);
    Line::from(spans)
}

fn flush(buf: &mut String, style: Style, spans: &mut Vec<Span<'static>>) {
    if !buf.is_empty() {
        spans.push(Span::styled(std::mem::take(buf), style));
    }
}

/// Applies a `;`-separated SGR parameter list to `style`.
fn apply_sgr(params: &str, style: &mut Style) {
    let codes: Vec<u16> = params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect();
    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            0 => *style = Style::default(),
            1 => *style = style.add_modifier(Modifier::BOLD),
            2 => *style = style.add_modifier(Modifier::DIM),
            3 => *style = style.add_modifier(Modifier::ITALIC),
            4 => *style = style.add_modifier(Modifier::UNDERLINED),
            5 => *style = style.add_modifier(Modifier::SLOW_BLINK),
            7 => *style = style.add_modifier(Modifier::REVERSED),
            9 => *style = style.add_modifier(Modifier::CROSSED_OUT),
            22 => *style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => *style = style.remove_modifier(Modifier::ITALIC),
            24 => *style = style.remove_modifier(Modifier::UNDERLINED),
            25 => *style = style.remove_modifier(Modifier::SLOW_BLINK),
            27 => *style = style.remove_modifier(Modifier::REVERSED),
            29 => *style = style.remove_modifier(Modifier::CROSSED_OUT),
            n @ 30..=37 => *style = style.fg(ansi_color(n - 30)),
            39 => style.fg = None,
            n @ 40..=47 => *style = style.bg(ansi_color(n - 40)),
            49 => style.bg = None,
            n @ 90..=97 => *style = style.fg(ansi_color(n - 90 + 8)),
            n @ 100..=107 => *style = style.bg(ansi_color(n - 100 + 8)),
            n @ (38 | 48) => {
                let (color, consumed) = extended_color(&codes[i + 1..]);
                if let Some(color) = color {
                    *style = if n == 38 { style.fg(color) } else { style.bg(color) };
                }
                i += consumed;
            }
            _ => {}
        }
        i += 1;
    }
}

/// Decodes `5;n` (256-colour) or `2;r;g;b` (truecolor) after a 38/48 code.
///
/// Returns the colour and how many parameters it consumed.
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    match rest {
        [5, n, ..] => (u8::try_from(*n).ok().map(Color::Indexed), 2),
        [2, r, g, b, ..] => {
            let rgb = (u8::try_from(*r), u8::try_from(*g), u8::try_from(*b));
            match rgb {
                (Ok(r), Ok(g), Ok(b)) => (Some(Color::Rgb(r, g, b)), 4),
                _ => (None, 4),
            }
        }
        _ => (None, rest.len()),
    }
}

fn ansi_color(n: u16) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::Gray,
        8 => Color::DarkGray,
        9 => Color::LightRed,
        10 => Color::LightGreen,
        11 => Color::LightYellow,
        12 => Color::LightBlue,
        13 => Color::LightMagenta,
        14 => Color::LightCyan,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn plain_text_is_kept_verbatim() {
        let lines = text_to_lines("diff abc123 src/app.tsx\nsecond");
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "diff abc123 src/app.tsx");
        assert_eq!(lines[0].spans[0].style, Style::default());
    }

    #[test]
    fn sgr_colour_splits_spans() {
        let lines = text_to_lines("a\x1b[31mred\x1b[0mb");
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "red");
        assert_eq!(spans[1].style.fg, Some(Color::Red));
        assert_eq!(spans[2].style, Style::default());
    }

    #[test]
    fn extended_colours_are_decoded() {
        let lines = text_to_lines("\x1b[38;5;208mx\x1b[48;2;1;2;3my");
        let spans = &lines[0].spans;
        assert_eq!(spans[0].style.fg, Some(Color::Indexed(208)));
        assert_eq!(spans[1].style.fg, Some(Color::Indexed(208)));
        assert_eq!(spans[1].style.bg, Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn style_carries_across_lines() {
        let lines = text_to_lines("\x1b[1;32mone\ntwo\x1b[m");
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Green));
        assert!(lines[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn osc_hyperlinks_and_cursor_sequences_are_dropped() {
        let text = "\x1b]8;;file:///a.txt\x1b\\a.txt\x1b]8;;\x07\x1b[K done";
        assert_eq!(line_text(&text_to_lines(text)[0]), "a.txt done");
    }

    #[test]
    fn tabs_are_expanded() {
        assert_eq!(line_text(&text_to_lines("\tx")[0]), "    x");
    }

    #[test]
    fn raw_diff_is_coloured_by_prefix() {
        let palette = DiffPalette::from(&Theme::dark());
        let lines = plain_diff_lines("@@ -1 +1 @@\n-old\n+new\n ctx", &palette);
        assert_eq!(lines[0].spans[0].style.fg, Some(palette.hunk_header));
        assert_eq!(lines[1].spans[0].style.fg, Some(palette.removed));
        assert_eq!(lines[2].spans[0].style.fg, Some(palette.added));
        assert_eq!(lines[3].spans[0].style.fg, None);
    }
}
