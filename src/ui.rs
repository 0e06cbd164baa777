use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use handtype::{
    app::{App, Screen},
    scoring::CharState,
    ChallengeType,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// Rows above the prompt used by the timer / wpm / accuracy line.
const STATS_ROWS: u16 = 2;

/// Renders the typing or results screen for an app snapshot.
pub struct SessionView<'a>(pub &'a App);

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.0.screen() {
            Screen::Typing => render_typing(self.0, area, buf),
            Screen::Results => render_results(self.0, area, buf),
        }
    }
}

/// Splits `text` into rows of at most `width` characters, breaking after a
/// space. Words longer than a row are split hard. Returns char index ranges
/// that cover the text in order.
fn wrap_rows(text: &[char], width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut token_start = 0;

    for (i, c) in text.iter().enumerate() {
        if *c != ' ' && i + 1 != text.len() {
            continue;
        }
        let token_end = i + 1;
        if token_end - row_start > width && token_start > row_start {
            rows.push(row_start..token_start);
            row_start = token_start;
        }
        while token_end - row_start > width {
            rows.push(row_start..row_start + width);
            row_start += width;
        }
        token_start = token_end;
    }

    if row_start < text.len() || rows.is_empty() {
        rows.push(row_start..text.len());
    }
    rows
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let engine = app.engine();
    let scoring = app.scoring();

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    let text: Vec<char> = engine.text().chars().collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let rows = wrap_rows(&text, max_chars_per_line as usize);

    let prompt_rows = (rows.len() as u16)
        .min(area.height.saturating_sub(STATS_ROWS))
        .max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(prompt_rows + STATS_ROWS) / 2),
            Constraint::Length(STATS_ROWS),
            Constraint::Length(prompt_rows),
            Constraint::Min(0),
        ])
        .split(area);

    let styled = |idx: usize| {
        let expected = text[idx];
        if scoring.cursor_index == Some(idx) {
            return Span::styled(expected.to_string(), underlined_dim_bold_style);
        }
        match scoring.per_character.get(idx) {
            Some(CharState::Correct) => Span::styled(expected.to_string(), green_bold_style),
            Some(CharState::Incorrect) => Span::styled(
                match expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            Some(CharState::Untyped) | None => Span::styled(expected.to_string(), dim_bold_style),
        }
    };

    let lines = rows
        .iter()
        .map(|row| Line::from(row.clone().map(&styled).collect::<Vec<Span>>()))
        .collect::<Vec<Line>>();

    // keep the row holding the cursor on screen
    let cursor_row = scoring
        .cursor_index
        .and_then(|idx| rows.iter().position(|row| row.contains(&idx)))
        .unwrap_or(rows.len() - 1);
    let scroll = (cursor_row as u16 + 1).saturating_sub(chunks[2].height);

    Paragraph::new(lines)
        .alignment(if rows.len() == 1 {
            // a prompt that fits on one line looks best centered
            Alignment::Center
        } else {
            Alignment::Left
        })
        .scroll((scroll, 0))
        .render(chunks[2], buf);

    let timer = match engine.config().challenge_type {
        ChallengeType::Time => format!("{}", engine.display_timer()),
        ChallengeType::Words => format!("{}s", engine.display_timer()),
    };
    Paragraph::new(Span::styled(
        format!(
            "{}   {} wpm   {}% acc",
            timer,
            engine.live_wpm(),
            scoring.live_accuracy
        ),
        dim_bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.engine().final_result() else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}s",
            result.wpm, result.final_accuracy, result.elapsed_seconds
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("{}/{} chars", result.correct_chars, result.total_chars),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    // r replays the same text, n draws a new one
    Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style))
        .render(chunks[4], buf);
}
