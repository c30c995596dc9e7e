use crate::card::{ball_label, Card, COLUMN_LETTERS};
use crate::geometry::{index_of, GRID_SIZE};
use crate::rules::WinResult;
use crate::session::CardStatus;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};
use super::palette::Palette;

const CARD_WIDTH: u16 = 5 * GRID_SIZE as u16 + 3;
const CARD_HEIGHT: u16 = GRID_SIZE as u16 + 4;
const RECENT_CALLS: usize = 15;

pub(super) fn draw_play(f: &mut Frame, app: &AppState) {
    let pal = Palette::for_theme(app.theme);
    let size = f.area();
    f.render_widget(Block::default().style(pal.base()), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(4), // status bar
        ])
        .split(size);

    // Header
    let session = &app.session;
    let detect = if session.detect_wins { "On" } else { "Off" };
    let last = session.called().last().and_then(|&n| ball_label(n)).unwrap_or_else(|| "-".into());
    let recent: Vec<String> = session
        .called()
        .iter()
        .rev()
        .take(RECENT_CALLS)
        .filter_map(|&n| ball_label(n))
        .collect();
    let header_lines = vec![
        Line::from(format!(
            "Rule: {}   Detect: {detect}   Called: {}   Last: {last}",
            session.rule_mode.win_type(),
            session.called().len()
        )),
        Line::from(Span::styled(format!("Recent: {}", recent.join(" ")), pal.dim())),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("bingo-tracker").borders(Borders::ALL))
        .style(pal.base());
    f.render_widget(header, chunks[0]);

    // Cards, scrolled so the focused one is visible
    let statuses = app.statuses();
    let cards_area = chunks[1];
    let per_row = (cards_area.width / CARD_WIDTH).max(1) as usize;
    let start = if app.focus >= per_row { app.focus + 1 - per_row } else { 0 };
    let visible: Vec<(usize, &Card)> =
        session.cards().iter().enumerate().skip(start).take(per_row).collect();
    if visible.is_empty() {
        let empty = Paragraph::new("No cards. Press N for a quick pick.")
            .style(pal.dim())
            .alignment(Alignment::Center);
        f.render_widget(empty, cards_area);
    } else {
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                visible.iter().map(|_| Constraint::Length(CARD_WIDTH)).collect::<Vec<_>>(),
            )
            .split(cards_area);
        for (slot, (idx, card)) in slots.iter().zip(visible) {
            if let Some((_, status)) = statuses.get(idx) {
                let area = Rect { height: slot.height.min(CARD_HEIGHT), ..*slot };
                render_card(f, area, card, status, idx == app.focus, pal);
            }
        }
    }

    // Status bar: entry on the left, keys on the right
    let status_area = chunks[2];
    let status_block = Block::default().borders(Borders::ALL).title("Call").style(pal.base());
    f.render_widget(status_block, status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner(status_area));
    let mut left = vec![Line::from(vec![
        Span::raw("Number: "),
        Span::styled(format!("{}_", app.entry_text()), pal.bold()),
    ])];
    if let Some(err) = app.entry_error() {
        left.push(Line::from(Span::styled(format!("Error: {err}"), pal.base().fg(pal.error))));
    }
    let right = vec![
        Line::from("Enter call • U undo • X reset"),
        Line::from("N new • D delete • [ ] focus • ? help • M menu"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );

    if app.help_open() {
        draw_help(f, pal);
    } else if app.banner().is_some() {
        draw_banner(f, app, pal);
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    card: &Card,
    status: &CardStatus,
    focused: bool,
    pal: Palette,
) {
    let won = status.result.is_win();
    let mut title = card.name().to_string();
    if won {
        title.push_str(" [WINNER]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL).style(pal.base());
    if won {
        block = block.border_style(pal.base().fg(pal.winning));
    } else if focused {
        block = block.border_style(pal.base().fg(pal.focus));
    }
    f.render_widget(block, area);

    let winning = status.winning_cells();
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_SIZE + 2);
    lines.push(Line::from(
        COLUMN_LETTERS
            .iter()
            .map(|c| Span::styled(format!("{c:>4} "), pal.bold().fg(pal.accent)))
            .collect::<Vec<_>>(),
    ));
    for row in 0..GRID_SIZE {
        let spans: Vec<Span> = (0..GRID_SIZE)
            .map(|col| {
                let i = index_of(row, col);
                let cell = card.cells()[i];
                let text = match (cell.is_free(), cell.number()) {
                    (true, _) => "  ** ".to_string(),
                    (false, Some(n)) => format!("{n:>4} "),
                    (false, None) => "  -- ".to_string(),
                };
                let style = if winning[i] {
                    pal.bold().fg(pal.winning).add_modifier(Modifier::REVERSED)
                } else if status.marks.is_marked(i) {
                    pal.bold().fg(pal.marked)
                } else {
                    pal.base()
                };
                Span::styled(text, style)
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(progress_text(card, &status.result), pal.dim())));
    f.render_widget(Paragraph::new(lines), inner(area));
}

fn progress_text(card: &Card, result: &WinResult) -> String {
    if !card.is_complete() {
        return format!("{} cells unset", card.missing_count());
    }
    match result {
        WinResult::Won(win) => format!("BINGO! {}", win.win_type()),
        WinResult::NotWon { completed_line_count: Some(n) } => format!("{n} line(s) complete"),
        WinResult::NotWon { completed_line_count: None } => "win detection off".to_string(),
    }
}

fn draw_banner(f: &mut Frame, app: &AppState, pal: Palette) {
    let Some(banner) = app.banner() else {
        return;
    };
    let area = centered_rect(50, 30, f.area());
    let lines_text = if banner.lines.is_empty() {
        String::new()
    } else {
        banner.lines.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
    };
    let lines = vec![
        Line::from(Span::styled("BINGO!", pal.bold().fg(pal.winning))),
        Line::from(format!("{} wins with {}", banner.card_name, banner.win_type)),
        Line::from(Span::styled(lines_text, pal.dim())),
        Line::from(""),
        Line::from(Span::styled("Esc to dismiss", pal.dim())),
    ];
    let block = Block::default().title("Winner").borders(Borders::ALL).style(pal.base());
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

fn draw_help(f: &mut Frame, pal: Palette) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL).style(pal.base());
    let lines = vec![
        Line::from(Span::styled("Calling:", pal.bold())),
        Line::from("- 0-9: type a number"),
        Line::from("- Enter: call it"),
        Line::from("- Backspace: delete digit"),
        Line::from("- U: undo last call"),
        Line::from("- X: reset all calls"),
        Line::from(""),
        Line::from(Span::styled("Cards:", pal.bold())),
        Line::from("- N: add a quick-pick card"),
        Line::from("- D: delete focused card"),
        Line::from("- ] / [: focus next / prev"),
        Line::from("- T: toggle theme"),
        Line::from(""),
        Line::from(Span::styled("Menu:", pal.bold())),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply"),
        Line::from("- Esc: cancel"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
