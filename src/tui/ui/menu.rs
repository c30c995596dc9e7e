use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};
use super::palette::Palette;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let pal = Palette::for_theme(app.theme);
    let size = f.area();
    let area = centered_rect(80, 80, size);
    let block = Block::default().title("bingo-tracker").borders(Borders::ALL).style(pal.base());
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    // ASCII logo at the top (render left-aligned to preserve spacing)
    let logo = r#"
 ____  _____ _   _  ____  ___
| __ )|_   _| \ | |/ ___|/ _ \
|  _ \  | | |  \| | |  _| | | |
| |_) | | | | |\  | |_| | |_| |
|____/ |___||_| \_|\____|\___/
"#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), pal.base().fg(pal.accent))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
        .split(inner_all);

    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let config_items = app.menu_items_display();
    let hints = [String::from("[Enter] Apply  [Q] Quit  [Esc] Cancel  [↑/↓] Move  [+/-] Adjust")];
    let mut cfg_lines: Vec<Line> = Vec::new();
    cfg_lines.push(Line::from(Span::styled("Game Settings:", pal.bold())));
    for (i, it) in config_items.iter().enumerate() {
        let style = if i == app.menu_index {
            pal.bold().fg(pal.marked)
        } else {
            pal.base()
        };
        cfg_lines.push(Line::from(Span::styled(it.clone(), style)));
    }
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled(
        format!(
            "{} card(s) loaded, {} numbers called",
            app.session.cards().len(),
            app.session.called().len()
        ),
        pal.dim(),
    )));
    for hint in hints {
        cfg_lines.push(Line::from(Span::styled(hint, pal.dim())));
    }
    let cfg_para = Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(cfg_para, rows[1]);
}
