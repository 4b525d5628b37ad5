use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::state::SyncPhase;
use crate::ui::theme::Theme;

pub struct ControlsPanel<'a> {
    pub phase: SyncPhase,
    pub theme: &'a Theme,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(phase: SyncPhase, theme: &'a Theme) -> Self {
        Self { phase, theme }
    }
}

impl Widget for ControlsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("⌨ Controls ⌨")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        let heading = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);
        let key = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled("Mouse", heading)),
            Line::from(vec![
                Span::styled("Left drag ", key(self.theme.positive)),
                Span::raw("Move a piece"),
            ]),
            Line::from(vec![
                Span::styled("Right drag ", key(self.theme.info)),
                Span::raw("Draw an arrow"),
            ]),
            Line::from(vec![
                Span::styled("Right click ", key(self.theme.info)),
                Span::raw("Mark a square"),
            ]),
            Line::raw(""),
            Line::from(Span::styled("Keys", heading)),
            Line::from(vec![
                Span::styled("Esc ", key(self.theme.info)),
                Span::raw("Clear arrows and marks"),
            ]),
            Line::from(vec![
                Span::styled("f ", key(self.theme.info)),
                Span::raw("Flip board"),
            ]),
            Line::from(vec![
                Span::styled("t ", key(self.theme.info)),
                Span::raw("Toggle theme"),
            ]),
        ];

        if let SyncPhase::Terminated(_) = self.phase {
            lines.push(Line::from(vec![
                Span::styled("n ", key(self.theme.positive)),
                Span::raw("Start a new game"),
            ]));
        }

        lines.push(Line::from(vec![
            Span::styled("q ", key(self.theme.negative)),
            Span::raw("Quit"),
        ]));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
