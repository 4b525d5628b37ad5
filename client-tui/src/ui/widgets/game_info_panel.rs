use chess::PieceColor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::state::{SessionState, SyncPhase, TerminationReason};
use crate::ui::theme::Theme;

pub struct GameInfoPanel<'a> {
    pub game_id: &'a str,
    pub phase: SyncPhase,
    pub session: &'a SessionState,
    pub status_message: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for GameInfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("♟ Game Info ♟")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        let label = Style::default()
            .fg(self.theme.info)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Game: ", label),
                Span::styled(self.game_id, Style::default().fg(self.theme.text_secondary)),
            ]),
            Line::from(vec![
                Span::styled("You play: ", label),
                Span::raw(color_name(self.session.local_color())),
            ]),
            Line::from(vec![
                Span::styled("To move: ", label),
                Span::raw(color_name(self.session.side_to_move())),
            ]),
            Line::raw(""),
        ];

        let (phase_text, phase_color) = match self.phase {
            SyncPhase::Connecting => ("Waiting for opponent…".to_string(), self.theme.muted),
            SyncPhase::Synced if self.session.pending_move().is_some() => {
                ("Move sent…".to_string(), self.theme.muted)
            }
            SyncPhase::Synced if self.session.is_local_turn() => {
                ("Your move".to_string(), self.theme.positive)
            }
            SyncPhase::Synced => ("Opponent's move".to_string(), self.theme.warning),
            SyncPhase::Terminated(reason) => (game_over_text(reason), self.theme.negative),
        };
        lines.push(Line::from(Span::styled(
            phase_text,
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        )));

        if let Some(message) = self.status_message {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                message,
                Style::default().fg(self.theme.warning),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

fn color_name(color: Option<PieceColor>) -> &'static str {
    match color {
        Some(PieceColor::White) => "White",
        Some(PieceColor::Black) => "Black",
        None => "-",
    }
}

/// Headline shown once the game has ended.
pub fn game_over_text(reason: TerminationReason) -> String {
    match reason.winner() {
        Some(winner) => format!("Game Over! {} wins!", color_name(Some(winner))),
        None => "Disconnected from the game".to_string(),
    }
}
