//! TUI Views
//!
//! Renders the control bar, the result list and the status line.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::colors;
use super::state::{AppState, StatusKind};
use crate::domain::{FormatterChoice, LoopState};

/// Render the whole screen
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    render_controls(state, frame, chunks[0]);
    render_results(state, frame, chunks[1]);
    render_status(state, frame, chunks[2]);
}

/// The start/stop button label with its color
fn button_span(loop_state: LoopState) -> Span<'static> {
    let color = match loop_state {
        LoopState::Stopped => colors::RUNNING,
        LoopState::Running => colors::FAILED,
    };
    Span::styled(
        format!("[ {} ]", loop_state.button_label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// The formatter selector, selected choice highlighted
fn selector_spans(selected: FormatterChoice) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, choice) in FormatterChoice::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        }
        let style = if *choice == selected {
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(colors::DIM)
        };
        spans.push(Span::styled(choice.name(), style));
    }
    spans
}

fn render_controls(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![button_span(state.loop_state), Span::raw("  ")];
    spans.extend(selector_spans(state.formatter));
    spans.push(Span::styled(
        format!("  last update {}", state.last_update_string()),
        Style::default().fg(colors::DIM),
    ));

    let controls = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Zephyr: {} ", state.source)),
    );
    frame.render_widget(controls, area);
}

fn render_results(state: &AppState, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = state
        .results
        .iter()
        .skip(state.scroll)
        .map(|entry| ListItem::new(Line::from(entry.to_string())))
        .collect();

    let title = if state.scroll > 0 {
        format!(" Results ({}) ↓{} ", state.results.len(), state.scroll)
    } else {
        format!(" Results ({}) ", state.results.len())
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    if let Some(status) = &state.status {
        let color = match status.kind {
            StatusKind::Info => colors::PENDING,
            StatusKind::Error => colors::FAILED,
        };
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        "s:start/stop f:format ↑↓:scroll q:quit",
        Style::default().fg(colors::KEYBIND),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(state, f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_button_label_follows_state() {
        assert_eq!(button_span(LoopState::Stopped).content, "[ START ]");
        assert_eq!(button_span(LoopState::Running).content, "[ STOP ]");
    }

    #[test]
    fn test_selector_lists_both_choices() {
        let text: String = selector_spans(FormatterChoice::Hex)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(text, "ARITHMETIC │ HEX");
    }

    #[test]
    fn test_render_shows_results_newest_first() {
        let mut state = AppState::new("scripted");
        state.results.publish("first-result");
        state.results.publish("second-result");

        let screen = draw(&state);
        let newest = screen.find("second-result").unwrap();
        let oldest = screen.find("first-result").unwrap();
        assert!(newest < oldest);
        assert!(screen.contains("START"));
        assert!(screen.contains("Results (2)"));
    }

    #[test]
    fn test_render_respects_scroll() {
        let mut state = AppState::new("scripted");
        state.results.publish("older-entry");
        state.results.publish("newer-entry");
        state.scroll = 1;

        let screen = draw(&state);
        assert!(!screen.contains("newer-entry"));
        assert!(screen.contains("older-entry"));
    }

    #[test]
    fn test_render_error_status() {
        let mut state = AppState::new("scripted");
        state.set_error("Polling stopped: boom");
        let screen = draw(&state);
        assert!(screen.contains("Polling stopped: boom"));
    }
}
