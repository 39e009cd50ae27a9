//! The settings dialog: three numeric fields with OK and Cancel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};
use starsaver_config::SettingsEdit;

const LABELS: [&str; 3] = [
    "Number of stars",
    "Nova probability (1 in N)",
    "Animation timing (ms)",
];
const MAX_DIGITS: usize = 9;

/// What a key press did to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still editing.
    Pending,
    /// OK pressed with these values.
    Confirmed(SettingsEdit),
    Cancelled,
}

/// Edit state of the settings dialog.
#[derive(Debug, Clone)]
pub struct SettingsDialog {
    initial: SettingsEdit,
    fields: [String; 3],
    focus: usize,
}

impl SettingsDialog {
    pub fn new(initial: SettingsEdit) -> Self {
        Self {
            initial,
            fields: [
                initial.number_of_stars.to_string(),
                initial.nova_probability.to_string(),
                initial.animation_timing.to_string(),
            ],
            focus: 0,
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return DialogOutcome::Cancelled,
            (_, KeyCode::Enter) => return DialogOutcome::Confirmed(self.values()),
            (_, KeyCode::Tab | KeyCode::Down) => self.focus = (self.focus + 1) % LABELS.len(),
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.focus = (self.focus + LABELS.len() - 1) % LABELS.len()
            }
            (_, KeyCode::Backspace) => {
                self.fields[self.focus].pop();
            }
            (m, KeyCode::Char(c)) if c.is_ascii_digit() && !m.contains(KeyModifiers::CONTROL) => {
                let field = &mut self.fields[self.focus];
                if field.len() < MAX_DIGITS {
                    field.push(c);
                }
            }
            _ => {}
        }
        DialogOutcome::Pending
    }

    /// Current values; a field that does not parse keeps its initial value.
    pub fn values(&self) -> SettingsEdit {
        SettingsEdit {
            number_of_stars: self.fields[0].parse().unwrap_or(self.initial.number_of_stars),
            nova_probability: self.fields[1].parse().unwrap_or(self.initial.nova_probability),
            animation_timing: self.fields[2].parse().unwrap_or(self.initial.animation_timing),
        }
    }
}

impl Widget for &SettingsDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(LABELS.len() as u16 + 4),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, popup, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(44),
            Constraint::Fill(1),
        ])
        .areas(row);

        Clear.render(popup, buf);

        let mut lines: Vec<Line> = LABELS
            .iter()
            .zip(&self.fields)
            .enumerate()
            .map(|(i, (label, value))| {
                let line = Line::from(format!(" {label:<27} {value:>10} "));
                if i == self.focus {
                    line.style(Style::new().reversed())
                } else {
                    line
                }
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(vec![
                "Enter".bold(),
                " OK  ".dark_gray(),
                "Esc".bold(),
                " Cancel".dark_gray(),
            ])
            .centered(),
        );

        Paragraph::new(lines)
            .block(Block::bordered().title(" Settings "))
            .render(popup, buf);
    }
}
