//! Patients table of the loaded client.

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::domain::entities::Patient;

/// Editable columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PatientColumn {
    Outcome,
    OptOut,
    Comment,
}

impl PatientColumn {
    /// Column to the right, stopping at the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Outcome => Self::OptOut,
            Self::OptOut | Self::Comment => Self::Comment,
        }
    }

    /// Column to the left, stopping at the first.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Comment => Self::OptOut,
            Self::OptOut | Self::Outcome => Self::Outcome,
        }
    }
}

const HEADERS: [&str; 9] = [
    "Pet",
    "Species / Breed",
    "Reminders",
    "Last visit",
    "Next visit",
    "Outcome",
    "Outcome saved",
    "Opt out",
    "Comment",
];

/// Patients of the loaded client with their editable cells.
pub struct PatientsTable<'a> {
    patients: &'a [Patient],
    selected: Option<(usize, PatientColumn)>,
    focused: bool,
}

impl<'a> PatientsTable<'a> {
    /// Creates a table with no selection.
    #[must_use]
    pub const fn new(patients: &'a [Patient]) -> Self {
        Self {
            patients,
            selected: None,
            focused: false,
        }
    }

    /// Highlights the cell at `row` and `column`.
    #[must_use]
    pub const fn selected(mut self, row: usize, column: PatientColumn) -> Self {
        self.selected = Some((row, column));
        self
    }

    /// Sets focus state.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn describe(patient: &Patient) -> String {
        let mut parts: Vec<String> = [
            patient.species_description.as_deref(),
            patient.breed_description.as_deref(),
            patient.gender_description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
        if let Some(age) = patient.age_label() {
            parts.push(age);
        }
        parts.join(" / ")
    }

    fn row(&self, index: usize, patient: &'a Patient) -> Row<'a> {
        let editable_style = |column: PatientColumn| match self.selected {
            Some((row, selected)) if self.focused && row == index && selected == column => {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            }
            _ => Style::default().fg(Color::Yellow),
        };

        let reminders = patient.reminder_lines();
        let next = patient.next_appointment_lines();
        let height = reminders.len().max(next.len()).max(1);

        let saved_at = patient
            .outcome_at
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        Row::new(vec![
            Cell::from(patient.name.as_str()),
            Cell::from(Self::describe(patient)),
            Cell::from(Text::from(reminders.join("\n"))),
            Cell::from(patient.last_appointment_label()),
            Cell::from(Text::from(next.join("\n"))),
            Cell::from(patient.outcome.clone().unwrap_or_else(|| "-".to_string()))
                .style(editable_style(PatientColumn::Outcome)),
            Cell::from(saved_at),
            Cell::from(patient.opt_out_label()).style(editable_style(PatientColumn::OptOut)),
            Cell::from(patient.comment.clone().unwrap_or_default())
                .style(editable_style(PatientColumn::Comment)),
        ])
        .height(u16::try_from(height).unwrap_or(u16::MAX))
    }
}

impl Widget for PatientsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Patients ");

        if self.patients.is_empty() {
            Paragraph::new("No patients")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .patients
            .iter()
            .enumerate()
            .map(|(i, p)| self.row(i, p))
            .collect();
        let widths = [
            Constraint::Length(12),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Fill(2),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default();
        if self.focused {
            state.select(self.selected.map(|(row, _)| row));
        }
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
