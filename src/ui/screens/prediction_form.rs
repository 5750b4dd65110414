use crate::logic::{FormState, InputField, SubmissionStatus};
use crate::models::{ClimateField, SoilField};
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Crop,
    Month,
    Input(InputField),
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        use ClimateField::*;
        use SoilField::*;
        &[
            FormField::Crop,
            FormField::Month,
            FormField::Input(InputField::Climate(MinTemp)),
            FormField::Input(InputField::Climate(MaxTemp)),
            FormField::Input(InputField::Climate(Rainfall)),
            FormField::Input(InputField::Soil(Nitrogen)),
            FormField::Input(InputField::Soil(Phosphorus)),
            FormField::Input(InputField::Soil(Potassium)),
            FormField::Input(InputField::Soil(Ph)),
            FormField::Input(InputField::Soil(OrganicCarbon)),
            FormField::Input(InputField::Soil(SoilMoisture)),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Crop => "Crop",
            FormField::Month => "Planting Month",
            FormField::Input(field) => field.label(),
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

pub struct PredictionFormScreen<'a> {
    pub form: &'a FormState,
    pub focused_field: FormField,
    pub status_message: Option<&'a str>,
}

impl<'a> PredictionFormScreen<'a> {
    pub fn new(form: &'a FormState) -> Self {
        Self {
            form,
            focused_field: FormField::Crop,
            status_message: None,
        }
    }

    pub fn with_focus(mut self, field: FormField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn busy(&self) -> bool {
        matches!(self.form.status(), SubmissionStatus::Submitting { .. })
    }
}

impl Widget for PredictionFormScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Crop / month
                Constraint::Length(5), // Climate
                Constraint::Length(8), // Soil (2 rows of 3)
                Constraint::Min(4),    // Messages
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crop Yield Prediction", Theme::title()),
            Span::styled(" - enter crop details to predict yield", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_selects(chunks[1], buf);
        self.render_group(
            "Climate",
            Theme::climate_group(),
            &ClimateField::all()
                .iter()
                .map(|f| InputField::Climate(*f))
                .collect::<Vec<_>>(),
            chunks[2],
            buf,
        );
        self.render_group(
            "Soil",
            Theme::soil_group(),
            &SoilField::all()
                .iter()
                .map(|f| InputField::Soil(*f))
                .collect::<Vec<_>>(),
            chunks[3],
            buf,
        );
        self.render_messages(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl PredictionFormScreen<'_> {
    fn render_selects(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        SelectWidget::new(FormField::Crop.label(), self.form.crop().as_str())
            .focused(self.focused_field == FormField::Crop)
            .render(cols[0], buf);
        SelectWidget::new(FormField::Month.label(), self.form.month().as_str())
            .focused(self.focused_field == FormField::Month)
            .render(cols[1], buf);
    }

    /// Inputs laid out three to a row inside a titled block.
    fn render_group(
        &self,
        title: &str,
        title_style: Style,
        fields: &[InputField],
        area: Rect,
        buf: &mut Buffer,
    ) {
        let block = Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let rows: Vec<&[InputField]> = fields.chunks(3).collect();
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(rows.iter().map(|_| Constraint::Length(3)))
            .split(inner);

        for (row, row_area) in rows.iter().zip(row_areas.iter()) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(*row_area);

            for (field, col) in row.iter().zip(cols.iter()) {
                let mut input = InputWidget::new(field.label(), self.form.value(*field))
                    .unit(field.unit())
                    .focused(self.focused_field == FormField::Input(*field))
                    .disabled(self.busy());
                if let InputField::Soil(soil) = field {
                    let spec = soil.spec();
                    input = input.hint(format!("{}-{}", spec.min, spec.max));
                }
                input.render(*col, buf);
            }
        }
    }

    fn render_messages(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();

        if !self.form.warning().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("! {}", self.form.warning()),
                Theme::advisory(),
            )));
        }

        match self.form.status() {
            SubmissionStatus::Submitting { .. } => {
                lines.push(Line::from(Span::styled("Processing...", Theme::busy())));
            }
            SubmissionStatus::Failed(failure) => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", failure.kind.as_str()), Theme::error()),
                    Span::styled(failure.message.as_str(), Theme::error()),
                ]));
            }
            SubmissionStatus::Succeeded { result, .. } => {
                lines.push(Line::from(Span::styled(
                    format!("Predicted yield: {}", result.headline()),
                    Theme::yield_value(),
                )));
            }
            SubmissionStatus::Idle => {}
        }

        if let Some(msg) = self.status_message {
            lines.push(Line::from(Span::styled(msg, Theme::dim())));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let submit_label = if self.busy() { "Busy " } else { "Predict " };
        let nav = Line::from(vec![
            Span::styled("[↑↓/Tab]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Change ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled(submit_label, Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, Month};

    fn screen_text(form: &FormState) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        PredictionFormScreen::new(form).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut field = FormField::Crop;
        for _ in 0..FormField::all().len() {
            field = field.next();
        }
        assert_eq!(field, FormField::Crop);
        assert_eq!(FormField::Crop.prev(), *FormField::all().last().unwrap());
    }

    #[test]
    fn warning_is_rendered() {
        let form = FormState::new(Crop::Cocoa, Month::Jan);
        let text = screen_text(&form);
        assert!(text.contains("outside the ideal planting window"));
    }

    #[test]
    fn groups_and_advice_use_crop_palette() {
        let form = FormState::new(Crop::Cocoa, Month::Jan);
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        PredictionFormScreen::new(&form).render(area, &mut buf);

        // Group titles sit on the top border of each block
        assert_eq!(buf[(1, 4)].symbol(), "C");
        assert_eq!(buf[(1, 4)].fg, Theme::CLIMATE);
        assert_eq!(buf[(1, 9)].symbol(), "S");
        assert_eq!(buf[(1, 9)].fg, Theme::SOIL);
        // First message line is the planting advice
        assert_eq!(buf[(0, 17)].symbol(), "!");
        assert_eq!(buf[(0, 17)].fg, Theme::ADVISORY);
    }

    #[test]
    fn no_warning_for_ideal_month() {
        let form = FormState::new(Crop::Cocoa, Month::Jun);
        let text = screen_text(&form);
        assert!(!text.contains("outside the ideal"));
        assert!(text.contains("Cocoa"));
        assert!(text.contains("June"));
    }
}
