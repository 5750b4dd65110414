use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Labeled numeric input with a unit suffix and a dimmed hint when empty.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    unit: &'a str,
    hint: Option<String>,
    focused: bool,
    disabled: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            unit: "",
            hint: None,
            focused: false,
            disabled: false,
        }
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn content(&self) -> Line<'_> {
        let mut spans = Vec::new();

        if self.value.is_empty() && !self.focused {
            if let Some(hint) = &self.hint {
                spans.push(Span::styled(hint.clone(), Theme::dim()));
            }
            return Line::from(spans);
        }

        let value_style = if self.disabled {
            Theme::dim()
        } else {
            Theme::normal()
        };
        spans.push(Span::styled(self.value, value_style));

        if self.focused && !self.disabled {
            spans.push(Span::styled(" ", Theme::cursor()));
        }

        if !self.unit.is_empty() {
            spans.push(Span::styled(format!(" {}", self.unit), Theme::dim()));
        }

        Line::from(spans)
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content()).render(inner, buf);
    }
}

pub struct SelectWidget<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let (display, style) = if self.focused {
            (format!("< {} >", self.value), Theme::highlight())
        } else {
            (self.value.to_string(), Theme::normal())
        };

        Paragraph::new(Span::styled(display, style)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: impl Widget, width: u16) -> String {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn empty_input_shows_hint() {
        let line = rendered(InputWidget::new("Nitrogen", "").hint("0-140"), 30);
        assert!(line.contains("0-140"));
    }

    #[test]
    fn filled_input_shows_value_and_unit() {
        let line = rendered(
            InputWidget::new("Nitrogen", "70").unit("mg/kg").hint("0-140"),
            30,
        );
        assert!(line.contains("70 mg/kg"));
        assert!(!line.contains("0-140"));
    }

    #[test]
    fn focused_select_shows_arrows() {
        let line = rendered(SelectWidget::new("Crop", "Cocoa").focused(true), 30);
        assert!(line.contains("< Cocoa >"));
    }
}
