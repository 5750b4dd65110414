use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Centered modal showing a prediction result.
pub struct ResultDialog<'a> {
    title: &'a str,
    headline: String,
    body: String,
}

impl<'a> ResultDialog<'a> {
    pub fn new(title: &'a str, headline: String, body: String) -> Self {
        Self {
            title,
            headline,
            body,
        }
    }
}

/// Rectangle of `percent_x` by `height` rows centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

impl Widget for ResultDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(70, 10, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(Span::styled(self.title, Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let text = vec![
            Line::from(Span::styled(self.headline, Theme::yield_value())),
            Line::from(""),
            Line::from(Span::styled(self.body, Theme::normal())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Close", Theme::nav_label()),
            ]),
        ];

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(70, 10, area);
        assert_eq!(rect.width, 70);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 15);
        assert_eq!(rect.y, 15);
    }

    #[test]
    fn dialog_renders_headline() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ResultDialog::new("Result", "3.46 t/ha".into(), "Looks good".into()).render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("3.46 t/ha"));
    }
}
