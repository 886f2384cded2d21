use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    ui::state::{LoginField, LoginForm},
    util::colors,
};

pub struct LoginWidget<'a> {
    form: &'a LoginForm,
}

impl<'a> LoginWidget<'a> {
    pub fn new(form: &'a LoginForm) -> Self {
        Self { form }
    }

    fn field(label: &str, value: String, focused: bool) -> Paragraph<'static> {
        let border_style = if focused {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(border_style)
                .title(label.to_string()),
        )
    }
}

impl Widget for LoginWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [column] = Layout::horizontal([Constraint::Length(40)])
            .flex(Flex::Center)
            .areas(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .flex(Flex::Center)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(column);

        Paragraph::new("Sign in to SoundShare")
            .centered()
            .fg(colors::PRIMARY)
            .render(rows[0], buf);

        let focus = self.form.focus;
        Self::field(
            "Username",
            self.form.username.clone(),
            focus == LoginField::Username,
        )
        .render(rows[1], buf);
        Self::field(
            "Password",
            "*".repeat(self.form.password.chars().count()),
            focus == LoginField::Password,
        )
        .render(rows[2], buf);

        let hint = if self.form.is_submitting {
            "Signing in..."
        } else {
            "tab switch field · enter submit"
        };
        Paragraph::new(hint)
            .centered()
            .fg(colors::NEUTRAL)
            .render(rows[3], buf);
    }
}
