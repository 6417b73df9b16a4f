//! 通用 UI 组件
//!
//! 输入框、金额格式化等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// 金额显示：货币符号 + 两位小数
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}

/// [组件] 带有标题、占位符和样式的单行输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = if value.is_empty() {
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else if is_focused {
        Paragraph::new(format!("{}▏", value)).style(Style::default().fg(Color::White))
    } else {
        Paragraph::new(value).style(Style::default().fg(Color::White))
    };

    let input = input.block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}
