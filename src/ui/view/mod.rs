//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件。渲染函数只读取 App，不修改状态。

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::state::{App, AppMode, InputField};
use crate::models::Expense;
use components::{format_money, render_input_widget};

const EMPTY_PLACEHOLDER: &str = "No transactions yet.";

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(6), // 表单
            Constraint::Min(5),    // 历史
            Constraint::Length(3), // 总额
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_history(frame, app, chunks[2]);
    render_total(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("💸 Expense Tracker")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let editing = app.mode == AppMode::Editing;
    render_input_widget(
        frame,
        chunks[0],
        "Name",
        &app.name_input,
        "What did you buy?",
        editing && app.input_field == InputField::Name,
    );
    render_input_widget(
        frame,
        chunks[1],
        "Amount",
        &app.amount_input,
        &format!("Amount ({})", app.currency),
        editing && app.input_field == InputField::Amount,
    );
}

/// 单条记录
fn expense_item<'a>(expense: &Expense, currency: &str) -> ListItem<'a> {
    ListItem::new(Line::from(vec![
        Span::raw(expense.name.clone()),
        Span::raw("  "),
        Span::styled(
            format_money(currency, expense.amount),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  {}", expense.created_at.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title("History").borders(Borders::ALL);

    if app.store.is_empty() {
        let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .store
        .list_all()
        .iter()
        .map(|expense| expense_item(expense, &app.currency))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("> ");

    // 编辑表单时不显示选中行
    let mut state = ListState::default();
    if app.mode == AppMode::Normal {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_total(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.store.total();
    let total_style = if total > 0.0 {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::raw("Total Balance: "),
        Span::styled(format_money(&app.currency, total), total_style),
    ]);
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Normal => "[a] Add  [j/k] Select  [d] Delete  [q] Quit",
        AppMode::Editing => "[Enter] Add  [Tab] Switch field  [Esc] Back",
    };

    let text = match app.message.as_deref() {
        Some(message) => format!("{}  |  {}", help_text, message),
        None => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::actions::Action;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let text = buffer_text(buffer);
        text.lines().enumerate().find_map(|(y, line)| {
            line.find(needle).map(|byte_index| {
                let x = line[..byte_index].chars().count();
                (x as u16, y as u16)
            })
        })
    }

    /// History 面板内的文本（不含标题行与总额、帮助区）
    fn history_text(buffer: &Buffer) -> String {
        let text = buffer_text(buffer);
        text.lines()
            .skip_while(|line| !line.contains("History"))
            .skip(1)
            .take_while(|line| !line.contains("Total Balance"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_state() {
        let app = App::new("$");
        let text = buffer_text(&draw(&app));

        assert!(text.contains(EMPTY_PLACEHOLDER));
        assert!(text.contains("Total Balance: $0.00"));
        assert!(text.contains("What did you buy?"));
    }

    #[test]
    fn test_list_and_total() {
        let mut app = App::new("$");
        app.store.add("Coffee", "4.5");
        app.store.add("Book", "15");
        let buffer = draw(&app);
        let text = buffer_text(&buffer);

        assert!(!text.contains(EMPTY_PLACEHOLDER));
        assert!(text.contains("Total Balance: $19.50"));
        assert!(text.contains("$4.50"));
        assert!(text.contains("$15.00"));

        let (_, coffee_row) = find(&buffer, "Coffee").unwrap();
        let (_, book_row) = find(&buffer, "Book").unwrap();
        assert!(coffee_row < book_row);
    }

    #[test]
    fn test_total_color() {
        let mut app = App::new("$");
        let buffer = draw(&app);
        let (x, y) = find(&buffer, "Balance: $0.00").unwrap();
        assert_ne!(buffer[(x + 9, y)].fg, Color::Green);

        app.store.add("Coffee", "4.5");
        let buffer = draw(&app);
        let (x, y) = find(&buffer, "Balance: $4.50").unwrap();
        assert_eq!(buffer[(x + 9, y)].fg, Color::Green);
    }

    #[test]
    fn test_deleted_row_disappears() {
        let mut app = App::new("€");
        app.store.add("Coffee", "4.5");
        app.store.add("Book", "15");
        app.dispatch(Action::DeleteSelected);

        let buffer = draw(&app);
        let history = history_text(&buffer);
        assert!(!history.contains("Coffee"));
        assert!(history.contains("Book"));

        // 状态栏仍会提到被删除的记录
        let text = buffer_text(&buffer);
        assert!(text.contains("Deleted Coffee"));
        assert!(text.contains("Total Balance: €15.00"));
    }

    #[test]
    fn test_form_shows_typed_values() {
        let mut app = App::new("$");
        app.dispatch(Action::StartAdd);
        for c in "Tea".chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::NextField);

        let text = buffer_text(&draw(&app));
        assert!(text.contains("Tea"));
        assert!(text.contains("Amount ($)"));
    }
}
