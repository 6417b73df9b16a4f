//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑。视图只产生 Action，所有状态变更都经过这里。

use super::actions::Action;
use super::state::{App, AppMode, InputField};

/// 数字输入框允许的字符
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAdd => self.start_add(),
            Action::DeleteSelected => self.delete_selected(),

            Action::Cancel => self.cancel(),
            Action::Submit => {
                if self.mode == AppMode::Editing {
                    self.submit();
                }
            }
            Action::NextField => {
                if self.mode == AppMode::Editing {
                    self.input_field = self.input_field.next();
                }
            }

            Action::Input(c) => {
                if self.mode == AppMode::Editing {
                    if self.input_field == InputField::Amount && !is_amount_char(c) {
                        return false;
                    }
                    self.focused_input_mut().push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::Editing {
                    self.focused_input_mut().pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.store.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加相关 ============

    /// 进入表单输入，保留已输入的内容
    pub fn start_add(&mut self) {
        self.mode = AppMode::Editing;
        self.input_field = InputField::Name;
        self.message = None;
    }

    /// 提交表单
    ///
    /// 只在此刻读取两个输入框。无效输入被静默忽略，输入框保持不变。
    pub fn submit(&mut self) {
        if let Some(id) = self.store.add(&self.name_input, &self.amount_input) {
            self.message = self
                .store
                .get(&id)
                .map(|expense| format!("Added {}", expense.name));
            self.name_input.clear();
            self.amount_input.clear();
            self.input_field = InputField::Name;
        }
    }

    // ============ 删除相关 ============

    /// 删除当前选中的支出
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_expense().map(|e| e.id.clone()) else {
            return;
        };
        if let Some(removed) = self.store.delete(&id) {
            self.message = Some(format!("Deleted {}", removed.name));
        }
        self.clamp_selection();
    }

    // ============ 通用操作 ============

    /// 退出表单输入
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }
}
