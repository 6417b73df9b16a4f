//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{Expense, ExpenseStore};

/// 应用状态
pub struct App {
    pub store: ExpenseStore,
    pub selected_index: usize,
    pub mode: AppMode,
    pub name_input: String,
    pub amount_input: String,
    pub input_field: InputField,
    pub message: Option<String>,
    pub currency: String,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Editing,
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputField {
    Name,
    Amount,
}

impl InputField {
    pub fn next(self) -> Self {
        match self {
            InputField::Name => InputField::Amount,
            InputField::Amount => InputField::Name,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            store: ExpenseStore::new(),
            selected_index: 0,
            mode: AppMode::Normal,
            name_input: String::new(),
            amount_input: String::new(),
            input_field: InputField::Name,
            message: None,
            currency: currency.into(),
        }
    }

    /// 列表变化后修正选中索引
    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 获取当前选中的支出
    pub fn selected_expense(&self) -> Option<&Expense> {
        self.store.list_all().get(self.selected_index)
    }

    /// 当前聚焦的输入框
    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.input_field {
            InputField::Name => &mut self.name_input,
            InputField::Amount => &mut self.amount_input,
        }
    }
}
