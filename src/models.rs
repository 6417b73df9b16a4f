use chrono::{DateTime, Local};
use uuid::Uuid;

/// 一笔支出记录
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub created_at: DateTime<Local>,
}

impl Expense {
    pub fn new(name: String, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            amount,
            created_at: Local::now(),
        }
    }
}

/// 解析金额输入
///
/// 去除首尾空白后按数字解析；空串、非数字、NaN、无穷大以及 <= 0 的值都返回 `None`。
pub fn parse_amount(raw: &str) -> Option<f64> {
    let amount: f64 = raw.trim().parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// 支出列表（唯一的状态所有者）
///
/// 列表按插入顺序保存，总额在每次变更后重新计算并缓存。
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    total: f64,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加支出，金额为原始输入文本
    ///
    /// 名称为空或金额无效时静默忽略，返回 `None`。
    pub fn add(&mut self, name: &str, raw_amount: &str) -> Option<String> {
        match parse_amount(raw_amount) {
            Some(amount) => self.add_amount(name, amount),
            None => {
                tracing::debug!(raw_amount, "rejected expense: invalid amount");
                None
            }
        }
    }

    /// 添加支出，金额已是数值
    pub fn add_amount(&mut self, name: &str, amount: f64) -> Option<String> {
        if name.is_empty() {
            tracing::debug!("rejected expense: empty name");
            return None;
        }
        if !amount.is_finite() || amount <= 0.0 {
            tracing::debug!(amount, "rejected expense: non-positive amount");
            return None;
        }
        if !(self.total + amount).is_finite() {
            tracing::debug!(amount, total = self.total, "rejected expense: total would overflow");
            return None;
        }

        let expense = Expense::new(name.to_string(), amount);
        let id = expense.id.clone();
        tracing::debug!(%id, name, amount, "added expense");
        self.expenses.push(expense);
        self.recompute_total();
        Some(id)
    }

    /// 按 id 删除支出，其余记录保持原有顺序
    ///
    /// id 不存在时不做任何事。
    pub fn delete(&mut self, id: &str) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        let removed = self.expenses.remove(index);
        tracing::debug!(id, name = %removed.name, "deleted expense");
        self.recompute_total();
        Some(removed)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn list_all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn recompute_total(&mut self) {
        self.total = self.expenses.iter().map(|e| e.amount).sum();
        tracing::trace!(total = self.total, "recomputed total");
    }
}
