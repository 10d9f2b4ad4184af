//! `Context`：processor 链共享的唯一状态容器（每个输入框一份）。
//!
//! 约定：
//! - `text`：输入框当前文本（宿主拥有，这里只保存最近一次同步的值）
//! - `panel`：`Hidden` 或 `Visible(SelectionCursor)`
//! - 高亮下标放在 `SelectionCursor` 里，和它指向的候选集一起替换，永远不会指向旧集合
use tracing::debug;

use crate::{key_event::Action, model::Candidate, model::PanelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// 选择光标：一个已渲染的候选集 + 高亮下标。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    candidates: Vec<Candidate>,
    active: Option<usize>,
}

impl SelectionCursor {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut cursor = Self {
            candidates,
            active: None,
        };
        cursor.reset();
        cursor
    }

    /// 高亮回到第一个候选；空集时为 `None`。
    pub fn reset(&mut self) {
        self.active = if self.candidates.is_empty() { None } else { Some(0) };
    }

    /// 换成新的候选集并重置高亮。
    pub fn replace(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.reset();
    }

    /// 循环移动高亮；空集时什么也不做。返回移动后的下标。
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let len = self.candidates.len();
        let current = self.active?;
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.active = Some(next);
        self.active
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.active.and_then(|i| self.candidates.get(i))
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }
}

/// 面板状态机：只有两个状态，没有终止态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Hidden,
    Visible(SelectionCursor),
}

/// 输入会话上下文：processor 链共享的唯一状态。
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// 输入框文本
    pub text: String,
    pub panel: Panel,
    /// 指针悬停的候选（与高亮独立）
    pub hover: Option<usize>,
}

impl Context {
    pub fn is_visible(&self) -> bool {
        matches!(self.panel, Panel::Visible(_))
    }

    pub fn cursor(&self) -> Option<&SelectionCursor> {
        match &self.panel {
            Panel::Visible(cursor) => Some(cursor),
            Panel::Hidden => None,
        }
    }

    /// 显示新的候选集；空集等价于隐藏。
    pub fn show(&mut self, candidates: Vec<Candidate>) -> Vec<Action> {
        if candidates.is_empty() {
            return self.hide();
        }
        debug!(count = candidates.len(), text = %self.text, "渲染候选面板");
        self.hover = None;
        match &mut self.panel {
            Panel::Visible(cursor) => cursor.replace(candidates),
            Panel::Hidden => self.panel = Panel::Visible(SelectionCursor::new(candidates)),
        }
        let rendered = self
            .cursor()
            .map(|cursor| cursor.candidates().to_vec())
            .unwrap_or_default();
        vec![Action::Render {
            candidates: rendered,
            active: 0,
        }]
    }

    /// 隐藏面板；已经隐藏时不产生任何动作。
    pub fn hide(&mut self) -> Vec<Action> {
        self.hover = None;
        match std::mem::take(&mut self.panel) {
            Panel::Visible(_) => {
                debug!("隐藏候选面板");
                vec![Action::Hide]
            }
            Panel::Hidden => Vec::new(),
        }
    }

    /// 方向键：面板可见时循环移动高亮。
    pub fn advance(&mut self, direction: Direction) -> Vec<Action> {
        let Panel::Visible(cursor) = &mut self.panel else {
            return Vec::new();
        };
        match cursor.advance(direction) {
            Some(active) => vec![Action::MoveActive(active)],
            None => Vec::new(),
        }
    }

    /// 指针悬停；只接受当前候选集里的下标。
    pub fn set_hover(&mut self, hover: Option<usize>) -> Vec<Action> {
        let Some(cursor) = self.cursor() else {
            return Vec::new();
        };
        let hover = hover.filter(|&i| i < cursor.candidates().len());
        if hover == self.hover {
            return Vec::new();
        }
        self.hover = hover;
        vec![Action::Hover(hover)]
    }

    /// 提交第 `index` 个候选；`None` 表示提交高亮候选。
    ///
    /// 成功时：隐藏面板、把文本设为所选邮箱、发出 `Select`。
    pub fn commit(&mut self, index: Option<usize>) -> Vec<Action> {
        let Some(cursor) = self.cursor() else {
            return Vec::new();
        };
        let chosen = match index {
            Some(i) => cursor.get(i),
            None => cursor.current(),
        };
        let Some(email) = chosen.map(|c| c.text.clone()) else {
            return Vec::new();
        };

        let mut actions = self.hide();
        self.text.clone_from(&email);
        actions.push(Action::SetText(email.clone()));
        actions.push(Action::Select(email));
        actions
    }

    /// 生成 UI 层只读快照。
    pub fn state(&self) -> PanelState {
        let (candidate_list, active) = match &self.panel {
            Panel::Visible(cursor) => (cursor.candidates().to_vec(), cursor.active()),
            Panel::Hidden => (Vec::new(), None),
        };
        PanelState {
            text: self.text.clone(),
            visible: self.is_visible(),
            candidate_list,
            active,
            hover: self.hover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(n: usize) -> SelectionCursor {
        SelectionCursor::new(
            (0..n)
                .map(|i| Candidate::new("a", &format!("d{i}.com"), i))
                .collect(),
        )
    }

    #[test]
    fn new_cursor_starts_at_first_candidate() {
        assert_eq!(cursor(3).active(), Some(0));
        assert_eq!(cursor(0).active(), None);
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut c = cursor(3);
        assert_eq!(c.advance(Direction::Next), Some(1));
        assert_eq!(c.advance(Direction::Next), Some(2));
        assert_eq!(c.advance(Direction::Next), Some(0));
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut c = cursor(3);
        assert_eq!(c.advance(Direction::Previous), Some(2));
        assert_eq!(c.current().map(|c| c.text.as_str()), Some("a@d2.com"));
    }

    #[test]
    fn advance_on_empty_set_is_noop() {
        let mut c = cursor(0);
        assert_eq!(c.advance(Direction::Next), None);
        assert_eq!(c.advance(Direction::Previous), None);
        assert!(c.current().is_none());
    }

    #[test]
    fn replace_resets_active_index() {
        let mut c = cursor(3);
        c.advance(Direction::Previous);
        c.replace(cursor(2).candidates().to_vec());
        assert_eq!(c.active(), Some(0));
    }

    #[test]
    fn showing_over_a_visible_panel_replaces_set_and_resets_active() {
        let mut ctx = Context::default();
        ctx.show(cursor(3).candidates().to_vec());
        ctx.advance(Direction::Previous);
        ctx.set_hover(Some(1));

        let fresh: Vec<Candidate> = (0..2).map(|i| Candidate::new("b", &format!("n{i}.io"), i)).collect();
        assert_eq!(
            ctx.show(fresh.clone()),
            vec![Action::Render {
                candidates: fresh.clone(),
                active: 0,
            }]
        );
        let state = ctx.state();
        assert_eq!(state.candidate_list, fresh);
        assert_eq!(state.active, Some(0));
        assert_eq!(state.hover, None);
        assert_eq!(ctx.advance(Direction::Previous), vec![Action::MoveActive(1)]);
    }

    #[test]
    fn advance_while_hidden_does_nothing() {
        let mut ctx = Context::default();
        assert!(ctx.advance(Direction::Next).is_empty());
    }

    #[test]
    fn hide_is_idempotent() {
        let mut ctx = Context::default();
        ctx.show(cursor(2).candidates().to_vec());
        assert_eq!(ctx.hide(), vec![Action::Hide]);
        assert!(ctx.hide().is_empty());
    }

    #[test]
    fn showing_empty_set_hides() {
        let mut ctx = Context::default();
        ctx.show(cursor(1).candidates().to_vec());
        assert_eq!(ctx.show(Vec::new()), vec![Action::Hide]);
        assert!(!ctx.is_visible());
    }

    #[test]
    fn hover_ignores_out_of_range_items() {
        let mut ctx = Context::default();
        ctx.show(cursor(2).candidates().to_vec());
        assert_eq!(ctx.set_hover(Some(1)), vec![Action::Hover(Some(1))]);
        assert!(ctx.set_hover(Some(1)).is_empty());
        assert_eq!(ctx.set_hover(Some(9)), vec![Action::Hover(None)]);
    }

    #[test]
    fn commit_sets_text_and_hides() {
        let mut ctx = Context::default();
        ctx.show(cursor(2).candidates().to_vec());
        ctx.advance(Direction::Next);
        assert_eq!(
            ctx.commit(None),
            vec![
                Action::Hide,
                Action::SetText("a@d1.com".into()),
                Action::Select("a@d1.com".into()),
            ]
        );
        assert_eq!(ctx.text, "a@d1.com");
        assert!(ctx.commit(None).is_empty());
    }
}
