//! 宿主与会话之间的事件/动作词汇，以及物理按键到语义事件的翻译。
use crate::{context::Direction, model::Candidate};

/// 指针/焦点事件落在哪里。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 绑定的输入框本身
    Field,
    /// 本输入框自己的候选面板
    Panel,
    /// 其他任何地方（包括别的输入框和它们的面板）
    Outside,
}

/// 输入事件（逻辑事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体平台键值。
/// - 宿主负责把系统按键、指针事件转换成这些事件（见 [`Capabilities`]）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 输入框文本发生变化，携带变化后的完整文本
    TextChanged(String),
    /// 上/下方向键
    Navigate(Direction),
    /// 回车：提交高亮候选
    Commit,
    /// Tab / Esc：关闭面板，不提交
    Dismiss,
    /// 指针点击第 n 个候选
    PointerSelect(usize),
    /// 指针移入第 n 个候选
    PointerEnter(usize),
    /// 指针移出第 n 个候选
    PointerLeave(usize),
    /// 文档内任意位置的指针按下
    PointerDown(Target),
    /// 焦点移动到某处
    FocusMoved(Target),
}

/// 会话输出动作（对宿主的“副作用”请求）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 用新的候选集替换面板内容并显示
    Render {
        candidates: Vec<Candidate>,
        active: usize,
    },
    /// 只移动高亮标记
    MoveActive(usize),
    /// 悬停标记变化
    Hover(Option<usize>),
    Hide,
    /// 把输入框文本设置为给定值
    SetText(String),
    /// 让输入框重新获得焦点
    Focus,
    /// 阻止按键的默认行为（例如回车提交表单）
    SuppressDefault,
    /// 提交选中的邮箱（宿主据此调用 onSelect）
    Select(String),
}

/// 宿主关心的物理按键。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Backspace,
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Other,
}

impl KeyCode {
    /// 从浏览器 `keyCode` 转换。
    pub fn from_code(code: u32) -> Self {
        match code {
            8 => KeyCode::Backspace,
            9 => KeyCode::Tab,
            13 => KeyCode::Enter,
            27 => KeyCode::Escape,
            38 => KeyCode::Up,
            40 => KeyCode::Down,
            _ => KeyCode::Other,
        }
    }
}

/// 宿主能力：启动时探测一次，之后只读。
///
/// 老旧宿主在退格时的文本变更事件有缺陷，这里把补救措施统一成按键翻译规则，
/// 匹配与光标逻辑本身不感知这些差异。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// 退格后宿主会正常派发文本变更事件
    pub backspace_fires_change: bool,
    /// 删除最后一个字符时宿主不派发文本变更事件
    pub drops_last_char_delete: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Capabilities {
    pub const STANDARD: Capabilities = Capabilities {
        backspace_fires_change: true,
        drops_last_char_delete: false,
    };

    /// keydown 翻译。`text` 是按键生效之前输入框的文本。
    pub fn translate_key_down(&self, key: KeyCode, text: &str) -> Option<InputEvent> {
        match key {
            KeyCode::Backspace if self.drops_last_char_delete && text.chars().count() == 1 => {
                Some(InputEvent::TextChanged(String::new()))
            }
            KeyCode::Backspace | KeyCode::Other => None,
            KeyCode::Tab | KeyCode::Escape => Some(InputEvent::Dismiss),
            KeyCode::Up => Some(InputEvent::Navigate(Direction::Previous)),
            KeyCode::Down => Some(InputEvent::Navigate(Direction::Next)),
            KeyCode::Enter => Some(InputEvent::Commit),
        }
    }

    /// keyup 翻译。`text` 是按键生效之后输入框的文本。
    pub fn translate_key_up(&self, key: KeyCode, text: &str) -> Option<InputEvent> {
        match key {
            KeyCode::Backspace if !self.backspace_fires_change => {
                Some(InputEvent::TextChanged(text.to_owned()))
            }
            _ => None,
        }
    }
}
