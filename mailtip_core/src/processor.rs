//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `Context` 做状态变更，并可产生 `Action`（Render/Hide/Select 等）。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：文本变化 -> 分类 -> 过滤 -> 渲染或隐藏
//! - `NavigationProcessor`：方向键循环高亮
//! - `CommitProcessor`：回车 / 点击候选提交
//! - `DismissProcessor`：Tab/Esc、面板外的指针与焦点
//! - `HoverProcessor`：指针悬停标记

use tracing::debug;

use crate::{
    classifier::Rejection,
    context::Context,
    key_event::{Action, InputEvent, Target},
    model::Candidate,
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型爆炸）。
pub trait EngineFacade {
    /// 分类 + 过滤：raw text -> 候选（或拒绝原因）
    fn suggest(&self, text: &str) -> Result<Vec<Candidate>, Rejection>;
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

/// 文本变化：每次都完整跑一遍分类与过滤，新结果直接覆盖旧候选集。
pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::TextChanged(text) => {
                context.text.clone_from(text);
                let actions = match engine.suggest(text) {
                    Ok(candidates) => context.show(candidates),
                    Err(reason) => {
                        debug!(%reason, "输入不适用补全");
                        context.hide()
                    }
                };
                (ProcessStatus::Consume, actions)
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct NavigationProcessor;

impl Processor for NavigationProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Navigate(direction) => (ProcessStatus::Consume, context.advance(direction)),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct CommitProcessor;

impl Processor for CommitProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            // 面板隐藏时回车交还给宿主（例如提交表单）
            InputEvent::Commit if !context.is_visible() => (ProcessStatus::Consume, Vec::new()),
            InputEvent::Commit => {
                let mut actions = vec![Action::SuppressDefault];
                actions.append(&mut context.commit(None));
                (ProcessStatus::Consume, actions)
            }
            InputEvent::PointerSelect(index) => {
                let mut actions = context.commit(Some(index));
                if !actions.is_empty() {
                    actions.push(Action::Focus);
                }
                (ProcessStatus::Consume, actions)
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

/// 关闭面板。每个会话只判断落点是否在**自己的**输入框或面板上。
pub struct DismissProcessor;

impl Processor for DismissProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Dismiss => (ProcessStatus::Consume, context.hide()),
            InputEvent::PointerDown(target) | InputEvent::FocusMoved(target) => {
                let actions = match target {
                    Target::Outside => context.hide(),
                    Target::Field | Target::Panel => Vec::new(),
                };
                (ProcessStatus::Consume, actions)
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct HoverProcessor;

impl Processor for HoverProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::PointerEnter(index) => (ProcessStatus::Consume, context.set_hover(Some(index))),
            InputEvent::PointerLeave(index) if context.hover == Some(index) => {
                (ProcessStatus::Consume, context.set_hover(None))
            }
            InputEvent::PointerLeave(_) => (ProcessStatus::Consume, Vec::new()),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}
