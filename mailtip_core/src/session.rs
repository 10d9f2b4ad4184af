//! `Session`：一个输入框的补全会话。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有 `Context`（状态）
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `PanelState` + `Action`
//!
//! 每个输入框一个 `Session`，彼此的候选集、高亮、可见性互不影响；
//! 只有 `Engine`（以及其中的配置）是共享的。

use std::sync::Arc;

use crate::{
    classifier::Classifier,
    context::Context,
    engine::Engine,
    filter::Filter,
    key_event::{Action, InputEvent},
    model::PanelState,
    processor::{
        CommitProcessor, DismissProcessor, EditingProcessor, HoverProcessor, NavigationProcessor,
        ProcessStatus, Processor,
    },
};

pub struct Session<C, F> {
    /// 引擎（分类器、过滤器与共享配置）
    engine: Arc<Engine<C, F>>,
    /// 会话上下文（processors 共享）
    ctx: Context,
    /// processors 链（可配置/可扩展）
    processors: Vec<Box<dyn Processor>>,
}

impl<C, F> Session<C, F>
where
    C: Classifier,
    F: Filter,
{
    /// 创建会话，并组装默认 processors 链。
    pub fn new(engine: Arc<Engine<C, F>>) -> Self {
        Self {
            engine,
            ctx: Context::default(),
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(NavigationProcessor),
                Box::new(CommitProcessor),
                Box::new(DismissProcessor),
                Box::new(HoverProcessor),
            ],
        }
    }

    /// 在默认链之前插入一个 processor。
    pub fn with_processor(mut self, processor: Box<dyn Processor>) -> Self {
        self.processors.insert(0, processor);
        self
    }

    pub fn engine(&self) -> &Engine<C, F> {
        &self.engine
    }

    /// 获取当前 UI 快照（只读）。
    pub fn ui_state(&self) -> PanelState {
        self.ctx.state()
    }

    /// 处理一个输入事件，返回最新 UI 快照与动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> (PanelState, Vec<Action>) {
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&*self.engine, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ctx.state(), actions)
    }
}
