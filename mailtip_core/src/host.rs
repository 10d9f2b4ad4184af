//! `host`：与 UI 宿主的边界。
//!
//! - [`Host`]：宿主实现的渲染接口（面板列表、高亮、隐藏、回写文本）
//! - [`Mailtip`]：一次配置的句柄，可绑定任意多个输入框
//! - [`Widget`]：一个输入框的会话 + 它的宿主，负责把 `Action` 落到宿主上
use std::sync::Arc;

use tracing::debug;

use crate::{
    classifier::{Classifier, LocalPartClassifier},
    config::{Config, Options},
    engine::Engine,
    filter::{Filter, PrefixFilter},
    key_event::{Action, InputEvent},
    layout::{Geometry, Placement},
    model::{Candidate, PanelState},
    session::Session,
};

/// UI 宿主：能渲染一个有序列表、标记高亮项、隐藏、修改输入框文本。
pub trait Host {
    /// 用新的候选集替换面板内容并显示，`active` 为高亮项。
    fn render(&mut self, candidates: &[Candidate], active: usize);
    /// 只重绘高亮标记。
    fn set_active(&mut self, active: usize);
    fn hide(&mut self);
    fn set_text(&mut self, text: &str);

    fn set_hover(&mut self, _hover: Option<usize>) {}
    fn focus(&mut self) {}
    /// 阻止当前按键的默认行为。
    fn suppress_default(&mut self) {}
}

/// 配置句柄：`configure` 一次，`bind` 多次；所有 widget 共享同一份只读配置。
pub struct Mailtip<C = LocalPartClassifier, F = PrefixFilter> {
    engine: Arc<Engine<C, F>>,
}

impl Mailtip {
    pub fn configure(options: Options) -> Self {
        Self::from_engine(Engine::new(Arc::new(Config::from_options(options))))
    }
}

impl<C, F> Mailtip<C, F>
where
    C: Classifier,
    F: Filter,
{
    pub fn from_engine(engine: Engine<C, F>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn config(&self) -> &Config {
        self.engine.config()
    }

    /// 绑定一个输入框。每个 widget 有自己独立的面板状态与关闭判断。
    pub fn bind<H: Host>(&self, host: H) -> Widget<H, C, F> {
        Widget {
            session: Session::new(Arc::clone(&self.engine)),
            host,
        }
    }
}

impl<C, F> Clone for Mailtip<C, F> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

pub struct Widget<H, C = LocalPartClassifier, F = PrefixFilter> {
    session: Session<C, F>,
    host: H,
}

impl<H, C, F> Widget<H, C, F>
where
    H: Host,
    C: Classifier,
    F: Filter,
{
    /// 处理宿主转发的一个事件，把产生的动作落到宿主上，返回最新快照。
    pub fn dispatch(&mut self, ev: InputEvent) -> PanelState {
        let (state, actions) = self.session.handle(ev);
        for action in actions {
            self.apply(action);
        }
        state
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Render { candidates, active } => self.host.render(&candidates, active),
            Action::MoveActive(active) => self.host.set_active(active),
            Action::Hover(hover) => self.host.set_hover(hover),
            Action::Hide => self.host.hide(),
            Action::SetText(text) => self.host.set_text(&text),
            Action::Focus => self.host.focus(),
            Action::SuppressDefault => self.host.suppress_default(),
            Action::Select(email) => {
                debug!(%email, "提交候选");
                self.session.engine().config().select(&email);
            }
        }
    }

    pub fn state(&self) -> PanelState {
        self.session.ui_state()
    }

    /// 按配置的偏移与宽度策略计算面板位置。
    pub fn placement(&self, geometry: &Geometry) -> Placement {
        Placement::compute(geometry, self.session.engine().config().presentation())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
