//! 配置：宿主传入的原始选项（`Options`）经校验后得到只读的 `Config`。
//!
//! 校验从不失败：非法的数值或宽度回退到默认值，缺失的回调换成空操作。

use std::{fmt, sync::Arc};

use tracing::warn;

/// 内置的常用邮箱域名（DomainList 默认值）。
pub const DEFAULT_DOMAINS: [&str; 12] = [
    "qq.com",
    "163.com",
    "sina.com",
    "gmail.com",
    "126.com",
    "139.com",
    "189.com",
    "sohu.com",
    "msn.com",
    "hotmail.com",
    "yahoo.com",
    "yahoo.com.cn",
];

pub const DEFAULT_OFFSET_TOP: f64 = -1.0;
pub const DEFAULT_OFFSET_LEFT: f64 = 0.0;
pub const DEFAULT_Z_INDEX: f64 = 10.0;

/// 提交回调：每次成功提交恰好调用一次。
pub type SelectCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// 宿主传入的松散选项值（数值或文本）。
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Text(String),
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(f64::from(n))
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

/// 原始选项：全部可选，未给出的取默认值。
#[derive(Clone, Default)]
pub struct Options {
    pub domains: Option<Vec<String>>,
    pub on_select: Option<SelectCallback>,
    pub width: Option<OptionValue>,
    pub offset_top: Option<OptionValue>,
    pub offset_left: Option<OptionValue>,
    pub z_index: Option<OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn on_select(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    pub fn width(mut self, width: impl Into<OptionValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn offset_top(mut self, offset: impl Into<OptionValue>) -> Self {
        self.offset_top = Some(offset.into());
        self
    }

    pub fn offset_left(mut self, offset: impl Into<OptionValue>) -> Self {
        self.offset_left = Some(offset.into());
        self
    }

    pub fn z_index(mut self, z_index: impl Into<OptionValue>) -> Self {
        self.z_index = Some(z_index.into());
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("domains", &self.domains)
            .field("on_select", &self.on_select.as_ref().map(|_| "<fn>"))
            .field("width", &self.width)
            .field("offset_top", &self.offset_top)
            .field("offset_left", &self.offset_left)
            .field("z_index", &self.z_index)
            .finish()
    }
}

/// 面板宽度策略。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    /// 自适应内容，最小宽度等于输入框
    Auto,
    /// 与输入框等宽
    Input,
    /// 固定像素
    Fixed(f64),
}

/// 展示相关的偏移量与层级。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub offset_top: f64,
    pub offset_left: f64,
    pub width: Width,
    pub z_index: f64,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            offset_top: DEFAULT_OFFSET_TOP,
            offset_left: DEFAULT_OFFSET_LEFT,
            width: Width::Auto,
            z_index: DEFAULT_Z_INDEX,
        }
    }
}

/// 校验后的配置：初始化时生成一次，之后只读，可在多个输入框间共享。
#[derive(Clone)]
pub struct Config {
    domains: Vec<String>,
    on_select: SelectCallback,
    presentation: Presentation,
}

impl Config {
    pub fn from_options(options: Options) -> Self {
        let domains = options
            .domains
            .unwrap_or_else(|| DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect());
        let on_select = options.on_select.unwrap_or_else(|| Arc::new(|_: &str| {}));
        let presentation = Presentation {
            offset_top: finite_or("offset_top", options.offset_top, DEFAULT_OFFSET_TOP),
            offset_left: finite_or("offset_left", options.offset_left, DEFAULT_OFFSET_LEFT),
            width: width_or_auto(options.width),
            z_index: finite_or("z_index", options.z_index, DEFAULT_Z_INDEX),
        };
        Self {
            domains,
            on_select,
            presentation,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// 调用提交回调。
    pub fn select(&self, email: &str) {
        (self.on_select)(email);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(Options::default())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domains", &self.domains)
            .field("presentation", &self.presentation)
            .finish_non_exhaustive()
    }
}

fn finite_or(name: &str, value: Option<OptionValue>, default: f64) -> f64 {
    match value {
        None => default,
        Some(OptionValue::Number(n)) if n.is_finite() => n,
        Some(other) => {
            warn!(option = name, value = ?other, default, "非法数值选项，回退到默认值");
            default
        }
    }
}

fn width_or_auto(value: Option<OptionValue>) -> Width {
    match value {
        None => Width::Auto,
        Some(OptionValue::Number(n)) if n.is_finite() => Width::Fixed(n),
        Some(OptionValue::Text(s)) if s == "input" => Width::Input,
        Some(OptionValue::Text(s)) if s == "auto" => Width::Auto,
        Some(other) => {
            warn!(option = "width", value = ?other, "非法宽度选项，回退到 auto");
            Width::Auto
        }
    }
}
