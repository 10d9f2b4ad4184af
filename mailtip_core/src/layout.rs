//! `layout`：候选面板相对输入框的摆放位置。
//!
//! 面板插在输入框之后，绝对定位于最近的定位容器内；这里只算数，
//! 真正改样式的是宿主。
use crate::config::{Presentation, Width};

/// 元素的外框（含边框与内边距），坐标相对文档。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// 计算摆放所需的几何信息。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    /// 输入框外框
    pub field: Rect,
    /// 面板所在定位容器的外框
    pub container: Rect,
    /// 面板水平方向的边框 + 内边距（outerWidth - width）
    pub panel_chrome: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelWidth {
    Auto { min_width: f64 },
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub width: PanelWidth,
    pub z_index: f64,
}

impl Placement {
    pub fn compute(geometry: &Geometry, presentation: &Presentation) -> Self {
        let field = geometry.field;
        let container = geometry.container;
        let inner_field_width = field.width - geometry.panel_chrome;
        let width = match presentation.width {
            Width::Auto => PanelWidth::Auto {
                min_width: inner_field_width,
            },
            Width::Input => PanelWidth::Fixed(inner_field_width),
            Width::Fixed(px) => PanelWidth::Fixed(px),
        };
        Self {
            top: field.top - container.top + field.height + presentation.offset_top,
            left: field.left - container.left + presentation.offset_left,
            width,
            z_index: presentation.z_index,
        }
    }
}
