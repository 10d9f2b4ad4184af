//! `mailtip_core`：邮箱补全的纯逻辑层，不做任何 I/O，也不碰 DOM。
//!
//! 设计目标：
//! - **核心可复用**：浏览器/终端/测试宿主都复用同一套逻辑
//! - **分层清晰**：session -> processor -> classifier -> filter -> cursor -> 输出（`Action` + `PanelState`）
//! - **宿主只做渲染**：面板的元素创建、样式、定位由实现 [`host::Host`] 的一方负责
pub mod classifier;
pub mod config;
pub mod context;
pub mod engine;
pub mod filter;
pub mod host;
pub mod key_event;
pub mod layout;
pub mod model;
pub mod processor;
pub mod session;
