/// 候选邮箱（可被 UI 展示与用户选择）。
///
/// 注意：`domain_index` 是**该候选来源域名在 DomainList 中的下标**，
/// 宿主可以用它做图标、分组之类的展示，核心逻辑只依赖 `text`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 完整邮箱（提交文本），例如 `al@gmail.com`
    pub text: String,
    /// 来源域名在 DomainList 中的位置
    pub domain_index: usize,
}

impl Candidate {
    /// 由本地部分与域名拼出 `local@domain`。
    pub fn new(local_part: &str, domain: &str, domain_index: usize) -> Self {
        let mut text = String::with_capacity(local_part.len() + domain.len() + 1);
        text.push_str(local_part);
        text.push('@');
        text.push_str(domain);
        Self { text, domain_index }
    }

    /// `@` 之后的部分（保留 DomainList 中的原始大小写）。
    pub fn domain(&self) -> &str {
        self.text.split_once('@').map_or("", |(_, domain)| domain)
    }
}

/// 会话给 UI 的“快照视图”。
///
/// - UI 层只读 `PanelState`，不直接读写 `Context`
/// - 便于终端输出与测试断言
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    /// 输入框当前文本
    pub text: String,
    /// 面板是否可见
    pub visible: bool,
    /// 当前渲染的候选列表（隐藏时为空）
    pub candidate_list: Vec<Candidate>,
    /// 高亮候选（键盘提交的对象）
    pub active: Option<usize>,
    /// 指针悬停的候选
    pub hover: Option<usize>,
}

impl PanelState {
    pub fn active_candidate(&self) -> Option<&Candidate> {
        self.active.and_then(|i| self.candidate_list.get(i))
    }
}
