//! `filter`：由查询与域名列表生成候选（保持 DomainList 顺序）。

use crate::{classifier::Query, model::Candidate};

/// Filter：把通过分类的查询翻译成候选邮箱。
pub trait Filter: Send + Sync {
    fn apply(&self, query: &Query, domains: &[String]) -> Vec<Candidate>;
}

/// 默认 filter：域名前缀匹配（忽略大小写，字面前缀而非子串）。
///
/// 没有域名前缀时每个域名都产出一个候选；候选文本保留域名的原始大小写。
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixFilter;

impl PrefixFilter {
    pub fn candidates(
        &self,
        local_part: &str,
        domain_prefix: Option<&str>,
        domains: &[String],
    ) -> Vec<Candidate> {
        domains
            .iter()
            .enumerate()
            .filter(|(_, domain)| domain_prefix.is_none_or(|p| starts_with_ignore_case(domain, p)))
            .map(|(i, domain)| Candidate::new(local_part, domain, i))
            .collect()
    }
}

impl Filter for PrefixFilter {
    fn apply(&self, query: &Query, domains: &[String]) -> Vec<Candidate> {
        self.candidates(&query.local_part, query.domain_prefix.as_deref(), domains)
    }
}

/// 忽略大小写的字面前缀判断；`prefix` 为空时恒为真。
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut rest = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| rest.next() == Some(p))
}
