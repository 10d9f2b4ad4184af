//! `classifier`：判断当前输入是否适合给出邮箱补全。
//!
//! 拒绝条件按顺序检查：
//! 1. 空串
//! 2. 含空白、英文逗号，或 `@` 之前出现允许字符集以外的字符
//! 3. 以 `@` 开头
//! 4. 多于一个 `@`
//!
//! 本地部分只允许 `[A-Za-z0-9_]` 与中日韩统一表意文字。

use std::fmt;

/// 通过分类后的查询：本地部分 + 可选的域名前缀。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub local_part: String,
    /// `@` 之后的文本；没有 `@` 时为 `None`，`"john@"` 时为 `Some("")`
    pub domain_prefix: Option<String>,
}

/// 拒绝原因。拒绝不是错误，只意味着面板应当隐藏。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    InvalidChar,
    LeadingAt,
    MultipleAt,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::Empty => "empty",
            Rejection::InvalidChar => "invalid-char",
            Rejection::LeadingAt => "leading-at",
            Rejection::MultipleAt => "multiple-at",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Applicable(Query),
    Rejected(Rejection),
}

impl Classification {
    pub fn into_query(self) -> Result<Query, Rejection> {
        match self {
            Classification::Applicable(query) => Ok(query),
            Classification::Rejected(reason) => Err(reason),
        }
    }
}

/// Classifier：纯函数，每次文本变化都先过这一关再做过滤。
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Classification;
}

/// 默认分类器：白名单校验本地部分。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPartClassifier;

impl Classifier for LocalPartClassifier {
    fn classify(&self, text: &str) -> Classification {
        if text.is_empty() {
            return Classification::Rejected(Rejection::Empty);
        }

        let (local_part, rest) = match text.split_once('@') {
            Some((local, rest)) => (local, Some(rest)),
            None => (text, None),
        };

        // 空白与逗号在整个输入里都不允许，白名单只约束 `@` 之前
        if text.chars().any(is_separator) || !local_part.chars().all(is_local_part_char) {
            return Classification::Rejected(Rejection::InvalidChar);
        }
        if local_part.is_empty() {
            return Classification::Rejected(Rejection::LeadingAt);
        }
        if rest.is_some_and(|r| r.contains('@')) {
            return Classification::Rejected(Rejection::MultipleAt);
        }

        Classification::Applicable(Query {
            local_part: local_part.to_owned(),
            domain_prefix: rest.map(str::to_owned),
        })
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

/// 本地部分允许的字符：ASCII 字母数字、下划线、CJK 表意文字。
pub fn is_local_part_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || is_cjk_ideograph(ch)
}

/// 基本区、扩展 A、兼容区，以及辅助平面上的扩展 B–F / 兼容补充（U+20000–U+2FA1F）
/// 和扩展 G–H（U+30000–U+323AF）。
fn is_cjk_ideograph(ch: char) -> bool {
    matches!(
        ch,
        '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
            | '\u{30000}'..='\u{323AF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Classification {
        LocalPartClassifier.classify(text)
    }

    fn rejected(text: &str) -> Rejection {
        match classify(text) {
            Classification::Rejected(reason) => reason,
            other => panic!("expected {text:?} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!(rejected(""), Rejection::Empty);
    }

    #[test]
    fn rejects_whitespace_and_comma() {
        assert_eq!(rejected("a b@x"), Rejection::InvalidChar);
        assert_eq!(rejected("a,b"), Rejection::InvalidChar);
        assert_eq!(rejected("ab\t"), Rejection::InvalidChar);
        assert_eq!(rejected("ab@g m"), Rejection::InvalidChar);
    }

    #[test]
    fn rejects_chars_outside_the_local_part_alphabet() {
        assert_eq!(rejected("john.doe"), Rejection::InvalidChar);
        assert_eq!(rejected("a-b@qq"), Rejection::InvalidChar);
        assert_eq!(rejected("é@qq"), Rejection::InvalidChar);
    }

    #[test]
    fn domain_part_is_not_held_to_the_local_alphabet() {
        assert!(classify("john@mail.qq-x").into_query().is_ok());
    }

    #[test]
    fn accepts_cjk_local_part() {
        assert_eq!(
            classify("张三_01@q"),
            Classification::Applicable(Query {
                local_part: "张三_01".into(),
                domain_prefix: Some("q".into()),
            })
        );
    }

    #[test]
    fn accepts_supplementary_plane_ideographs() {
        // U+20000 (扩展 B)、U+2F800 (兼容补充)、U+30000 (扩展 G)
        let query = classify("\u{20000}\u{2F800}\u{30000}@qq").into_query().unwrap();
        assert_eq!(query.local_part.chars().count(), 3);
        assert_eq!(rejected("\u{1F600}@qq"), Rejection::InvalidChar);
    }

    #[test]
    fn rejects_leading_at() {
        assert_eq!(rejected("@x.com"), Rejection::LeadingAt);
        assert_eq!(rejected("@"), Rejection::LeadingAt);
    }

    #[test]
    fn invalid_char_wins_over_leading_at() {
        assert_eq!(rejected("@ x"), Rejection::InvalidChar);
    }

    #[test]
    fn rejects_multiple_at() {
        assert_eq!(rejected("a@b@c"), Rejection::MultipleAt);
        assert_eq!(rejected("a@@"), Rejection::MultipleAt);
    }

    #[test]
    fn splits_local_part_and_domain_prefix() {
        assert_eq!(
            classify("john@gm").into_query(),
            Ok(Query {
                local_part: "john".into(),
                domain_prefix: Some("gm".into()),
            })
        );
        assert_eq!(
            classify("john").into_query(),
            Ok(Query {
                local_part: "john".into(),
                domain_prefix: None,
            })
        );
    }

    #[test]
    fn trailing_at_gives_empty_prefix() {
        let query = classify("john@").into_query().unwrap();
        assert_eq!(query.domain_prefix.as_deref(), Some(""));
    }

    #[test]
    fn rejection_names() {
        assert_eq!(Rejection::MultipleAt.to_string(), "multiple-at");
        assert_eq!(Rejection::Empty.as_str(), "empty");
    }
}
