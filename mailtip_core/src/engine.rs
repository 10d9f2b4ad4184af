use std::sync::Arc;

use tracing::trace;

use crate::classifier::{Classification, Classifier, LocalPartClassifier, Query, Rejection};
use crate::config::Config;
use crate::filter::{Filter, PrefixFilter};
use crate::model::Candidate;

/// 引擎：把输入文本转成候选集。
///
/// 结构上对应流水线：
/// - engine（编排） -> classifier（是否适用） -> filter（按域名前缀生成候选）
///
/// 配置以 `Arc` 持有，同一次 `configure` 派生出的所有输入框共享它。
pub struct Engine<C = LocalPartClassifier, F = PrefixFilter> {
    classifier: C,
    filter: F,
    config: Arc<Config>,
}

impl Engine {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_parts(config, LocalPartClassifier, PrefixFilter)
    }
}

impl<C, F> Engine<C, F>
where
    C: Classifier,
    F: Filter,
{
    pub fn with_parts(config: Arc<Config>, classifier: C, filter: F) -> Self {
        Self {
            classifier,
            filter,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classify(&self, text: &str) -> Classification {
        self.classifier.classify(text)
    }

    pub fn filter(&self, query: &Query) -> Vec<Candidate> {
        self.filter.apply(query, self.config.domains())
    }

    /// 快捷接口：分类 + 过滤。被拒绝时返回拒绝原因；候选可能为空。
    pub fn suggest(&self, text: &str) -> Result<Vec<Candidate>, Rejection> {
        let query = self.classify(text).into_query()?;
        let candidates = self.filter(&query);
        trace!(text, count = candidates.len(), "生成候选");
        Ok(candidates)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl<C, F> crate::processor::EngineFacade for Engine<C, F>
where
    C: Classifier,
    F: Filter,
{
    fn suggest(&self, text: &str) -> Result<Vec<Candidate>, Rejection> {
        Engine::<C, F>::suggest(self, text)
    }
}
