//! 情感分析结果的展示模型

use sentimeter_shared::PredictResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// 解析后端返回的标签，大小写不敏感，无法识别时按中性处理
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Positive => "The text conveys a high level of positivity.",
            Self::Negative => "The text expresses significant negative sentiment.",
            Self::Neutral => "The text lacks strong positive or negative emotion.",
        }
    }

    /// 样式类名
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Positive => "alert-success",
            Self::Negative => "alert-error",
            Self::Neutral => "alert-info",
        }
    }
}

/// 单次分析结果，不持久化
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// 置信度，范围 [0, 1]
    pub score: f64,
}

impl AnalysisResult {
    pub fn label(&self) -> &'static str {
        self.sentiment.label()
    }

    /// 保留三位小数
    pub fn confidence_display(&self) -> String {
        format!("{:.3}", self.score)
    }
}

impl From<PredictResponse> for AnalysisResult {
    fn from(resp: PredictResponse) -> Self {
        Self {
            sentiment: Sentiment::parse(&resp.result),
            score: resp.score,
        }
    }
}
