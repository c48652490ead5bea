//! Offline summarization client with canned, deterministic output.

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::chart::ChartKind;
use crate::clients::traits::{SummaryClient, SummaryRequest, SummaryResult};
use crate::error::Result;

const LINE_SUMMARY: &str = "
# グラフ要約

このグラフは時系列データの上昇トレンドを示しています。全体的に右肩上がりの傾向が見られます。

## 主要ポイント

1. データは時間経過とともに増加傾向を示しています
2. 特に中間地点からの上昇率が高くなっています
3. いくつかの小さな変動はありますが、全体的なトレンドは上昇です
4. 始点と終点を比較すると、約30%の成長が見られます

## 詳細分析

このデータからは持続的な成長パターンが読み取れます。短期的な変動はあるものの、長期的には安定して上昇していることがわかります。
";

const BAR_SUMMARY: &str = "
# グラフ要約

このグラフはカテゴリ別の比較データを示しています。カテゴリ間で値に明確な差異があります。

## 主要ポイント

1. 最大値と最小値の間には約2倍の差があります
2. 中央値付近のカテゴリが最も多く分布しています
3. 特に注目すべきカテゴリが2つあり、他と比較して高い値を示しています
4. 全体的なバランスは比較的均等ですが、いくつかの外れ値が存在します

## 詳細分析

このデータからはカテゴリ間の明確な差異パターンが読み取れます。特定のカテゴリが突出しており、全体のバランスに影響を与えています。
";

const OTHER_SUMMARY: &str = "
# グラフ要約

このグラフはデータの分布と相関関係を示しています。複数の要素間に一定のパターンが見られます。

## 主要ポイント

1. データは全体的に偏りなく分布しています
2. いくつかの外れ値が存在し、全体の傾向から逸脱しています
3. 複数の変数間に中程度の相関関係が見られます
4. 集中した値のクラスターがいくつか形成されています

## 詳細分析

このデータからは複合的なパターンが読み取れます。全体的な分布は均等ですが、特定の領域に集中する傾向があります。
";

pub const MOCK_INSIGHTS: [&str; 5] = [
    "データには明確な上昇/下降トレンドがあります",
    "最大値は平均値より約30%高い値を示しています",
    "データの変動は中間地点で最も大きくなっています",
    "全体的なパターンから逸脱する外れ値が2点存在します",
    "長期的には安定した成長/減少傾向が見られます",
];

struct Template {
    kind: ChartKind,
    summary: &'static str,
}

static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template {
            kind: ChartKind::Line,
            summary: LINE_SUMMARY,
        },
        Template {
            kind: ChartKind::Bar,
            summary: BAR_SUMMARY,
        },
        Template {
            kind: ChartKind::Other,
            summary: OTHER_SUMMARY,
        },
    ]
});

#[derive(Debug, Clone, Copy, Default)]
pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        Self
    }

    /// Canned result for an explicit classification.
    pub fn canned(kind: ChartKind) -> SummaryResult {
        let summary = TEMPLATES
            .iter()
            .find(|t| t.kind == kind)
            .map_or(OTHER_SUMMARY, |t| t.summary);
        SummaryResult {
            summary_text: summary.to_string(),
            insights: MOCK_INSIGHTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SummaryClient for MockClient {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<SummaryResult> {
        Ok(Self::canned(request.chart.classify()))
    }
}
