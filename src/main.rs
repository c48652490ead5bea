use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use graph_narrator::chart::{Chart, SeriesKind};
use graph_narrator::clients::{SummaryRequest, create_client};
use graph_narrator::config::{self, Config, RuntimeConfig};
use graph_narrator::data::{self, Table};
use graph_narrator::download::download_link;
use graph_narrator::fonts;
use graph_narrator::image_codec::save_png;
use graph_narrator::options::{DetailLevel, Language};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render tabular data as a chart and summarize it in natural language", long_about = None)]
struct Args {
    /// CSV or Excel file to chart
    #[arg(long, conflicts_with_all = ["url", "sample"])]
    file: Option<PathBuf>,

    /// URL of a CSV or Excel file
    #[arg(long, conflicts_with = "sample")]
    url: Option<String>,

    /// Built-in sample (月次売上データ, 都市別気温データ, 株価推移データ or monthly_sales, city_temperature, stock_prices)
    #[arg(long)]
    sample: Option<String>,

    /// Chart type: line, bar or scatter
    #[arg(long, default_value = "line")]
    chart: String,

    /// Chart title (defaults to the data source name)
    #[arg(long)]
    title: Option<String>,

    /// Summarization backend: remote or mock (defaults to config)
    #[arg(long)]
    api_type: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Detail level: concise, standard, detailed (or 簡潔, 標準, 詳細)
    #[arg(long)]
    detail: Option<String>,

    /// Summary language: 日本語 or English
    #[arg(long)]
    language: Option<String>,

    /// Extra context passed to the model verbatim
    #[arg(long, default_value = "")]
    context: String,

    /// Write the rendered chart to this PNG file
    #[arg(long)]
    save_png: Option<PathBuf>,

    /// Write an HTML download link for the summary to this file
    #[arg(long)]
    html_link: Option<PathBuf>,
}

async fn load_table(args: &Args) -> Result<(Table, String)> {
    if let Some(path) = &args.file {
        let table = data::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        return Ok((table, name));
    }
    if let Some(url) = &args.url {
        let table = data::load_from_url(url)
            .await
            .with_context(|| format!("loading {}", url))?;
        return Ok((table, url.clone()));
    }
    let sample = args
        .sample
        .clone()
        .unwrap_or_else(|| data::SampleDataset::MonthlySales.label().to_string());
    let table = data::generate_sample_data(&sample)?;
    Ok((table, sample))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    config::load_env_file();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(RuntimeConfig::load_from_env().log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    if let Some(path) = &config.font.path {
        fonts::use_font_file(path)?;
    }

    let kind = SeriesKind::parse(&args.chart)
        .with_context(|| format!("unsupported chart type '{}'", args.chart))?;
    let (table, source) = load_table(&args).await?;
    if table.is_empty() {
        anyhow::bail!("{} contains no plottable columns", source);
    }
    let title = args.title.clone().unwrap_or(source);
    let chart = Chart::from_table(&table, kind, &title, config.chart);
    info!(
        "Charting {} rows x {} columns as {:?}",
        table.row_count(),
        table.columns.len(),
        kind
    );

    if let Some(path) = &args.save_png {
        save_png(&chart, path)?;
    }

    let api_type = args.api_type.as_deref().unwrap_or(&config.system.api_type);
    let client = create_client(api_type, args.api_key.as_deref(), &config)?;

    let detail_level = args
        .detail
        .as_deref()
        .map_or(config.summary.detail_level, DetailLevel::from_label);
    let language = args
        .language
        .as_deref()
        .map_or(config.summary.language, Language::from_label);

    let request = SummaryRequest::new(&chart)
        .with_context(args.context.clone())
        .with_detail_level(detail_level)
        .with_language(language);
    let result = client.summarize(&request).await?;

    println!("{}", result.summary_text.trim());
    println!();
    for (i, insight) in result.insights.iter().enumerate() {
        println!("{}. {}", i + 1, insight);
    }

    if let Some(path) = &args.html_link {
        let link = download_link(&result.summary_text, "graph_summary.md", "要約をダウンロード");
        std::fs::write(path, link).with_context(|| format!("writing {}", path.display()))?;
        info!("Download link written to {}", path.display());
    }

    Ok(())
}
