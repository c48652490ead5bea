//! Built-in sample data sets for trying the pipeline without a file.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Table;
use crate::error::{GraphNarratorError, Result};

const MONTHS: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];

const TOKYO: [f64; 12] = [5.2, 5.7, 8.7, 13.9, 18.2, 21.4, 25.0, 26.4, 22.8, 17.5, 12.1, 7.6];
const OSAKA: [f64; 12] = [6.0, 6.3, 9.4, 15.1, 19.7, 23.5, 27.4, 28.8, 24.7, 18.6, 13.0, 8.6];
const SAPPORO: [f64; 12] = [
    -3.6, -3.1, 0.6, 7.1, 12.4, 17.3, 20.5, 22.3, 18.1, 11.8, 4.9, -0.9,
];

const TRADING_DAYS: usize = 252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDataset {
    MonthlySales,
    CityTemperature,
    StockPrices,
}

impl SampleDataset {
    pub const ALL: [SampleDataset; 3] = [
        SampleDataset::MonthlySales,
        SampleDataset::CityTemperature,
        SampleDataset::StockPrices,
    ];

    pub fn parse(option: &str) -> Option<Self> {
        match option.trim() {
            "月次売上データ" | "monthly_sales" => Some(SampleDataset::MonthlySales),
            "都市別気温データ" | "city_temperature" => Some(SampleDataset::CityTemperature),
            "株価推移データ" | "stock_prices" => Some(SampleDataset::StockPrices),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SampleDataset::MonthlySales => "月次売上データ",
            SampleDataset::CityTemperature => "都市別気温データ",
            SampleDataset::StockPrices => "株価推移データ",
        }
    }
}

pub fn generate_sample_data(option: &str) -> Result<Table> {
    let dataset = SampleDataset::parse(option)
        .ok_or_else(|| GraphNarratorError::unsupported(format!("sample data '{}'", option)))?;
    Ok(build(dataset))
}

pub fn build(dataset: SampleDataset) -> Table {
    match dataset {
        SampleDataset::MonthlySales => monthly_sales(),
        SampleDataset::CityTemperature => Table::new("月", labels(&MONTHS))
            .with_column("東京", TOKYO.to_vec())
            .with_column("大阪", OSAKA.to_vec())
            .with_column("札幌", SAPPORO.to_vec()),
        SampleDataset::StockPrices => stock_prices(),
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Box-Muller over the seeded uniform stream
fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.r#gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn cumulative(rng: &mut StdRng, n: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    let mut total = 0.0;
    (0..n)
        .map(|_| {
            total += normal(rng, mean, std_dev);
            total
        })
        .collect()
}

/// Month-end dates of 2023 with a cumulative sales series.
fn monthly_sales() -> Table {
    let mut rng = StdRng::seed_from_u64(42);
    let index = (1..=12)
        .filter_map(|month| month_end(2023, month))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    Table::new("日付", index).with_column("売上（百万円）", cumulative(&mut rng, 12, 100.0, 15.0))
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

fn business_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
        .collect()
}

/// Three random walks over a year of trading days.
fn stock_prices() -> Table {
    let mut rng = StdRng::seed_from_u64(123);
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default();
    let index = business_days(start, TRADING_DAYS)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let mut walk = |base: f64, scale: f64| -> Vec<f64> {
        cumulative(&mut rng, TRADING_DAYS, 0.0, 1.0)
            .into_iter()
            .map(|v| base + v * scale)
            .collect()
    };
    let a = walk(1000.0, 5.0);
    let b = walk(2000.0, 8.0);
    let c = walk(500.0, 3.0);

    Table::new("日付", index)
        .with_column("企業A", a)
        .with_column("企業B", b)
        .with_column("企業C", c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_sales_has_twelve_month_ends() {
        let table = generate_sample_data("月次売上データ").unwrap();
        assert_eq!(table.row_count(), 12);
        assert_eq!(table.index[0], "2023-01-31");
        assert_eq!(table.index[1], "2023-02-28");
        assert_eq!(table.index[11], "2023-12-31");
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn samples_are_reproducible() {
        for dataset in SampleDataset::ALL {
            assert_eq!(build(dataset), build(dataset), "{}", dataset.label());
        }
    }

    #[test]
    fn city_temperature_uses_fixed_values() {
        let table = generate_sample_data("city_temperature").unwrap();
        assert_eq!(table.index_name, "月");
        assert_eq!(table.column("札幌").unwrap().values[0], -3.6);
        assert_eq!(table.column("大阪").unwrap().values[7], 28.8);
    }

    #[test]
    fn stock_prices_skip_weekends() {
        let table = generate_sample_data("株価推移データ").unwrap();
        assert_eq!(table.row_count(), TRADING_DAYS);
        assert_eq!(table.columns.len(), 3);
        // 2023-01-06 is a Friday, the next row is Monday the 9th
        assert_eq!(table.index[4], "2023-01-06");
        assert_eq!(table.index[5], "2023-01-09");
    }

    #[test]
    fn unknown_sample_is_unsupported() {
        let err = generate_sample_data("weather?").unwrap_err();
        assert!(err.to_string().contains("weather?"));
    }
}
