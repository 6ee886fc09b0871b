use serde::{Deserialize, Serialize};

use crate::data::observation::Observation;

const SALES_LABELS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const SALES_VALUES: &[f64] = &[
    120.0, 132.0, 101.0, 134.0, 190.0, 230.0, 210.0, 250.0, 280.0, 320.0, 350.0, 410.0,
];

const TRAFFIC_LABELS: &[&str] = &["W1", "W2", "W3", "W4", "W5", "W6", "W7", "W8", "W9"];
const TRAFFIC_VALUES: &[f64] = &[500.0, 480.0, 600.0, 550.0, 700.0, 680.0, 850.0, 800.0, 950.0];

const CRYPTO_LABELS: &[&str] = &["D1", "D2", "D3", "D4", "D5", "D6", "D7", "D8", "D9"];
const CRYPTO_VALUES: &[f64] = &[
    45000.0, 44200.0, 43000.0, 41500.0, 42000.0, 40000.0, 38500.0, 37000.0, 36500.0,
];

/// Built-in sample series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataPreset {
    Sales,
    WebsiteTraffic,
    Crypto,
}

impl DataPreset {
    pub const ALL: [DataPreset; 3] = [
        DataPreset::Sales,
        DataPreset::WebsiteTraffic,
        DataPreset::Crypto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DataPreset::Sales => "Sales (Growing)",
            DataPreset::WebsiteTraffic => "Traffic (Volatile)",
            DataPreset::Crypto => "Crypto (Falling)",
        }
    }

    pub fn observations(&self) -> Vec<Observation> {
        let (labels, values) = match self {
            DataPreset::Sales => (SALES_LABELS, SALES_VALUES),
            DataPreset::WebsiteTraffic => (TRAFFIC_LABELS, TRAFFIC_VALUES),
            DataPreset::Crypto => (CRYPTO_LABELS, CRYPTO_VALUES),
        };
        labels
            .iter()
            .zip(values)
            .map(|(&label, &value)| Observation::new(label, value))
            .collect()
    }
}
