pub mod data_source_bar;
pub mod report_card;
pub mod stats_card;
pub mod trend_chart;
