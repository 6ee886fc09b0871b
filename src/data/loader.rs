use std::io::Write;
use std::path::Path;

use crate::data::observation::Observation;
use crate::error::LoadError;
use crate::processing::engine::Analysis;

/// File extensions the loader understands.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Load a CSV or Excel file of `Label,Value` rows.
pub fn load_file(path: &Path) -> Result<Vec<Observation>, LoadError> {
    let ext = extension_of(path);
    let series = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xls" | "xlsx" => load_excel(path)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };
    tracing::info!("Loaded {} observations from {:?}", series.len(), path);
    Ok(series)
}

fn load_csv(path: &Path) -> Result<Vec<Observation>, LoadError> {
    let content = std::fs::read(path)?;
    // Fall back to latin1 when the file is not UTF-8.
    let text = String::from_utf8(content.clone())
        .unwrap_or_else(|_| content.iter().map(|&b| b as char).collect());
    parse_csv(&text)
}

/// Parse delimited text whose first row is a header.
///
/// Fields are split on plain commas; quote characters carry no meaning, so
/// a stray `"` cannot swallow the rows after it. Rows whose value column is
/// missing or not a finite number are skipped.
pub fn parse_csv(text: &str) -> Result<Vec<Observation>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut series = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        match parse_row(record.get(0), record.get(1)) {
            Some(obs) => series.push(obs),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows without a numeric value");
    }
    if series.is_empty() {
        return Err(LoadError::NoObservations);
    }
    Ok(series)
}

fn parse_row(label: Option<&str>, value: Option<&str>) -> Option<Observation> {
    let value = value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let label = label.unwrap_or_default().trim().trim_matches('"').trim();
    Some(Observation::new(label, value))
}

fn load_excel(path: &Path) -> Result<Vec<Observation>, LoadError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Workbook(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::Workbook("no sheets found".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let cell_text = |cell: &Data| -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => dt.to_string(),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
            Data::Error(e) => format!("{e:?}"),
        }
    };

    let series: Vec<Observation> = range
        .rows()
        .skip(1)
        .filter_map(|row| {
            let label = row.first().map(cell_text);
            let value = row.get(1).map(cell_text);
            parse_row(label.as_deref(), value.as_deref())
        })
        .collect();

    if series.is_empty() {
        return Err(LoadError::NoObservations);
    }
    Ok(series)
}

/// Column header of the exported analysis table.
pub const EXPORT_HEADER: [&str; 8] = [
    "label",
    "value",
    "velocity",
    "acceleration",
    "linear",
    "quadratic",
    "linear_projection",
    "quadratic_projection",
];

/// Write the merged series followed by the forecast rows as CSV.
/// Fields that do not apply to a row are left empty.
pub fn write_analysis<W: Write>(writer: W, analysis: &Analysis) -> Result<(), LoadError> {
    let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;
    for p in &analysis.merged {
        wtr.write_record([
            p.label.clone(),
            p.value.to_string(),
            fmt(p.velocity),
            fmt(p.acceleration),
            fmt(p.regression_value),
            fmt(p.quadratic_value),
            String::new(),
            String::new(),
        ])?;
    }
    for p in &analysis.forecast {
        wtr.write_record([
            p.label.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            p.projection.to_string(),
            p.quadratic_projection.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, analysis: &Analysis) -> Result<(), LoadError> {
    let file = std::fs::File::create(path)?;
    write_analysis(file, analysis)?;
    tracing::info!("Exported CSV to {:?}", path);
    Ok(())
}
