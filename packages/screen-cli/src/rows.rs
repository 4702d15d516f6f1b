//! CSV row source and sink.
//!
//! Input: the first row is a header, the first column is the facility name.
//! Address and website columns are optional and located by header. Files are
//! read as UTF-8 (BOM stripped) with a Shift_JIS fallback for Excel exports.
//!
//! Output is written with a UTF-8 BOM so spreadsheet apps pick the encoding.

use anyhow::{Context, Result};
use facility_screen::{FacilityRecord, ScreenMode, ScreenedRow};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: &str = "\u{feff}";
const OTA_SEPARATOR: &str = "; ";

const ADDRESS_HEADERS: &[&str] = &["住所", "address"];
const WEBSITE_HEADERS: &[&str] = &["website_url", "website", "公式HP"];

const SITES_COLUMNS: &[&str] = &["施設名", "公式HPのURL", "OTAサイト", "エラー"];
const ELIGIBILITY_COLUMNS: &[&str] = &[
    "施設名",
    "公式HPのURL",
    "OTAサイト",
    "営業対象か",
    "都道府県名",
    "判定理由",
    "エラー",
];

/// Decode raw file bytes: UTF-8 first, Shift_JIS when that fails.
pub fn decode_input(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&bytes);
            if had_errors {
                warn!("Input is neither UTF-8 nor clean Shift_JIS; some characters were replaced");
            } else {
                debug!("Input decoded as Shift_JIS");
            }
            decoded.into_owned()
        }
    };

    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Parse facilities from decoded CSV text.
///
/// Fully blank lines are skipped. A line with a blank name but other data is
/// kept so it shows up in the output as a failed row.
pub fn parse_facilities(content: &str) -> Result<Vec<FacilityRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let address_col = find_column(&headers, ADDRESS_HEADERS);
    let website_col = find_column(&headers, WEBSITE_HEADERS);
    debug!(?address_col, ?website_col, "Located optional input columns");

    let mut facilities = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let record = result.with_context(|| format!("Malformed CSV at line {}", idx + 2))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut facility = FacilityRecord::new(record.get(0).unwrap_or_default().trim());
        if let Some(address) = address_col.and_then(|col| record.get(col)) {
            facility = facility.with_address(address);
        }
        if let Some(website) = website_col.and_then(|col| record.get(col)) {
            facility = facility.with_website(website);
        }
        facilities.push(facility);
    }

    Ok(facilities)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        names.iter().any(|name| header.eq_ignore_ascii_case(name))
    })
}

/// Read and parse an input file.
pub fn read_facilities(path: &Path) -> Result<Vec<FacilityRecord>> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_facilities(&decode_input(bytes))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the outcome as CSV (BOM first) to any writer.
pub fn write_outcome<W: Write>(mut writer: W, outcome: &[ScreenedRow], mode: ScreenMode) -> Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    let columns = match mode {
        ScreenMode::Sites => SITES_COLUMNS,
        ScreenMode::Eligibility => ELIGIBILITY_COLUMNS,
    };
    csv_writer.write_record(columns)?;

    for row in outcome {
        csv_writer.write_record(output_fields(row, mode))?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn output_fields(row: &ScreenedRow, mode: ScreenMode) -> Vec<String> {
    let error = row.error.clone().unwrap_or_default();
    let ota = row.sites.ota_joined(OTA_SEPARATOR);

    match (mode, &row.verdict) {
        (ScreenMode::Eligibility, Some(verdict)) => vec![
            row.facility.name.clone(),
            verdict.resolved_website.clone(),
            ota,
            if verdict.is_target { "はい" } else { "いいえ" }.to_string(),
            verdict.prefecture.clone(),
            verdict.reason.label().to_string(),
            error,
        ],
        (ScreenMode::Eligibility, None) => vec![
            row.facility.name.clone(),
            row.sites.official_site.clone().unwrap_or_default(),
            ota,
            String::new(),
            String::new(),
            String::new(),
            error,
        ],
        (ScreenMode::Sites, _) => vec![
            row.facility.name.clone(),
            row.sites.official_site.clone().unwrap_or_default(),
            ota,
            error,
        ],
    }
}

/// Write the outcome to a file.
pub fn save_outcome(path: &Path, outcome: &[ScreenedRow], mode: ScreenMode) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_outcome(BufWriter::new(file), outcome, mode)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facility_screen::{ClassificationResult, ReasonCode, Verdict};

    #[test]
    fn test_decode_strips_bom() {
        let bytes = format!("{UTF8_BOM}屋号\nやしろ旅館\n").into_bytes();
        assert_eq!(decode_input(bytes), "屋号\nやしろ旅館\n");
    }

    #[test]
    fn test_decode_shift_jis_fallback() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("屋号,住所\nやしろ旅館,長野県松本市\n");
        assert!(String::from_utf8(bytes.to_vec()).is_err());
        assert_eq!(
            decode_input(bytes.into_owned()),
            "屋号,住所\nやしろ旅館,長野県松本市\n"
        );
    }

    #[test]
    fn test_parse_with_optional_columns() {
        let csv = "屋号,電話番号,住所,公式HP\n\
                   やしろ旅館,0263-00-0000,長野県松本市中央1-1,https://yashiro.jp\n\
                   ,,,\n\
                   民宿しまかぜ,,,\n";
        let facilities = parse_facilities(csv).unwrap();

        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].name, "やしろ旅館");
        assert_eq!(facilities[0].known_address.as_deref(), Some("長野県松本市中央1-1"));
        assert_eq!(facilities[0].known_website.as_deref(), Some("https://yashiro.jp"));
        assert_eq!(facilities[1].known_address, None);
        assert_eq!(facilities[1].known_website, None);
    }

    #[test]
    fn test_parse_name_only_and_blank_name_kept() {
        let csv = "屋号\nやしろ旅館\n\n\"  \",x\n";
        let facilities = parse_facilities(csv).unwrap();
        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[1].name, "");
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let csv = "name,Address,Website_URL\nA,東京都渋谷区1-1,https://a.jp\n";
        let facilities = parse_facilities(csv).unwrap();
        assert_eq!(facilities[0].known_address.as_deref(), Some("東京都渋谷区1-1"));
        assert_eq!(facilities[0].known_website.as_deref(), Some("https://a.jp"));
    }

    fn row(name: &str) -> ScreenedRow {
        let mut sites = ClassificationResult::new();
        sites.official_site = Some("https://yashiro.jp".to_string());
        sites.ota_sites.insert("https://www.jalan.net/yad1/".to_string());
        sites.ota_sites.insert("https://booking.com/x".to_string());
        ScreenedRow {
            facility: FacilityRecord::new(name),
            sites,
            verdict: None,
            error: None,
        }
    }

    fn written(outcome: &[ScreenedRow], mode: ScreenMode) -> String {
        let mut buf = Vec::new();
        write_outcome(&mut buf, outcome, mode).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_sites_output() {
        let out = written(&[row("やしろ旅館")], ScreenMode::Sites);
        assert!(out.starts_with(UTF8_BOM));
        let lines: Vec<_> = out.trim_start_matches(UTF8_BOM).lines().collect();
        assert_eq!(lines[0], "施設名,公式HPのURL,OTAサイト,エラー");
        assert_eq!(
            lines[1],
            "やしろ旅館,https://yashiro.jp,https://www.jalan.net/yad1/; https://booking.com/x,"
        );
    }

    #[test]
    fn test_eligibility_output() {
        let mut target = row("やしろ旅館");
        target.verdict = Some(Verdict {
            facility_name: "やしろ旅館".to_string(),
            resolved_website: "https://yashiro.jp".to_string(),
            is_target: true,
            prefecture: "長野県".to_string(),
            reason: ReasonCode::LowQualitySite,
        });
        let mut failed = row("");
        failed.sites = ClassificationResult::new();
        failed.verdict = Some(Verdict::unknown(""));
        failed.error = Some("facility name is empty".to_string());

        let out = written(&[target, failed], ScreenMode::Eligibility);
        let lines: Vec<_> = out.trim_start_matches(UTF8_BOM).lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with(",はい,長野県,簡易HP使用,"));
        assert_eq!(lines[2], ",,,いいえ,,判定不能,facility name is empty");
    }
}
