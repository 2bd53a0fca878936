//! Practice-match (scrim) statistics read from the team's scrim sheet, either
//! the `스크림 데이터` worksheet of an Excel workbook or a CSV export of it.
//!
//! The header row names five role columns for our side and the same five again
//! for the opponent (either repeated, or with a `.1` suffix as spreadsheet tools
//! write them), plus one result column.

use crate::analysis::champion_stats::{ChampionStatsTracker, UsageRow};
use crate::error::AppError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

pub const SCRIM_SHEET: &str = "스크림 데이터";

const ROLES: [(&str, &str); 5] = [
    ("탑", "top"),
    ("정글", "jungle"),
    ("미드", "mid"),
    ("원딜", "adc"),
    ("서폿", "support"),
];
const RESULT_COLUMNS: [&str; 3] = ["승", "win", "result"];
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone, PartialEq)]
pub struct ScrimRecord {
    pub ours: Vec<String>,
    pub theirs: Vec<String>,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickCount {
    pub champion: String,
    pub games: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScrimSummary {
    pub games: usize,
    pub our_picks: Vec<PickCount>,
    pub their_picks: Vec<PickCount>,
    pub our_win_rates: Vec<UsageRow>,
}

struct Columns {
    ours: [usize; 5],
    theirs: [usize; 5],
    result: usize,
}

/// Picks the reader from the file extension.
pub fn load_scrims(path: &Path) -> Result<Vec<ScrimRecord>, AppError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if extension == "csv" {
        let file = File::open(path)
            .map_err(|e| AppError::ScrimError(format!("cannot open {}: {}", path.display(), e)))?;
        read_scrims(file)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_scrim_workbook(path)
    } else {
        Err(AppError::ScrimError(format!(
            "{}: expected a .csv, .xlsx or .xls file",
            path.display()
        )))
    }
}

pub fn load_scrim_workbook(path: &Path) -> Result<Vec<ScrimRecord>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::ScrimError(format!("cannot open {}: {}", path.display(), e)))?;

    if !workbook.sheet_names().iter().any(|name| name == SCRIM_SHEET) {
        return Err(AppError::ScrimError(format!(
            "sheet \"{}\" not found in {}",
            SCRIM_SHEET,
            path.display()
        )));
    }
    let range = workbook
        .worksheet_range(SCRIM_SHEET)
        .map_err(|e| AppError::ScrimError(format!("cannot read sheet \"{}\": {}", SCRIM_SHEET, e)))?;

    read_scrim_range(&range)
}

pub fn read_scrim_range(range: &Range<Data>) -> Result<Vec<ScrimRecord>, AppError> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());
    let headers = rows
        .next()
        .ok_or_else(|| AppError::ScrimError(format!("sheet \"{}\" is empty", SCRIM_SHEET)))?;

    build_records(&headers, rows.map(Ok))
}

pub fn read_scrims<R: io::Read>(reader: R) -> Result<Vec<ScrimRecord>, AppError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AppError::ScrimError(format!("cannot read header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = rdr.records().map(|row| {
        row.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
            .map_err(|e| e.to_string())
    });
    build_records(&headers, rows)
}

fn build_records<I>(headers: &[String], rows: I) -> Result<Vec<ScrimRecord>, AppError>
where
    I: Iterator<Item = Result<Vec<String>, String>>,
{
    let columns = locate_columns(headers)?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        let line = idx + 2;
        let row = row.map_err(|e| AppError::ScrimError(format!("row {}: {}", line, e)))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let picks = |positions: &[usize; 5]| -> Vec<String> {
            positions
                .iter()
                .filter_map(|&i| row.get(i))
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        };
        let result = row.get(columns.result).map(String::as_str).unwrap_or("");
        let won = parse_result(result).ok_or_else(|| {
            AppError::ScrimError(format!("row {}: unrecognised result \"{}\"", line, result))
        })?;

        records.push(ScrimRecord {
            ours: picks(&columns.ours),
            theirs: picks(&columns.theirs),
            won,
        });
    }

    Ok(records)
}

pub fn summarize_scrims(records: &[ScrimRecord]) -> ScrimSummary {
    let mut tracker = ChampionStatsTracker::new();
    for record in records {
        for champion in &record.ours {
            tracker.add_game(champion, record.won);
        }
    }

    ScrimSummary {
        games: records.len(),
        our_picks: count_picks(records.iter().flat_map(|r| r.ours.iter())),
        their_picks: count_picks(records.iter().flat_map(|r| r.theirs.iter())),
        our_win_rates: tracker.into_rows(),
    }
}

fn count_picks<'a>(picks: impl Iterator<Item = &'a String>) -> Vec<PickCount> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for champion in picks {
        *counts.entry(champion.as_str()).or_default() += 1;
    }

    let mut rows: Vec<PickCount> = counts
        .into_iter()
        .map(|(champion, games)| PickCount {
            champion: champion.to_string(),
            games,
        })
        .collect();
    // BTreeMap order makes the name tie-break stable.
    rows.sort_by(|a, b| b.games.cmp(&a.games));
    rows
}

fn locate_columns(headers: &[String]) -> Result<Columns, AppError> {
    let names: Vec<String> = headers
        .iter()
        .map(|h| {
            let h = h.trim().to_lowercase();
            h.strip_suffix(".1").map(str::to_string).unwrap_or(h)
        })
        .collect();

    let mut ours = [0; 5];
    let mut theirs = [0; 5];
    for (slot, (korean, english)) in ROLES.iter().enumerate() {
        let positions: Vec<usize> = names
            .iter()
            .enumerate()
            .filter(|(_, n)| n == korean || n == english)
            .map(|(i, _)| i)
            .collect();

        match positions.as_slice() {
            [first, second, ..] => {
                ours[slot] = *first;
                theirs[slot] = *second;
            }
            _ => {
                return Err(AppError::ScrimError(format!(
                    "expected two \"{}\" / \"{}\" columns (ours and opponent's)",
                    korean, english
                )))
            }
        }
    }

    let result = names
        .iter()
        .position(|n| RESULT_COLUMNS.contains(&n.as_str()))
        .ok_or_else(|| AppError::ScrimError("missing result column (승 / win / result)".to_string()))?;

    Ok(Columns { ours, theirs, result })
}

fn parse_result(cell: &str) -> Option<bool> {
    let cell = cell.trim().to_lowercase();
    match cell.as_str() {
        "1" | "true" | "w" | "win" | "승" => Some(true),
        "0" | "false" | "l" | "loss" | "패" => Some(false),
        // Spreadsheet exports often write numeric flags as floats.
        _ => match cell.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(true),
            Ok(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KOREAN_SHEET: &str = "\
날짜,탑,정글,미드,원딜,서폿,탑.1,정글.1,미드.1,원딜.1,서폿.1,승
2024-05-01,Gnar,Vi,Ahri,Jinx,Lulu,Jax,Lee Sin,Syndra,Kai'Sa,Nautilus,1
2024-05-01,Gnar,Sejuani,Ahri,Varus,Rakan,Renekton,Vi,Azir,Xayah,Rell,0
2024-05-02,Ksante,Vi,Orianna,Jinx,Lulu,Jax,Maokai,Ahri,Kai'Sa,Nautilus,1
,,,,,,,,,,,
";

    fn pick(champion: &str, games: u32) -> PickCount {
        PickCount {
            champion: champion.to_string(),
            games,
        }
    }

    #[test]
    fn reads_korean_headers_with_suffixed_opponent_columns() {
        let records = read_scrims(KOREAN_SHEET.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].ours, vec!["Gnar", "Vi", "Ahri", "Jinx", "Lulu"]);
        assert_eq!(records[0].theirs, vec!["Jax", "Lee Sin", "Syndra", "Kai'Sa", "Nautilus"]);
        assert!(records[0].won);
        assert!(!records[1].won);
    }

    #[test]
    fn reads_english_headers_repeated() {
        let sheet = "\
top,jungle,mid,adc,support,top,jungle,mid,adc,support,result
Gnar,Vi,Ahri,Jinx,,Jax,Lee Sin,Syndra,Kai'Sa,Nautilus,L
";
        let records = read_scrims(sheet.as_bytes()).unwrap();
        assert_eq!(records[0].ours, vec!["Gnar", "Vi", "Ahri", "Jinx"]);
        assert!(!records[0].won);
    }

    #[test]
    fn missing_opponent_columns_is_an_error() {
        let sheet = "top,jungle,mid,adc,support,win\nGnar,Vi,Ahri,Jinx,Lulu,1\n";
        let err = read_scrims(sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::ScrimError(_)));
    }

    #[test]
    fn bad_result_names_the_row() {
        let sheet = "\
top,jungle,mid,adc,support,top,jungle,mid,adc,support,win
Gnar,Vi,Ahri,Jinx,Lulu,Jax,Lee Sin,Syndra,Kai'Sa,Nautilus,maybe
";
        let err = read_scrims(sheet.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn summary_counts_and_win_rates() {
        let records = read_scrims(KOREAN_SHEET.as_bytes()).unwrap();
        let summary = summarize_scrims(&records);

        assert_eq!(summary.games, 3);
        assert_eq!(
            summary.our_picks[..5].to_vec(),
            vec![
                pick("Ahri", 2),
                pick("Gnar", 2),
                pick("Jinx", 2),
                pick("Lulu", 2),
                pick("Vi", 2)
            ]
        );
        assert_eq!(summary.our_picks[5], pick("Ksante", 1));
        assert_eq!(summary.their_picks[0], pick("Jax", 2));

        let vi = summary
            .our_win_rates
            .iter()
            .find(|r| r.champion == "Vi")
            .unwrap();
        assert_eq!((vi.games, vi.wins, vi.losses, vi.win_rate), (2, 2, 0, 1.0));
        assert_eq!(summary.our_win_rates[0].champion, "Jinx");
    }

    #[test]
    fn float_results_from_spreadsheet_exports() {
        assert_eq!(parse_result("1.0"), Some(true));
        assert_eq!(parse_result(" 0.0 "), Some(false));
        assert_eq!(parse_result("0.5"), None);

        let sheet = "\
top,jungle,mid,adc,support,top,jungle,mid,adc,support,win
Gnar,Vi,Ahri,Jinx,Lulu,Jax,Lee Sin,Syndra,Kai'Sa,Nautilus,1.0
Gnar,Vi,Ahri,Jinx,Lulu,Jax,Lee Sin,Syndra,Kai'Sa,Nautilus,0.0
";
        let records = read_scrims(sheet.as_bytes()).unwrap();
        assert_eq!(records.iter().map(|r| r.won).collect::<Vec<_>>(), vec![true, false]);
    }

    #[test]
    fn reads_worksheet_cells() {
        let header = [
            "날짜", "탑", "정글", "미드", "원딜", "서폿", "탑", "정글", "미드", "원딜", "서폿", "승",
        ];
        let games = [
            (["Gnar", "Vi", "Ahri", "Jinx", "Lulu"], ["Jax", "Lee Sin", "Syndra", "Kai'Sa", "Nautilus"], 1.0),
            (["Gnar", "Sejuani", "Ahri", "Varus", "Rakan"], ["Renekton", "Vi", "Azir", "Xayah", "Rell"], 0.0),
        ];

        let mut range: Range<Data> = Range::new((0, 0), (3, 11));
        for (col, name) in header.iter().enumerate() {
            range.set_value((0, col as u32), Data::String(name.to_string()));
        }
        for (i, (ours, theirs, result)) in games.iter().enumerate() {
            let row = i as u32 + 1;
            range.set_value((row, 0), Data::Float(45413.0));
            for (slot, champion) in ours.iter().chain(theirs.iter()).enumerate() {
                range.set_value((row, slot as u32 + 1), Data::String(champion.to_string()));
            }
            range.set_value((row, 11), Data::Float(*result));
        }
        // Row 3 is left as Data::Empty, like trailing rows in a used range.

        let records = read_scrim_range(&range).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ours, vec!["Gnar", "Vi", "Ahri", "Jinx", "Lulu"]);
        assert_eq!(records[1].theirs, vec!["Renekton", "Vi", "Azir", "Xayah", "Rell"]);
        assert!(records[0].won);
        assert!(!records[1].won);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_scrims(Path::new("scrims.txt")).unwrap_err();
        assert!(err.to_string().contains("expected a .csv"));
    }
}
