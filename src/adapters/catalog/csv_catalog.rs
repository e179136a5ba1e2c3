//! CSV-backed item catalog.
//!
//! Loads the career-stats CSV once at startup and serves it read-only for
//! the process lifetime. The canonical ranked order is career win shares,
//! best first. Per-stat all-time ranks and percentiles are computed lazily
//! behind a single initialization guard and embedded unmodified into
//! matchup responses.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::domain::foundation::ItemId;
use crate::ports::{ItemCard, ItemCatalog, ItemProfile, StatWithRank};

/// Errors raised while loading the catalog CSV.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog CSV contains no usable rows")]
    Empty,
}

/// One catalog row as loaded from the CSV.
#[derive(Debug, Clone)]
struct CatalogRow {
    id: ItemId,
    name: String,
    position: Option<String>,
    team: Option<String>,
    career_ws: f64,
    career_from: String,
    career_to: String,
    games: f64,
    points: f64,
}

/// Per-stat rank lookups: item id -> (value, rank, percentile).
type RankLookup = HashMap<ItemId, (f64, u32, f64)>;

struct StatRanks {
    games: RankLookup,
    points: RankLookup,
    win_shares: RankLookup,
}

/// CSV-backed implementation of ItemCatalog.
pub struct CsvItemCatalog {
    rows: Vec<CatalogRow>,
    by_id: HashMap<ItemId, usize>,
    ranked_ids: Vec<ItemId>,
    stat_ranks: OnceCell<StatRanks>,
}

impl CsvItemCatalog {
    /// Loads the catalog from a career-stats CSV.
    ///
    /// Expected columns: `Player`, `Pos`, `Team`, `From`, `To`, `WS`, `G`,
    /// `PTS`, and `Player-additional` (the stable item id). Rows without an
    /// id are skipped; numeric fields default to 0 when malformed.
    ///
    /// # Errors
    ///
    /// - `Csv` if the file cannot be read or parsed
    /// - `Empty` if no usable rows remain
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let id_col = column("Player-additional");
        let name_col = column("Player");
        let pos_col = column("Pos");
        let team_col = column("Team");
        let from_col = column("From");
        let to_col = column("To");
        let ws_col = column("WS");
        let games_col = column("G");
        let points_col = column("PTS");

        let field = |record: &csv::StringRecord, col: Option<usize>| {
            col.and_then(|idx| record.get(idx))
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        let numeric = |record: &csv::StringRecord, col: Option<usize>| {
            field(record, col).parse::<f64>().unwrap_or(0.0)
        };

        let mut rows: Vec<CatalogRow> = Vec::new();
        for record in reader.records() {
            let record = record?;

            let Ok(id) = ItemId::new(field(&record, id_col)) else {
                continue;
            };

            let position = Some(field(&record, pos_col)).filter(|s| !s.is_empty());
            let team = Some(field(&record, team_col)).filter(|s| !s.is_empty());

            rows.push(CatalogRow {
                id,
                name: field(&record, name_col),
                position,
                team,
                career_ws: numeric(&record, ws_col),
                career_from: field(&record, from_col),
                career_to: field(&record, to_col),
                games: numeric(&record, games_col),
                points: numeric(&record, points_col),
            });
        }

        if rows.is_empty() {
            return Err(CatalogError::Empty);
        }

        // Canonical ranked order: career win shares, best first.
        rows.sort_by(|a, b| {
            b.career_ws
                .partial_cmp(&a.career_ws)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let by_id = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.id.clone(), idx))
            .collect();
        let ranked_ids = rows.iter().map(|row| row.id.clone()).collect();

        tracing::info!(items = rows.len(), "item catalog loaded");

        Ok(Self {
            rows,
            by_id,
            ranked_ids,
            stat_ranks: OnceCell::new(),
        })
    }

    fn stat_ranks(&self) -> &StatRanks {
        self.stat_ranks.get_or_init(|| StatRanks {
            games: self.rank_stat(|row| row.games),
            points: self.rank_stat(|row| row.points),
            win_shares: self.rank_stat(|row| row.career_ws),
        })
    }

    /// Ranks every item on one stat, higher is better.
    fn rank_stat(&self, value: impl Fn(&CatalogRow) -> f64) -> RankLookup {
        let total = self.rows.len();
        let mut ordered: Vec<(&ItemId, f64)> =
            self.rows.iter().map(|row| (&row.id, value(row))).collect();
        ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        ordered
            .into_iter()
            .enumerate()
            .map(|(idx, (id, value))| {
                let rank = idx as u32 + 1;
                let percentile =
                    ((total as f64 - rank as f64) / total as f64 * 1000.0).round() / 10.0;
                (id.clone(), (value, rank, percentile))
            })
            .collect()
    }

    fn stat_with_rank(lookup: &RankLookup, id: &ItemId) -> StatWithRank {
        let (value, rank, percentile) = lookup.get(id).copied().unwrap_or((0.0, 0, 0.0));
        StatWithRank {
            value,
            rank,
            percentile,
        }
    }
}

impl ItemCatalog for CsvItemCatalog {
    fn ranked_ids(&self) -> &[ItemId] {
        &self.ranked_ids
    }

    fn contains(&self, id: &ItemId) -> bool {
        self.by_id.contains_key(id)
    }

    fn card(&self, id: &ItemId) -> Option<ItemCard> {
        let row = &self.rows[*self.by_id.get(id)?];
        Some(ItemCard {
            id: row.id.clone(),
            name: row.name.clone(),
            team: row.team.clone(),
            position: row.position.clone(),
        })
    }

    fn profile(&self, id: &ItemId) -> Option<ItemProfile> {
        let row = &self.rows[*self.by_id.get(id)?];
        let ranks = self.stat_ranks();
        Some(ItemProfile {
            games: Self::stat_with_rank(&ranks.games, id),
            points: Self::stat_with_rank(&ranks.points, id),
            win_shares: Self::stat_with_rank(&ranks.win_shares, id),
            career_from: row.career_from.clone(),
            career_to: row.career_to.clone(),
        })
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Player,Pos,Team,From,To,WS,G,PTS,Player-additional";

    fn catalog_from(rows: &[&str]) -> CsvItemCatalog {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        CsvItemCatalog::load(file.path()).unwrap()
    }

    fn sample_catalog() -> CsvItemCatalog {
        catalog_from(&[
            "Michael Jordan,SG,CHI,1985,2003,214.0,1072,32292,jordami01",
            "LeBron James,SF,LAL,2004,2024,249.5,1492,40474,jamesle01",
            "Steve Nash,PG,PHO,1997,2014,129.7,1217,17387,nashst01",
        ])
    }

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    #[test]
    fn ranked_order_follows_win_shares() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog.ranked_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["jamesle01", "jordami01", "nashst01"]);
    }

    #[test]
    fn card_carries_display_fields() {
        let catalog = sample_catalog();
        let card = catalog.card(&item("jordami01")).unwrap();
        assert_eq!(card.name, "Michael Jordan");
        assert_eq!(card.team.as_deref(), Some("CHI"));
        assert_eq!(card.position.as_deref(), Some("SG"));
    }

    #[test]
    fn unknown_item_has_no_card() {
        let catalog = sample_catalog();
        assert!(catalog.card(&item("ghost01")).is_none());
        assert!(!catalog.contains(&item("ghost01")));
    }

    #[test]
    fn profile_ranks_points_all_time() {
        let catalog = sample_catalog();

        let lebron = catalog.profile(&item("jamesle01")).unwrap();
        assert_eq!(lebron.points.rank, 1);
        assert_eq!(lebron.points.value, 40474.0);

        let nash = catalog.profile(&item("nashst01")).unwrap();
        assert_eq!(nash.points.rank, 3);
    }

    #[test]
    fn percentile_is_higher_for_better_ranks() {
        let catalog = sample_catalog();
        let first = catalog.profile(&item("jamesle01")).unwrap();
        let last = catalog.profile(&item("nashst01")).unwrap();
        assert!(first.win_shares.percentile > last.win_shares.percentile);
        assert_eq!(last.win_shares.percentile, 0.0);
    }

    #[test]
    fn profile_carries_career_span() {
        let catalog = sample_catalog();
        let profile = catalog.profile(&item("jordami01")).unwrap();
        assert_eq!(profile.career_from, "1985");
        assert_eq!(profile.career_to, "2003");
    }

    #[test]
    fn rows_without_id_are_skipped() {
        let catalog = catalog_from(&[
            "Michael Jordan,SG,CHI,1985,2003,214.0,1072,32292,jordami01",
            "No Id Player,C,BOS,1990,1999,50.0,800,12000,",
        ]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn malformed_numbers_default_to_zero() {
        let catalog = catalog_from(&[
            "Michael Jordan,SG,CHI,1985,2003,214.0,1072,32292,jordami01",
            "Bad Stats,PF,NYK,2000,2010,not-a-number,,abc,badsta01",
        ]);
        let profile = catalog.profile(&item("badsta01")).unwrap();
        assert_eq!(profile.win_shares.value, 0.0);
        assert_eq!(profile.points.value, 0.0);
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        let result = CsvItemCatalog::load(file.path());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = CsvItemCatalog::load("/nonexistent/careers.csv");
        assert!(matches!(result, Err(CatalogError::Csv(_))));
    }
}
