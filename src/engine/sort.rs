// src/engine/sort.rs

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::RosterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Id,
    Name,
    Email,
    TotalScore,
    Cohort,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "name" => Ok(SortColumn::Name),
            "email" => Ok(SortColumn::Email),
            "totalScore" => Ok(SortColumn::TotalScore),
            "cohort" => Ok(SortColumn::Cohort),
            other => Err(format!("Unknown sort column '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Toggle-sort state of the roster. Starts unsorted (upstream order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sorter {
    pub active: Option<SortKey>,
}

impl Sorter {
    /// Picking the active column flips direction; any other column starts
    /// ascending.
    pub fn select(&mut self, column: SortColumn) -> SortKey {
        let key = match self.active {
            Some(key) if key.column == column => SortKey {
                column,
                direction: key.direction.flipped(),
            },
            _ => SortKey {
                column,
                direction: SortDirection::Ascending,
            },
        };
        self.active = Some(key);
        key
    }

    /// Reorders rows in place. `sort_by` is stable, so rows with equal keys
    /// keep their relative order across repeated sorts.
    pub fn apply(&self, rows: &mut [RosterEntry]) {
        let Some(key) = self.active else {
            return;
        };
        rows.sort_by(|a, b| {
            let ord = compare(key.column, a, b);
            match key.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}

fn compare(column: SortColumn, a: &RosterEntry, b: &RosterEntry) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Email => a.email.cmp(&b.email),
        SortColumn::TotalScore => a.total_score.total_cmp(&b.total_score),
        SortColumn::Cohort => a.cohort.to_string().cmp(&b.cohort.to_string()),
    }
}
