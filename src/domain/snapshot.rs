/// Snapshot format, validation and legacy migration
///
/// A Snapshot is the persisted unit of a HabitStore. Loading goes through a
/// permissive raw layer that also understands older captures (numeric ids,
/// name-keyed habits, list-shaped history days), which is then validated and
/// migrated into the canonical id-keyed form.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{DailyRecord, DayKey, DomainError, Habit, HabitId, HabitStore, History};

/// The complete serializable state of a store
///
/// Field order is the export key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub history: History,
    pub points: u64,
}

impl Snapshot {
    /// Validate and migrate a raw JSON value
    pub fn from_value(raw: &serde_json::Value) -> Result<Self, DomainError> {
        if !raw.is_object() {
            return Err(DomainError::validation("Snapshot must be a JSON object"));
        }

        let raw: RawSnapshot = RawSnapshot::deserialize(raw)
            .map_err(|e| DomainError::validation(format!("Malformed snapshot: {}", e)))?;

        raw.migrate()
    }
}

/// Snapshot as found on disk or in an import, before validation
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    habits: Vec<RawHabit>,
    #[serde(default, alias = "records")]
    history: BTreeMap<String, RawDayRecord>,
    points: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawHabit {
    id: Option<RawId>,
    name: String,
    #[serde(default)]
    archived: bool,
}

/// Older captures used `Date.now()` timestamps as ids
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDayRecord {
    /// `{ "<habit id>": true, ... }`
    Flags(BTreeMap<String, bool>),
    /// `[ {"id": ..., "name": ...}, ... ]` or `[ "<name or id>", ... ]`
    Entries(Vec<RawEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Ref { id: RawId },
    Name(String),
}

/// Maps history keys from any capture format onto habit ids
struct KeyResolver {
    ids: HashSet<HabitId>,
    legacy_names: HashMap<String, HabitId>,
    all_names: HashMap<String, HabitId>,
}

impl KeyResolver {
    /// Resolve a flag-map key: an id, or the name of a habit that had no id
    fn flag_key(&self, key: &str) -> HabitId {
        let id = HabitId::from(key);
        if self.ids.contains(&id) {
            return id;
        }
        self.legacy_names.get(key).cloned().unwrap_or(id)
    }

    /// Resolve a list entry: an id, or any habit's name
    fn entry_key(&self, key: &str) -> HabitId {
        let id = HabitId::from(key);
        if self.ids.contains(&id) {
            return id;
        }
        self.all_names.get(key).cloned().unwrap_or(id)
    }
}

impl RawSnapshot {
    fn migrate(self) -> Result<Snapshot, DomainError> {
        let mut habits = Vec::with_capacity(self.habits.len());
        let mut resolver = KeyResolver {
            ids: HashSet::new(),
            legacy_names: HashMap::new(),
            all_names: HashMap::new(),
        };

        for (index, raw) in self.habits.into_iter().enumerate() {
            let name = Habit::normalize_name(&raw.name).ok_or_else(|| {
                DomainError::validation(format!("Habit #{} has an empty name", index))
            })?;

            let id = match raw.id {
                Some(raw_id) => {
                    let id = raw_id.into_string();
                    if id.trim().is_empty() {
                        return Err(DomainError::validation(format!(
                            "Habit '{}' has an empty id",
                            name
                        )));
                    }
                    HabitId::from(id)
                }
                None => {
                    let id = HabitId::new();
                    warn!("Assigned id {} to habit '{}' stored without one", id, name);
                    resolver.legacy_names.entry(raw.name.clone()).or_insert_with(|| id.clone());
                    resolver.legacy_names.entry(name.clone()).or_insert_with(|| id.clone());
                    id
                }
            };

            if !resolver.ids.insert(id.clone()) {
                return Err(DomainError::validation(format!("Duplicate habit id '{}'", id)));
            }
            resolver.all_names.entry(name.clone()).or_insert_with(|| id.clone());

            habits.push(Habit::from_existing(id, name, raw.archived));
        }

        let mut history = History::new();
        for (key, raw_record) in self.history {
            let day = DayKey::parse(&key)?;
            let record: &mut DailyRecord = history.entry(day).or_default();

            match raw_record {
                RawDayRecord::Flags(flags) => {
                    for (habit_key, done) in flags {
                        let id = resolver.flag_key(&habit_key);
                        let merged = done || record.is_completed(&id);
                        record.set(id, merged);
                    }
                }
                RawDayRecord::Entries(entries) => {
                    debug!("Migrating list-shaped history for {}", day);
                    for entry in entries {
                        let id = match entry {
                            RawEntry::Ref { id } => resolver.entry_key(&id.into_string()),
                            RawEntry::Name(name) => resolver.entry_key(&name),
                        };
                        record.set(id, true);
                    }
                }
            }
        }

        let points = HabitStore::points_for(&history);
        if let Some(stored) = self.points.filter(|stored| *stored != points) {
            warn!(
                "Stored points {} disagree with history ({}), using recomputed value",
                stored, points
            );
        }

        Ok(Snapshot {
            habits,
            history,
            points,
        })
    }
}
