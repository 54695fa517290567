use super::models::SeasonData;
use super::season::SeasonKey;
use std::collections::BTreeMap;

/// Seasons gathered during one sync, indexed by snapshot key
pub struct SeasonCollection {
    seasons: BTreeMap<String, SeasonData>,
}

impl SeasonCollection {
    pub fn new() -> Self {
        Self {
            seasons: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, key: SeasonKey, data: SeasonData) {
        self.seasons.insert(key.to_string(), data);
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SeasonData> {
        self.seasons.get(key)
    }

    /// Copies forward every previous season this run did not fetch again.
    /// Returns how many entries were carried over.
    pub fn merge_missing_from(&mut self, previous: BTreeMap<String, SeasonData>) -> usize {
        let mut carried = 0;
        for (key, data) in previous {
            if !self.seasons.contains_key(&key) {
                self.seasons.insert(key, data);
                carried += 1;
            }
        }
        carried
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SeasonData)> {
        self.seasons.iter()
    }

    pub fn game_count(&self) -> usize {
        self.seasons.values().map(|data| data.games.len()).sum()
    }

    pub fn into_map(self) -> BTreeMap<String, SeasonData> {
        self.seasons
    }
}

impl Default for SeasonCollection {
    fn default() -> Self {
        Self::new()
    }
}
