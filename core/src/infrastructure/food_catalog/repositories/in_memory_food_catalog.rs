use std::{collections::HashMap, io::Read, path::Path};

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food::{entities::FoodRecord, ports::FoodCatalog},
    },
    infrastructure::food_catalog::mappers::{FoodColumns, map_food_row},
};

/// The reference nutrition table held in memory. Immutable after construction.
#[derive(Debug, Clone)]
pub struct InMemoryFoodCatalog {
    foods: HashMap<String, FoodRecord>,
    /// Lowercased name to canonical name; the first spelling seen wins.
    folded: HashMap<String, String>,
    /// Canonical names in sorted order.
    names: Vec<String>,
    suggestion_limit: usize,
}

impl InMemoryFoodCatalog {
    pub fn from_records(records: Vec<FoodRecord>, suggestion_limit: usize) -> Self {
        let mut foods = HashMap::with_capacity(records.len());
        let mut folded = HashMap::with_capacity(records.len());

        for record in records {
            let name = record.name.trim().to_string();
            if name.is_empty() {
                warn!("skipping nutrition row without a dish name");
                continue;
            }
            if foods.contains_key(&name) {
                warn!(food = %name, "duplicate dish name, keeping the first row");
                continue;
            }

            folded
                .entry(name.to_lowercase())
                .or_insert_with(|| name.clone());
            foods.insert(name.clone(), FoodRecord { name, ..record });
        }

        let mut names: Vec<String> = foods.keys().cloned().collect();
        names.sort();

        Self {
            foods,
            folded,
            names,
            suggestion_limit,
        }
    }

    pub fn from_reader<R: Read>(reader: R, suggestion_limit: usize) -> Result<Self, CoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CoreError::Dataset(format!("cannot read nutrition table header: {}", e)))?
            .clone();
        let columns = FoodColumns::from_headers(&headers)?;

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                CoreError::Dataset(format!("invalid nutrition row {}: {}", line + 2, e))
            })?;

            match map_food_row(&row, &columns) {
                Some(food) => records.push(food),
                None => warn!(row = line + 2, "skipping nutrition row without a dish name"),
            }
        }

        Ok(Self::from_records(records, suggestion_limit))
    }

    pub fn from_csv_path(path: &Path, suggestion_limit: usize) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path).map_err(|e| {
            tracing::error!("Failed to open nutrition table {}: {}", path.display(), e);
            CoreError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_reader(file, suggestion_limit)?;
        info!(path = %path.display(), foods = catalog.len(), "nutrition table loaded");

        Ok(catalog)
    }

    fn suggestions(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .take(self.suggestion_limit)
            .cloned()
            .collect()
    }
}

impl FoodCatalog for InMemoryFoodCatalog {
    fn find(&self, name: &str) -> Result<FoodRecord, CoreError> {
        let name = name.trim();

        if let Some(food) = self.foods.get(name) {
            return Ok(food.clone());
        }

        if let Some(food) = self
            .folded
            .get(&name.to_lowercase())
            .and_then(|canonical| self.foods.get(canonical))
        {
            return Ok(food.clone());
        }

        Err(CoreError::NotFound {
            query: name.to_string(),
            suggestions: self.suggestions(name),
        })
    }

    fn search(&self, term: Option<String>) -> Vec<String> {
        match term.map(|term| term.trim().to_lowercase()) {
            Some(term) if !term.is_empty() => self
                .names
                .iter()
                .filter(|name| name.to_lowercase().contains(&term))
                .cloned()
                .collect(),
            _ => self.names.clone(),
        }
    }

    fn len(&self) -> usize {
        self.foods.len()
    }
}
