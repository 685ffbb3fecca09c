use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::range::normalize_range_text;
use crate::models::{BudgetDurationBand, City, CityId, CityTypeTag, State, TypeCatalog, TypeId};

/// Errors that can occur while loading the reference tables
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Missing data file for {table}: {path}")]
    Missing { table: &'static str, path: PathBuf },

    #[error("Failed to read {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("Data file for {table} has no rows")]
    Empty { table: &'static str },
}

/// File locations of the four reference tables
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub states: PathBuf,
    pub cities: PathBuf,
    pub bands: PathBuf,
    pub types: PathBuf,
}

impl DataFiles {
    /// Default file names inside a data directory
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            states: dir.join("states_and_union_territories.csv"),
            cities: dir.join("cities.csv"),
            bands: dir.join("city_budget_duration.csv"),
            types: dir.join("cities_type_data.csv"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StateRow {
    #[serde(rename = "State_Name", default)]
    state_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CityRow {
    #[serde(rename = "City_ID", default, deserialize_with = "csv::invalid_option")]
    city_id: Option<CityId>,
    #[serde(rename = "City_Name", default)]
    city_name: Option<String>,
    #[serde(rename = "State_Name", default)]
    state_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BandRow {
    #[serde(rename = "City_ID", default, deserialize_with = "csv::invalid_option")]
    city_id: Option<CityId>,
    #[serde(rename = "City_Name", default)]
    city_name: Option<String>,
    #[serde(rename = "Budget_Range", default)]
    budget_range: Option<String>,
    #[serde(rename = "Duration_Range", default)]
    duration_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeRow {
    #[serde(rename = "City_ID", default, deserialize_with = "csv::invalid_option")]
    city_id: Option<CityId>,
    #[serde(rename = "Type_ID", default, deserialize_with = "csv::invalid_option")]
    type_id: Option<TypeId>,
    #[serde(rename = "Type_Name", default)]
    type_name: Option<String>,
}

/// Immutable in-memory reference tables
///
/// Built once at startup and shared read-only between request handlers.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    states: Vec<State>,
    cities: HashMap<CityId, City>,
    type_names: TypeCatalog,
    bands: Vec<BudgetDurationBand>,
    tags: Vec<CityTypeTag>,
}

impl ReferenceData {
    /// Assemble reference data from already-normalized tables
    ///
    /// The first occurrence of a duplicated city id wins.
    pub fn new(
        states: Vec<State>,
        cities: Vec<City>,
        type_names: TypeCatalog,
        bands: Vec<BudgetDurationBand>,
        tags: Vec<CityTypeTag>,
    ) -> Self {
        let mut city_map = HashMap::with_capacity(cities.len());
        for city in cities {
            city_map.entry(city.city_id).or_insert(city);
        }

        Self {
            states,
            cities: city_map,
            type_names,
            bands,
            tags,
        }
    }

    /// Load all four tables from CSV files
    pub fn load(files: &DataFiles) -> Result<Self, DataError> {
        let states: Vec<State> = read_table::<StateRow>("states", &files.states)?
            .into_iter()
            .map(|row: StateRow| State {
                state_name: non_blank(row.state_name),
            })
            .collect();

        let cities: Vec<City> = read_table::<CityRow>("cities", &files.cities)?
            .into_iter()
            .filter_map(|row: CityRow| {
                Some(City {
                    city_id: row.city_id?,
                    name: non_blank(row.city_name)?,
                    state_name: non_blank(row.state_name)?,
                })
            })
            .collect();

        let bands: Vec<BudgetDurationBand> =
            read_table::<BandRow>("city budget/duration bands", &files.bands)?
                .into_iter()
                .map(|row: BandRow| BudgetDurationBand {
                    city_id: row.city_id,
                    city_name: non_blank(row.city_name),
                    budget_range: row.budget_range.unwrap_or_default(),
                    duration_range: normalize_range_text(&row.duration_range.unwrap_or_default()),
                })
                .collect();

        let type_rows: Vec<TypeRow> = read_table("city types", &files.types)?;

        let mut type_names = TypeCatalog::new();
        let mut tags = Vec::with_capacity(type_rows.len());
        for row in type_rows {
            if let (Some(type_id), Some(name)) = (row.type_id, non_blank(row.type_name)) {
                type_names.entry(type_id).or_insert(name);
            }
            if let (Some(city_id), Some(type_id)) = (row.city_id, row.type_id) {
                tags.push(CityTypeTag { city_id, type_id });
            }
        }

        let data = Self::new(states, cities, type_names, bands, tags);
        data.report_dangling_references();

        tracing::info!(
            "Reference data loaded: {} states, {} cities, {} bands, {} tags, {} types",
            data.states.len(),
            data.cities.len(),
            data.bands.len(),
            data.tags.len(),
            data.type_names.len()
        );

        Ok(data)
    }

    pub fn city(&self, city_id: CityId) -> Option<&City> {
        self.cities.get(&city_id)
    }

    pub fn type_catalog(&self) -> &TypeCatalog {
        &self.type_names
    }

    pub fn bands(&self) -> &[BudgetDurationBand] {
        &self.bands
    }

    pub fn tags(&self) -> &[CityTypeTag] {
        &self.tags
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Log references that point outside the loaded tables
    ///
    /// These are tolerated at query time with fallback labels.
    fn report_dangling_references(&self) {
        let known_states: HashSet<&str> = self
            .states
            .iter()
            .filter_map(|s| s.state_name.as_deref())
            .collect();

        let unknown_regions = self
            .cities
            .values()
            .filter(|city| !known_states.contains(city.state_name.as_str()))
            .count();
        if unknown_regions > 0 {
            tracing::warn!("{} cities reference a state not in the states table", unknown_regions);
        }

        let orphan_bands = self
            .bands
            .iter()
            .filter(|band| band.city_id.map_or(true, |id| !self.cities.contains_key(&id)))
            .count();
        if orphan_bands > 0 {
            tracing::warn!("{} bands reference an unknown city", orphan_bands);
        }

        let orphan_tags = self
            .tags
            .iter()
            .filter(|tag| !self.cities.contains_key(&tag.city_id))
            .count();
        if orphan_tags > 0 {
            tracing::debug!("{} type tags reference an unknown city", orphan_tags);
        }
    }
}

/// Read every row of a headed CSV table, failing if the file is absent or empty
fn read_table<T: DeserializeOwned>(table: &'static str, path: &Path) -> Result<Vec<T>, DataError> {
    if !path.exists() {
        return Err(DataError::Missing {
            table,
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| DataError::Csv { table, source })?;

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DataError::Csv { table, source })?;

    if rows.is_empty() {
        return Err(DataError::Empty { table });
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[inline]
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
