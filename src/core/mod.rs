//! Tracker core: record mapping, queries, mutations.

pub mod dates;
pub mod fields;
pub mod mutations;
pub mod queries;
pub mod records;

use std::collections::HashMap;

use crate::error::TrackerResult;
use crate::store::SheetStore;
use crate::types::{CellValue, FilterOptions, Record, SheetData, SummaryStats, TrackerConfig};

/// Facade over a sheet store: the full read/write surface the API and CLI
/// consume. Holds the injected store handle plus layout configuration;
/// every read re-fetches from the store, so results reflect the sheet at
/// call time.
pub struct Tracker<S: SheetStore> {
    store: S,
    config: TrackerConfig,
}

impl<S: SheetStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, TrackerConfig::default())
    }

    pub fn with_config(store: S, config: TrackerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All mapped records plus header bindings.
    pub fn get_projects(&self) -> TrackerResult<SheetData> {
        records::fetch_sheet(&self.store)
    }

    /// Distinct filter values per filterable field.
    pub fn get_filter_options(&self) -> TrackerResult<FilterOptions> {
        queries::filter_options(&self.store)
    }

    /// Aggregate counts over all records.
    pub fn get_summary_stats(&self) -> TrackerResult<SummaryStats> {
        queries::summary_stats(&self.store)
    }

    /// Records whose date range touches the given month.
    pub fn get_projects_by_month(&self, month: u32, year: i32) -> TrackerResult<Vec<Record>> {
        queries::projects_by_month(&self.store, month, year)
    }

    /// Write a new status for the given data row.
    pub fn update_status(&mut self, row_index: usize, status: &str) -> TrackerResult<()> {
        mutations::update_status(&mut self.store, &self.config, row_index, status)
    }

    /// Write a single cell addressed by field key.
    pub fn update_cell(
        &mut self,
        row_index: usize,
        field: &str,
        value: CellValue,
    ) -> TrackerResult<()> {
        mutations::update_cell(&mut self.store, row_index, field, value)
    }

    /// Append a new record; returns its 1-based data row position.
    pub fn add_record(&mut self, fields: &HashMap<String, CellValue>) -> TrackerResult<usize> {
        mutations::add_record(&mut self.store, fields)
    }
}
