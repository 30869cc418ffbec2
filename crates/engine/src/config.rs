//! Engine configuration from the environment.

use std::path::PathBuf;

use ambersteel_domain::{DomainError, GridDimensions};

use crate::interaction::DragSession;

pub const DEFAULT_DATA_DIR: &str = "./data/actors";
pub const DEFAULT_GRID_COLUMNS: u32 = 4;
/// Pixels per tile edge in the sheet view.
pub const DEFAULT_TILE_SIZE: u32 = 128;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    pub grid_columns: u32,
    pub tile_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            grid_columns: DEFAULT_GRID_COLUMNS,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Read `AMBERSTEEL_*` variables, falling back to defaults for unset ones.
    ///
    /// Call `dotenvy` first if `.env` files should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`EngineConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let data_dir = lookup("AMBERSTEEL_DATA_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let grid_columns =
            positive_number(&lookup, "AMBERSTEEL_GRID_COLUMNS")?.unwrap_or(defaults.grid_columns);
        let tile_size =
            positive_number(&lookup, "AMBERSTEEL_TILE_SIZE")?.unwrap_or(defaults.tile_size);

        Ok(Self {
            data_dir,
            grid_columns,
            tile_size,
        })
    }

    /// Grid dimensions for an actor with the given capacity.
    pub fn grid_dimensions(&self, max_bulk: u32) -> Result<GridDimensions, DomainError> {
        GridDimensions::new(self.grid_columns, max_bulk)
    }

    /// A drag session for a view drawn at the configured tile size.
    pub fn drag_session(&self) -> DragSession {
        DragSession::new(self.tile_size)
    }
}

fn positive_number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u32>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambersteel_domain::GridPosition;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.grid_columns, 4);
        assert_eq!(config.tile_size, 128);
    }

    #[test]
    fn variables_override_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("AMBERSTEEL_DATA_DIR", "/srv/actors"),
            ("AMBERSTEEL_GRID_COLUMNS", " 6 "),
            ("AMBERSTEEL_TILE_SIZE", "64"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/actors"));
        assert_eq!(config.grid_columns, 6);
        assert_eq!(config.tile_size, 64);
    }

    #[test]
    fn zero_or_garbage_is_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("AMBERSTEEL_GRID_COLUMNS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("AMBERSTEEL_GRID_COLUMNS"));
        assert!(EngineConfig::from_lookup(lookup(&[("AMBERSTEEL_TILE_SIZE", "big")])).is_err());
    }

    #[test]
    fn dimensions_follow_columns_and_bulk() {
        let config = EngineConfig::default();
        let dims = config.grid_dimensions(9).unwrap();
        assert_eq!(dims.column_count(), 4);
        assert_eq!(dims.row_count(), 3);
    }

    #[test]
    fn huge_column_count_fails_the_dimension_check() {
        let config =
            EngineConfig::from_lookup(lookup(&[("AMBERSTEEL_GRID_COLUMNS", "4000000000")])).unwrap();
        assert!(config.grid_dimensions(1).is_err());
    }

    #[test]
    fn drag_session_uses_configured_tile_size() {
        let config = EngineConfig::from_lookup(lookup(&[("AMBERSTEEL_TILE_SIZE", "64")])).unwrap();
        let session = config.drag_session();
        assert_eq!(session.tile_size(), 64);
        assert_eq!(session.cell_at(130.0, 63.9), Some(GridPosition::new(2, 0)));
    }
}
