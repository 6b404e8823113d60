use crate::core::data::DataFrame;

/// Tile position and labeling inside the facet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetTileInfo {
    pub col: usize,
    pub row: usize,
    /// Facet labels shown above the tile; empty without a column variable.
    pub col_labels: Vec<String>,
    /// Facet label shown beside the tile, when faceted by row.
    pub row_label: Option<String>,
    pub has_h_axis: bool,
    pub has_v_axis: bool,
}

/// Grid faceting over an optional column variable and an optional row
/// variable. Without either, the plot is a single tile.
///
/// Tiles are always enumerated row-major: `index = row * col_count + col`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotFacets {
    col_var: Option<String>,
    col_levels: Vec<String>,
    row_var: Option<String>,
    row_levels: Vec<String>,
    free_h_scale: bool,
    free_v_scale: bool,
}

impl PlotFacets {
    /// Single-tile layout.
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Level order is display order; it is not re-sorted here.
    pub fn grid(
        col: Option<(String, Vec<String>)>,
        row: Option<(String, Vec<String>)>,
    ) -> Self {
        let (col_var, col_levels) = match col {
            Some((var, levels)) => (Some(var), levels),
            None => (None, Vec::new()),
        };
        let (row_var, row_levels) = match row {
            Some((var, levels)) => (Some(var), levels),
            None => (None, Vec::new()),
        };
        Self {
            col_var,
            col_levels,
            row_var,
            row_levels,
            free_h_scale: false,
            free_v_scale: false,
        }
    }

    /// Per-tile x/y domains instead of shared ones.
    #[must_use]
    pub fn with_free_scales(mut self, free_h: bool, free_v: bool) -> Self {
        self.free_h_scale = free_h;
        self.free_v_scale = free_v;
        self
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.col_var.is_some() || self.row_var.is_some()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        if self.col_var.is_some() {
            self.col_levels.len().max(1)
        } else {
            1
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        if self.row_var.is_some() {
            self.row_levels.len().max(1)
        } else {
            1
        }
    }

    #[must_use]
    pub fn num_tiles(&self) -> usize {
        self.col_count() * self.row_count()
    }

    #[must_use]
    pub fn free_h_scale(&self) -> bool {
        self.free_h_scale
    }

    #[must_use]
    pub fn free_v_scale(&self) -> bool {
        self.free_v_scale
    }

    /// Tile descriptors in row-major order. The bottom row carries the
    /// horizontal axis and the first column the vertical one; a free scale
    /// puts that axis on every tile.
    #[must_use]
    pub fn tile_infos(&self) -> Vec<FacetTileInfo> {
        let col_count = self.col_count();
        let row_count = self.row_count();
        let mut infos = Vec::with_capacity(col_count * row_count);
        for row in 0..row_count {
            for col in 0..col_count {
                let col_labels = match self.col_var {
                    Some(_) => self
                        .col_levels
                        .get(col)
                        .map(|level| vec![level.clone()])
                        .unwrap_or_default(),
                    None => Vec::new(),
                };
                let row_label = match self.row_var {
                    Some(_) => self.row_levels.get(row).cloned(),
                    None => None,
                };
                infos.push(FacetTileInfo {
                    col,
                    row,
                    col_labels,
                    row_label,
                    has_h_axis: self.free_h_scale || row == row_count - 1,
                    has_v_axis: self.free_v_scale || col == 0,
                });
            }
        }
        infos
    }

    /// One slice per tile in row-major order. A facet variable missing from
    /// the data replicates the whole frame into every tile, so constant-only
    /// layers still render per facet.
    #[must_use]
    pub fn data_by_tile(&self, data: &DataFrame) -> Vec<DataFrame> {
        if !self.is_defined() {
            return vec![data.clone()];
        }

        let mut tiles = Vec::with_capacity(self.num_tiles());
        for row in 0..self.row_count() {
            for col in 0..self.col_count() {
                let indices: Vec<usize> = (0..data.row_count())
                    .filter(|&index| {
                        self.matches(data, index, &self.col_var, self.col_levels.get(col))
                            && self.matches(data, index, &self.row_var, self.row_levels.get(row))
                    })
                    .collect();
                tiles.push(data.slice(&indices));
            }
        }
        tiles
    }

    fn matches(
        &self,
        data: &DataFrame,
        index: usize,
        var: &Option<String>,
        level: Option<&String>,
    ) -> bool {
        let Some(var) = var else {
            return true;
        };
        let Some(column) = data.column(var) else {
            return true;
        };
        let Some(level) = level else {
            return false;
        };
        column
            .get(index)
            .is_some_and(|value| value.label() == *level)
    }
}
