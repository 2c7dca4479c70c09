//! Coarse spatial index over screen regions.
//!
//! Values are bucketed into every grid cell their region overlaps. Queries
//! return candidates only: a value may be returned for a region it does not
//! actually touch, so callers always follow up with an exact check.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::geometry::{Region, Size};

/// Grid-bucketed lookup of values by region.
#[derive(Debug, Clone)]
pub struct SpatialMap<T> {
    grid: Size,
    buckets: HashMap<(i32, i32), Vec<T>>,
    fixed: Vec<T>,
}

impl<T: Copy + Eq + Hash> SpatialMap<T> {
    /// New map with buckets of `grid` cells. Zero dimensions are raised to 1.
    pub fn new(grid: Size) -> Self {
        Self {
            grid: Size::new(grid.width.max(1), grid.height.max(1)),
            buckets: HashMap::new(),
            fixed: Vec::new(),
        }
    }

    /// Add values. `fixed` values skip bucketing and match every query.
    pub fn insert<I>(&mut self, regions: I)
    where
        I: IntoIterator<Item = (Region, bool, T)>,
    {
        for (region, fixed, value) in regions {
            if fixed {
                self.fixed.push(value);
                continue;
            }
            if region.is_empty() {
                continue;
            }
            for key in bucket_keys(self.grid, region) {
                self.buckets.entry(key).or_default().push(value);
            }
        }
    }

    /// Candidate values for `region`, fixed values first, deduplicated.
    pub fn get_values_in_region(&self, region: Region) -> IndexSet<T> {
        let mut values: IndexSet<T> = self.fixed.iter().copied().collect();
        if region.is_empty() {
            return values;
        }
        for key in bucket_keys(self.grid, region) {
            if let Some(bucket) = self.buckets.get(&key) {
                values.extend(bucket.iter().copied());
            }
        }
        values
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.fixed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.fixed.is_empty()
    }
}

/// Grid cells overlapped by a non-empty region.
fn bucket_keys(grid: Size, region: Region) -> impl Iterator<Item = (i32, i32)> {
    let (x1, y1, x2, y2) = region.corners();
    let columns = x1.div_euclid(grid.width)..=(x2 - 1).div_euclid(grid.width);
    let rows = y1.div_euclid(grid.height)..=(y2 - 1).div_euclid(grid.height);
    rows.flat_map(move |row| columns.clone().map(move |column| (column, row)))
}
