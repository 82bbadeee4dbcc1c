//! Per-floor obstacle sets derived from the rack layout.
//!
//! The index is computed once per layout. Racks standing against the outer
//! edge of the floor are extended outward ("wall extension") so that the
//! walkable region is closed off at the floor boundary.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{SpatialError, SpatialResult};
use crate::layout::{FloorId, FloorLayout, LayoutConfig, RackUnit};
use crate::rect::Rect;

/// Obstacle description of a single floor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorGeometry {
    floor: FloorId,
    obstacles: Vec<Rect>,
    bounds: Rect,
}

impl FloorGeometry {
    /// Builds the geometry of one floor.
    ///
    /// Returns `None` for a floor without rack units.
    ///
    /// # Errors
    ///
    /// Returns an error if a unit has invalid placement or dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::{FloorGeometry, FloorLayout, LayoutConfig, RackUnit, Rect};
    /// use nalgebra::Point3;
    ///
    /// let layout = FloorLayout::new(1)
    ///     .with_unit(RackUnit::new(Point3::new(0.0, 0.0, 0.0), 2.0, 2.0))
    ///     .with_unit(RackUnit::new(Point3::new(20.0, 0.0, 0.0), 2.0, 2.0));
    ///
    /// let geometry = FloorGeometry::build(&layout, &LayoutConfig::default())
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(geometry.bounds(), &Rect::new(-1.0, 21.0, -1.0, 1.0));
    /// // The western rack touches the western wall and is pushed out by 20.
    /// assert_eq!(geometry.obstacles()[0].min_x, -21.0);
    /// ```
    pub fn build(layout: &FloorLayout, config: &LayoutConfig) -> SpatialResult<Option<Self>> {
        layout.validate()?;

        let footprints: Vec<Rect> = layout.units.iter().map(RackUnit::footprint).collect();
        let Some(bounds) = footprints
            .iter()
            .copied()
            .reduce(|acc, r| acc.union(&r))
        else {
            return Ok(None);
        };

        let obstacles: Vec<Rect> = footprints
            .iter()
            .map(|r| extend_to_walls(r, &bounds, config))
            .collect();

        debug!(
            floor = layout.floor,
            obstacles = obstacles.len(),
            "Built floor geometry"
        );

        Ok(Some(Self {
            floor: layout.floor,
            obstacles,
            bounds,
        }))
    }

    /// Floor identifier.
    #[must_use]
    pub const fn floor(&self) -> FloorId {
        self.floor
    }

    /// Obstacle rectangles, wall extension applied.
    #[must_use]
    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    /// Union of the unextended rack footprints.
    #[must_use]
    pub const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Checks whether a floor position is covered by an obstacle grown by
    /// `padding`.
    #[must_use]
    pub fn is_blocked_xz(&self, x: f64, z: f64, padding: f64) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.padded(padding).contains_xz(x, z))
    }
}

/// Pushes every edge lying close to the floor bounds outward.
fn extend_to_walls(rect: &Rect, bounds: &Rect, config: &LayoutConfig) -> Rect {
    let threshold = config.wall_threshold();
    let margin = config.wall_margin();
    let mut out = *rect;
    if rect.min_x - bounds.min_x < threshold {
        out.min_x -= margin;
    }
    if bounds.max_x - rect.max_x < threshold {
        out.max_x += margin;
    }
    if rect.min_z - bounds.min_z < threshold {
        out.min_z -= margin;
    }
    if bounds.max_z - rect.max_z < threshold {
        out.max_z += margin;
    }
    out
}

#[derive(Debug, Clone)]
struct FloorEntry {
    layout: FloorLayout,
    geometry: Option<FloorGeometry>,
}

/// Obstacle geometry for every floor of the warehouse.
///
/// # Example
///
/// ```
/// use pick_spatial::{FloorLayout, GeometryIndex, LayoutConfig, RackUnit};
/// use nalgebra::Point3;
///
/// let layouts = vec![
///     FloorLayout::new(1).with_unit(RackUnit::new(Point3::new(5.0, 0.0, 5.0), 4.0, 1.0)),
///     FloorLayout::new(2),
/// ];
///
/// let index = GeometryIndex::build(&layouts, LayoutConfig::default()).unwrap();
/// assert!(index.floor(1).is_some());
/// assert!(index.floor(2).is_none()); // open floor
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    config: LayoutConfig,
    floors: BTreeMap<FloorId, FloorEntry>,
}

impl GeometryIndex {
    /// Builds geometry for all given floors.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, duplicate floor ids, or
    /// invalid rack units.
    pub fn build(layouts: &[FloorLayout], config: LayoutConfig) -> SpatialResult<Self> {
        let mut index = Self {
            config,
            floors: BTreeMap::new(),
        };
        index.rebuild(layouts)?;
        Ok(index)
    }

    /// Brings the index in line with a new set of layouts.
    ///
    /// Floors whose layout is unchanged keep their cached geometry; floors
    /// missing from `layouts` are dropped. Returns the number of floors
    /// whose geometry was recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, duplicate floor ids, or
    /// invalid rack units. The index is left unchanged on error.
    pub fn rebuild(&mut self, layouts: &[FloorLayout]) -> SpatialResult<usize> {
        if let Some(issue) = self.config.validate().into_iter().next() {
            return Err(SpatialError::InvalidConfig(issue));
        }

        let mut next = BTreeMap::new();
        let mut recomputed = 0;
        for layout in layouts {
            if next.contains_key(&layout.floor) {
                return Err(SpatialError::DuplicateFloor(layout.floor));
            }
            let entry = match self.floors.get(&layout.floor) {
                Some(existing) if existing.layout == *layout => existing.clone(),
                _ => {
                    recomputed += 1;
                    FloorEntry {
                        layout: layout.clone(),
                        geometry: FloorGeometry::build(layout, &self.config)?,
                    }
                }
            };
            next.insert(layout.floor, entry);
        }

        debug!(floors = next.len(), recomputed, "Geometry index updated");
        self.floors = next;
        Ok(recomputed)
    }

    /// Returns the layout configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns the geometry of a floor, or `None` for open or unknown floors.
    #[must_use]
    pub fn floor(&self, floor: FloorId) -> Option<&FloorGeometry> {
        self.floors.get(&floor).and_then(|e| e.geometry.as_ref())
    }

    /// Checks whether the floor is part of the indexed layout.
    #[must_use]
    pub fn contains_floor(&self, floor: FloorId) -> bool {
        self.floors.contains_key(&floor)
    }

    /// Iterates over the known floor ids in ascending order.
    pub fn floor_ids(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.floors.keys().copied()
    }
}
