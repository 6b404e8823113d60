use std::collections::BTreeMap;
use std::mem;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::aesthetics::{defaults, Aesthetics, DataPointAesthetics};
use crate::core::coord::CoordinateSystem;
use crate::core::types::Point;
use crate::error::{PlotError, PlotResult};
use crate::geom::helper::GeomHelper;
use crate::geom::resample::{self, resample_segment};
use crate::geom::simplify::{reduce_indices, PolylineSimplifier};

/// Client-space tolerance under which consecutive path vertices collapse.
const DEDUP_DISTANCE: f64 = 0.999;
/// Douglas-Peucker weight limit for band border simplification, in px.
const BAND_SIMPLIFY_WEIGHT: f64 = 0.25;

/// One path vertex together with the data point that produced it.
#[derive(Debug, Clone, Copy)]
pub struct PathPoint<'a> {
    pub aes: DataPointAesthetics<'a>,
    pub coord: Point,
}

/// Ordered run of vertices sharing one decoration.
///
/// The first point's aesthetics are canonical for the run; builders split
/// runs wherever a decoration-relevant aesthetic changes, so the invariant
/// holds by construction. Runs are never empty.
#[derive(Debug, Clone)]
pub struct PathData<'a> {
    points: Vec<PathPoint<'a>>,
}

impl<'a> PathData<'a> {
    fn new(points: Vec<PathPoint<'a>>) -> Self {
        Self { points }
    }

    /// Decoration aesthetics for the whole run.
    #[must_use]
    pub fn aes(&self) -> DataPointAesthetics<'a> {
        self.points[0].aes
    }

    #[must_use]
    pub fn points(&self) -> &[PathPoint<'a>] {
        &self.points
    }

    #[must_use]
    pub fn coordinates(&self) -> Vec<Point> {
        self.points.iter().map(|point| point.coord).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Closed shape for one group: outer ring plus optional holes, all in
/// client space. Rings do not repeat their starting point.
#[derive(Debug, Clone)]
pub struct PolygonData<'a> {
    aes: DataPointAesthetics<'a>,
    rings: Vec<Vec<Point>>,
}

impl<'a> PolygonData<'a> {
    /// Decoration aesthetics for the whole shape.
    #[must_use]
    pub fn aes(&self) -> DataPointAesthetics<'a> {
        self.aes
    }

    #[must_use]
    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }
}

/// How domain-space runs become client-space polylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathFlavor {
    /// Map each vertex once. Enough when straight lines stay straight.
    Direct,
    /// Split runs in domain space, then adaptively resample every segment
    /// through the projection. Needed when the coordinate system bends
    /// lines; curvature only shows up in client space.
    Resampled { precision: f64 },
}

impl PathFlavor {
    /// Direct for linear coordinate systems, resampled otherwise.
    #[must_use]
    pub fn for_coord(coord: &dyn CoordinateSystem) -> Self {
        if coord.is_linear() {
            PathFlavor::Direct
        } else {
            PathFlavor::Resampled {
                precision: resample::DEFAULT_PRECISION,
            }
        }
    }
}

/// Corner order for step interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    #[default]
    HorizontalThenVertical,
    VerticalThenHorizontal,
}

/// Builds renderable path geometry from an aesthetics snapshot.
pub struct PathBuilder<'a> {
    helper: GeomHelper<'a>,
    flavor: PathFlavor,
}

impl<'a> PathBuilder<'a> {
    pub fn new(helper: GeomHelper<'a>, flavor: PathFlavor) -> Self {
        Self { helper, flavor }
    }

    pub fn direct(helper: GeomHelper<'a>) -> Self {
        Self::new(helper, PathFlavor::Direct)
    }

    /// Polylines grouped by group id (ascending), each group split into
    /// uniform-decoration runs that meet at interpolated joint midpoints.
    /// Sub-pixel duplicate vertices are collapsed.
    pub fn variadic_paths<'b>(
        &self,
        aesthetics: &'b Aesthetics,
        sort_by_x: bool,
    ) -> Vec<Vec<PathData<'b>>> {
        group_data_points(aesthetics, sort_by_x)
            .into_values()
            .map(|group| {
                let runs = match self.flavor {
                    PathFlavor::Direct => split_by_style(self.project(&group)),
                    PathFlavor::Resampled { precision } => split_by_style(locate(&group))
                        .into_iter()
                        .map(|run| self.resample_run(run, precision))
                        .filter(|run| !run.is_empty())
                        .collect(),
                };
                interpolate_mid_joints(runs)
                    .into_iter()
                    .map(dedup_run)
                    .filter(|run| !run.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|runs: &Vec<PathData<'b>>| !runs.is_empty())
            .collect()
    }

    /// Closed shapes grouped by group id (ascending). A vertex coinciding
    /// with the current ring's start closes that ring and opens the next,
    /// which is how holes are encoded in the input.
    pub fn polygons<'b>(&self, aesthetics: &'b Aesthetics) -> Vec<PolygonData<'b>> {
        group_data_points(aesthetics, false)
            .into_values()
            .filter_map(|group| {
                let (aes, rings) = match self.flavor {
                    PathFlavor::Direct => {
                        let projected = self.project(&group);
                        let aes = projected.first()?.aes;
                        let rings = split_rings(projected)
                            .into_iter()
                            .map(|ring| ring.into_iter().map(|point| point.coord).collect())
                            .collect::<Vec<Vec<Point>>>();
                        (aes, rings)
                    }
                    PathFlavor::Resampled { precision } => {
                        let located = locate(&group);
                        let aes = located.first()?.aes;
                        let rings = split_rings(located)
                            .into_iter()
                            .map(|ring| self.resample_ring(&ring, precision))
                            .collect::<Vec<Vec<Point>>>();
                        (aes, rings)
                    }
                };
                let rings: Vec<Vec<Point>> = rings
                    .into_iter()
                    .map(close_and_reduce_ring)
                    .filter(|ring| ring.len() >= 3)
                    .collect();
                if rings.is_empty() {
                    None
                } else {
                    Some(PolygonData { aes, rings })
                }
            })
            .collect()
    }

    /// One closed band per group: the upper border forward, the lower
    /// border reversed. Both locator closures must yield a projectable
    /// location for the same data points, otherwise the borders cannot be
    /// paired up and the band is rejected.
    pub fn bands<'b>(
        &self,
        aesthetics: &'b Aesthetics,
        to_upper: impl Fn(&DataPointAesthetics<'b>) -> Option<Point>,
        to_lower: impl Fn(&DataPointAesthetics<'b>) -> Option<Point>,
        simplify_borders: bool,
    ) -> PlotResult<Vec<PolygonData<'b>>> {
        let mut bands = Vec::new();
        for (group, points) in group_data_points(aesthetics, false) {
            let upper = self.project_border(&points, &to_upper);
            let lower = self.project_border(&points, &to_lower);
            if upper.len() != lower.len() {
                return Err(PlotError::InvalidConfig(format!(
                    "band group {group} has {} upper and {} lower points",
                    upper.len(),
                    lower.len()
                )));
            }
            if upper.is_empty() {
                continue;
            }

            let mut ring = if simplify_borders {
                simplify_border(&upper)
            } else {
                upper
            };
            let mut lower = if simplify_borders {
                simplify_border(&lower)
            } else {
                lower
            };
            lower.reverse();
            ring.append(&mut lower);

            bands.push(PolygonData {
                aes: points[0],
                rings: vec![ring],
            });
        }
        Ok(bands)
    }

    /// One step polyline per group: a corner vertex is inserted between
    /// every consecutive pair, horizontally or vertically first.
    pub fn steps<'b>(
        &self,
        aesthetics: &'b Aesthetics,
        direction: StepDirection,
        sort_by_x: bool,
    ) -> Vec<PathData<'b>> {
        group_data_points(aesthetics, sort_by_x)
            .into_values()
            .filter_map(|group| {
                let projected = self.project(&group);
                if projected.is_empty() {
                    return None;
                }
                let mut points: Vec<PathPoint<'b>> =
                    Vec::with_capacity(projected.len() * 2 - 1);
                for vertex in projected {
                    if let Some(prev) = points.last().copied() {
                        let corner = match direction {
                            StepDirection::HorizontalThenVertical => {
                                Point::new(vertex.coord.x, prev.coord.y)
                            }
                            StepDirection::VerticalThenHorizontal => {
                                Point::new(prev.coord.x, vertex.coord.y)
                            }
                        };
                        points.push(PathPoint {
                            aes: prev.aes,
                            coord: corner,
                        });
                    }
                    points.push(vertex);
                }
                Some(PathData::new(points))
            })
            .collect()
    }

    fn project<'b>(&self, points: &[DataPointAesthetics<'b>]) -> Vec<PathPoint<'b>> {
        points
            .iter()
            .filter_map(|p| {
                self.helper
                    .to_client_point(p)
                    .map(|coord| PathPoint { aes: *p, coord })
            })
            .collect()
    }

    fn project_border<'b>(
        &self,
        points: &[DataPointAesthetics<'b>],
        to_location: &impl Fn(&DataPointAesthetics<'b>) -> Option<Point>,
    ) -> Vec<Point> {
        points
            .iter()
            .filter_map(|p| {
                let location = to_location(p)?;
                self.helper.to_client(location, p)
            })
            .collect()
    }

    fn resample_run<'b>(&self, run: PathData<'b>, precision: f64) -> PathData<'b> {
        if run.points.len() < 2 {
            let points = run
                .points
                .into_iter()
                .filter_map(|point| {
                    self.helper
                        .to_client(point.coord, &point.aes)
                        .map(|coord| PathPoint {
                            aes: point.aes,
                            coord,
                        })
                })
                .collect();
            return PathData::new(points);
        }

        let mut smoothed = Vec::new();
        for pair in run.points.windows(2) {
            let from = pair[0];
            let to = pair[1];
            let transform = |location: Point| self.helper.to_client(location, &from.aes);
            let client = resample_segment(from.coord, to.coord, precision, &transform);
            smoothed.extend(client.into_iter().map(|coord| PathPoint {
                aes: from.aes,
                coord,
            }));
        }
        PathData::new(smoothed)
    }

    fn resample_ring(&self, ring: &[PathPoint<'_>], precision: f64) -> Vec<Point> {
        if ring.len() < 2 {
            return ring
                .iter()
                .filter_map(|point| self.helper.to_client(point.coord, &point.aes))
                .collect();
        }
        let mut out = Vec::new();
        for pair in ring.windows(2) {
            let from = pair[0];
            let to = pair[1];
            let transform = |location: Point| self.helper.to_client(location, &from.aes);
            out.extend(resample_segment(from.coord, to.coord, precision, &transform));
        }
        out
    }
}

/// Domain-space vertices for a group; points without a finite location drop.
fn locate<'b>(points: &[DataPointAesthetics<'b>]) -> Vec<PathPoint<'b>> {
    points
        .iter()
        .filter_map(|p| {
            p.finite_location()
                .map(|coord| PathPoint { aes: *p, coord })
        })
        .collect()
}

fn group_data_points<'b>(
    aesthetics: &'b Aesthetics,
    sort_by_x: bool,
) -> BTreeMap<i32, Vec<DataPointAesthetics<'b>>> {
    let mut groups: BTreeMap<i32, Vec<DataPointAesthetics<'b>>> = BTreeMap::new();
    for p in aesthetics.data_points() {
        groups.entry(p.group()).or_default().push(p);
    }
    if sort_by_x {
        for points in groups.values_mut() {
            // stable, undefined x sorts last
            points.sort_by(|a, b| {
                a.x()
                    .unwrap_or(f64::NAN)
                    .total_cmp(&b.x().unwrap_or(f64::NAN))
            });
        }
    }
    groups
}

type StyleKey = (OrderedFloat<f64>, [OrderedFloat<f64>; 4]);

fn style_key(p: &DataPointAesthetics<'_>) -> StyleKey {
    let size = p.size().unwrap_or(defaults::SIZE);
    let color = p.color().unwrap_or(defaults::COLOR);
    (
        OrderedFloat(size),
        [
            OrderedFloat(color.red),
            OrderedFloat(color.green),
            OrderedFloat(color.blue),
            OrderedFloat(color.alpha),
        ],
    )
}

fn split_by_style(points: Vec<PathPoint<'_>>) -> Vec<PathData<'_>> {
    let mut runs = Vec::new();
    let mut current: Vec<PathPoint<'_>> = Vec::new();
    for point in points {
        if let Some(last) = current.last() {
            if style_key(&last.aes) != style_key(&point.aes) {
                runs.push(PathData::new(mem::take(&mut current)));
            }
        }
        current.push(point);
    }
    if !current.is_empty() {
        runs.push(PathData::new(current));
    }
    runs
}

/// Inserts the midpoint of each style boundary into both adjacent runs so
/// neighboring decorations meet without a gap or an overlap.
fn interpolate_mid_joints(runs: Vec<PathData<'_>>) -> Vec<PathData<'_>> {
    if runs.len() < 2 {
        return runs;
    }
    let joints: Vec<Point> = runs
        .windows(2)
        .map(|pair| {
            let prev_end = pair[0].points[pair[0].points.len() - 1].coord;
            let next_start = pair[1].points[0].coord;
            prev_end.mid(next_start)
        })
        .collect();

    let last_index = runs.len() - 1;
    runs.into_iter()
        .enumerate()
        .map(|(i, run)| {
            let mut points = run.points;
            if i < last_index {
                let mut right = points[points.len() - 1];
                right.coord = joints[i];
                points.push(right);
            }
            if i > 0 {
                let mut left = points[0];
                left.coord = joints[i - 1];
                points.insert(0, left);
            }
            PathData::new(points)
        })
        .collect()
}

fn dedup_run(run: PathData<'_>) -> PathData<'_> {
    let coords = run.coordinates();
    let kept = reduce_indices(&coords, DEDUP_DISTANCE);
    if kept.len() == run.points.len() {
        return run;
    }
    PathData::new(kept.into_iter().map(|index| run.points[index]).collect())
}

/// Splits a vertex sequence into rings: a vertex equal to the current
/// ring's first vertex terminates the ring. A trailing open ring is kept
/// as-is; closing is implicit downstream.
fn split_rings(points: Vec<PathPoint<'_>>) -> Vec<Vec<PathPoint<'_>>> {
    let mut rings = Vec::new();
    let mut current: Vec<PathPoint<'_>> = Vec::new();
    for point in points {
        let closes = current.len() > 1 && current[0].coord == point.coord;
        current.push(point);
        if closes {
            rings.push(mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rings.push(current);
    }
    rings
}

/// Collapses sub-pixel duplicates and drops an explicit closing vertex;
/// rings close implicitly when rendered.
fn close_and_reduce_ring(ring: Vec<Point>) -> Vec<Point> {
    let kept = reduce_indices(&ring, DEDUP_DISTANCE);
    let mut out: Vec<Point> = kept.into_iter().map(|index| ring[index]).collect();
    if out.len() > 1 && out[0] == out[out.len() - 1] {
        out.pop();
    }
    out
}

fn simplify_border(points: &[Point]) -> Vec<Point> {
    PolylineSimplifier::douglas_peucker(points).points_by_weight(BAND_SIMPLIFY_WEIGHT)
}
