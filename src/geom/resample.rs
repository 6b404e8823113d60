use crate::core::types::Point;

pub const DEFAULT_PRECISION: f64 = 0.5;

const DEPTH_LIMIT: usize = 9;
const CHORD_TOLERANCE_RATIO: f64 = 0.95;

/// Maps a straight domain-space segment through a projection, subdividing
/// until the projected polyline deviates from the true curve by less than
/// `precision` px. Unmappable endpoints drop their side of the segment.
#[must_use]
pub fn resample_segment<F>(from: Point, to: Point, precision: f64, transform: &F) -> Vec<Point>
where
    F: Fn(Point) -> Option<Point>,
{
    let mut output = Vec::new();
    let start = transform(from);
    let end = transform(to);
    if let Some(start) = start {
        output.push(start);
    }
    match (start, end) {
        (Some(start), Some(end)) => {
            subdivide(&mut output, from, to, start, end, precision, transform, 0);
        }
        (None, Some(end)) => output.push(end),
        _ => {}
    }
    output
}

/// Resamples every segment of a polyline, deduplicating shared joints.
#[must_use]
pub fn resample_path<F>(points: &[Point], precision: f64, transform: &F) -> Vec<Point>
where
    F: Fn(Point) -> Option<Point>,
{
    if points.len() == 1 {
        return transform(points[0]).into_iter().collect();
    }
    let mut output: Vec<Point> = Vec::new();
    for pair in points.windows(2) {
        let segment = resample_segment(pair[0], pair[1], precision, transform);
        let skip = match (output.last(), segment.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        output.extend(segment.into_iter().skip(skip));
    }
    output
}

#[allow(clippy::too_many_arguments)]
fn subdivide<F>(
    output: &mut Vec<Point>,
    from: Point,
    to: Point,
    client_from: Point,
    client_to: Point,
    precision: f64,
    transform: &F,
    depth: usize,
) where
    F: Fn(Point) -> Option<Point>,
{
    if depth < DEPTH_LIMIT {
        let mid = from.mid(to);
        if let Some(client_mid) = transform(mid) {
            let deviation = client_mid.distance(client_from.mid(client_to));
            if deviation > precision * CHORD_TOLERANCE_RATIO {
                subdivide(
                    output,
                    from,
                    mid,
                    client_from,
                    client_mid,
                    precision,
                    transform,
                    depth + 1,
                );
                subdivide(
                    output,
                    mid,
                    to,
                    client_mid,
                    client_to,
                    precision,
                    transform,
                    depth + 1,
                );
                return;
            }
        }
    }
    output.push(client_to);
}
