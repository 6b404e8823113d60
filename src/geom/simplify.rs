use crate::core::types::Point;

/// Thins a polyline: keeps the first point, then any point farther than
/// `min_distance` (Chebyshev) from the last kept one. Returns kept indices.
#[must_use]
pub fn reduce_indices(points: &[Point], min_distance: f64) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut anchor: Option<Point> = None;
    for (index, &point) in points.iter().enumerate() {
        let keep = match anchor {
            None => true,
            Some(anchor) => point.chebyshev_distance(anchor) > min_distance,
        };
        if keep {
            kept.push(index);
            anchor = Some(point);
        }
    }
    kept
}

/// Douglas-Peucker importance weights over a polyline.
///
/// Endpoints carry infinite weight; each interior point carries its
/// deviation from the chord at the split where it was chosen.
#[derive(Debug, Clone)]
pub struct PolylineSimplifier<'a> {
    points: &'a [Point],
    weights: Vec<f64>,
}

impl<'a> PolylineSimplifier<'a> {
    #[must_use]
    pub fn douglas_peucker(points: &'a [Point]) -> Self {
        let mut weights = vec![0.0; points.len()];
        if let Some(first) = weights.first_mut() {
            *first = f64::INFINITY;
        }
        if let Some(last) = weights.last_mut() {
            *last = f64::INFINITY;
        }
        if points.len() > 2 {
            compute_weights(points, 0, points.len() - 1, &mut weights);
        }
        Self { points, weights }
    }

    /// Indices of points whose deviation exceeds the limit, in order.
    #[must_use]
    pub fn indices_by_weight(&self, weight_limit: f64) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&index| self.weights[index] > weight_limit)
            .collect()
    }

    /// Indices of the `count_limit` most important points, in order.
    #[must_use]
    pub fn indices_by_count(&self, count_limit: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| self.weights[b].total_cmp(&self.weights[a]));
        let mut kept: Vec<usize> = order
            .into_iter()
            .take(count_limit.min(self.points.len()))
            .collect();
        kept.sort_unstable();
        kept
    }

    #[must_use]
    pub fn points_by_weight(&self, weight_limit: f64) -> Vec<Point> {
        self.indices_by_weight(weight_limit)
            .into_iter()
            .map(|index| self.points[index])
            .collect()
    }
}

fn compute_weights(points: &[Point], start: usize, end: usize, weights: &mut [f64]) {
    if end <= start + 1 {
        return;
    }
    let (split, deviation) = max_deviation(points, start, end);
    weights[split] = deviation;
    compute_weights(points, start, split, weights);
    compute_weights(points, split, end, weights);
}

fn max_deviation(points: &[Point], start: usize, end: usize) -> (usize, f64) {
    let mut best_index = start + 1;
    let mut best_distance = -1.0;
    for index in start + 1..end {
        let distance = perpendicular_distance(points[index], points[start], points[end]);
        if distance > best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    (best_index, best_distance)
}

fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;
    let norm = (dx * dx + dy * dy).sqrt();
    if norm < f64::EPSILON {
        return point.distance(line_start);
    }
    (dy * point.x - dx * point.y + line_end.x * line_start.y - line_end.y * line_start.x).abs()
        / norm
}
