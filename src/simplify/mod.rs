//! Ring simplification using the Ramer-Douglas-Peucker algorithm.
//!
//! Reduces the point count of every innermost position sequence in a
//! [`Coordinates`] structure while keeping each removed point within
//! `tolerance` of the simplified boundary. Distances are planar, in the
//! units of the coordinates (degrees for geographic data).
//!
//! Guarantees for every ring:
//! - the output is never longer than the input;
//! - points keep their original order;
//! - the first and last point are always kept, so closed rings stay closed;
//! - rings with fewer than 3 points are returned unchanged.
//!
//! No minimum ring size is enforced: a closed ring may come out with only
//! its two endpoints.

use crate::model::{Coord, Coordinates};

/// Simplify a single ring (or any path) with Ramer-Douglas-Peucker.
///
/// Interior points farther than `tolerance` from the chord between the
/// current endpoints split the ring; everything else is dropped. A
/// tolerance of 0.0 keeps every point that is not exactly on its chord.
#[must_use = "returns the simplified ring"]
pub fn simplify_ring(ring: &[Coord], tolerance: f64) -> Vec<Coord> {
    if ring.len() < 3 {
        return ring.to_vec();
    }

    let keep = keep_mask(ring, tolerance);
    ring.iter()
        .zip(&keep)
        .filter(|&(_, kept)| *kept)
        .map(|(coord, _)| *coord)
        .collect()
}

/// Simplify every ring in a nested coordinate structure.
///
/// Points and empty coordinates are returned unchanged.
#[must_use = "returns the simplified coordinates"]
pub fn simplify(coordinates: &Coordinates, tolerance: f64) -> Coordinates {
    match coordinates {
        Coordinates::Empty => Coordinates::Empty,
        Coordinates::Point(coord) => Coordinates::Point(*coord),
        Coordinates::Ring(ring) => Coordinates::Ring(simplify_ring(ring, tolerance)),
        Coordinates::Polygon(rings) => Coordinates::Polygon(simplify_rings(rings, tolerance)),
        Coordinates::MultiPolygon(polygons) => Coordinates::MultiPolygon(
            polygons
                .iter()
                .map(|rings| simplify_rings(rings, tolerance))
                .collect(),
        ),
    }
}

/// Simplify every ring in place.
pub fn simplify_in_place(coordinates: &mut Coordinates, tolerance: f64) {
    coordinates.for_each_ring_mut(|ring| {
        if ring.len() < 3 {
            return;
        }
        let keep = keep_mask(ring, tolerance);
        let mut index = 0;
        ring.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    });
}

fn simplify_rings(rings: &[Vec<Coord>], tolerance: f64) -> Vec<Vec<Coord>> {
    rings
        .iter()
        .map(|ring| simplify_ring(ring, tolerance))
        .collect()
}

/// Marks which points of `ring` survive simplification.
///
/// Pending `(start, end)` index ranges live on an explicit stack, so the
/// call depth stays constant however long or adversarial the ring is.
/// `ring` must have at least 2 points.
fn keep_mask(ring: &[Coord], tolerance: f64) -> Vec<bool> {
    let last = ring.len() - 1;
    let mut keep = vec![false; ring.len()];
    keep[0] = true;
    keep[last] = true;

    let mut pending = vec![(0, last)];
    while let Some((start, end)) = pending.pop() {
        if end <= start + 1 {
            continue;
        }

        if let Some((split, distance)) = farthest_point(ring, start, end) {
            if distance > tolerance {
                keep[split] = true;
                // Left half on top, so ranges are handled front to back
                pending.push((split, end));
                pending.push((start, split));
            }
        }
    }

    keep
}

/// Finds the interior point of `ring[start..=end]` farthest from the chord
/// `ring[start]`–`ring[end]`. Ties go to the first such point.
fn farthest_point(ring: &[Coord], start: usize, end: usize) -> Option<(usize, f64)> {
    let (first, last) = (&ring[start], &ring[end]);
    let mut farthest: Option<(usize, f64)> = None;

    for (index, coord) in ring.iter().enumerate().take(end).skip(start + 1) {
        let distance = perpendicular_distance(coord, first, last);
        let replace = match farthest {
            Some((_, best)) => distance > best,
            None => true,
        };
        if replace {
            farthest = Some((index, distance));
        }
    }

    farthest
}

/// Perpendicular distance from `point` to the line through `start` and `end`.
///
/// Uses |cross(end - start, point - start)| / |end - start|. When `start`
/// and `end` coincide, returns the distance from `point` to `start`. Only
/// x and y are considered.
pub fn perpendicular_distance(point: &Coord, start: &Coord, end: &Coord) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return point.distance(start);
    }

    let cross = dx.mul_add(point.y - start.y, -(dy * (point.x - start.x)));
    cross.abs() / length_sq.sqrt()
}
