//! Force-directed layout
//!
//! A small spring-electrical simulation: every pair of nodes repels, every
//! parent/child edge pulls towards an ideal length. Displacements are capped by
//! a temperature that cools geometrically, so the system settles instead of
//! oscillating. The root and pinned nodes never move but still push others.
//!
//! Runs in `O(iterations * n^2)`. Experience maps hold tens of nodes, so the
//! all-pairs repulsion is affordable there and nowhere else.

use std::f64::consts::TAU;

use log::debug;

use super::config::LayoutConfig;
use super::context::LayoutContext;
use super::tree::NodeIdx;
use super::types::Point;

/// Edge length the simulation aims for when `spacing.radial` is unset
pub const DEFAULT_IDEAL_DISTANCE: f64 = 200.0;

const K_REPULSION: f64 = 200_000.0;
const K_ATTRACTION: f64 = 0.1;
const COOLING_FACTOR: f64 = 0.95;

/// Distances below this are treated as coincident
const MIN_SEPARATION: f64 = 1.0;

/// Golden angle, used to pick a stable push direction for coincident nodes
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Tunables of one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub ideal_distance: f64,
    pub seed_radius: f64,
    pub iterations: usize,
    pub initial_temperature: f64,
    pub cooling_factor: f64,
}

impl ForceParams {
    pub fn from_config(config: &LayoutConfig, node_count: usize) -> Self {
        let ideal_distance = config.spacing.radial.unwrap_or(DEFAULT_IDEAL_DISTANCE);
        Self {
            ideal_distance,
            seed_radius: ideal_distance,
            iterations: iterations_for(node_count),
            initial_temperature: ideal_distance / 2.0,
            cooling_factor: COOLING_FACTOR,
        }
    }
}

/// Iteration budget: larger maps get more steps to untangle.
pub fn iterations_for(node_count: usize) -> usize {
    match node_count {
        0..=10 => 50,
        11..=25 => 100,
        26..=50 => 150,
        _ => 200,
    }
}

pub fn layout(ctx: &LayoutContext) -> Vec<Point> {
    let members = ctx.members();
    let params = ForceParams::from_config(ctx.config, members.len());
    let mut positions = ctx.initial_positions();

    let movable: Vec<NodeIdx> = members
        .iter()
        .copied()
        .filter(|&i| i != ctx.root && !ctx.is_frozen(i))
        .collect();
    let center = positions[ctx.root];
    seed_on_circle(&mut positions, center, &movable, params.seed_radius);

    let neighbours: Vec<Vec<NodeIdx>> = movable
        .iter()
        .map(|&i| {
            ctx.index
                .parent_of(i)
                .into_iter()
                .chain(ctx.index.children_of(i).iter().copied())
                .collect()
        })
        .collect();

    let mut temperature = params.initial_temperature;
    for _ in 0..params.iterations {
        let steps: Vec<Point> = movable
            .iter()
            .zip(&neighbours)
            .map(|(&i, adjacent)| {
                let force = net_force(i, &positions, &members, adjacent, params.ideal_distance);
                clamp_magnitude(force, temperature)
            })
            .collect();

        for (&i, step) in movable.iter().zip(steps) {
            positions[i].x += step.x;
            positions[i].y += step.y;
        }
        temperature *= params.cooling_factor;
    }

    debug!(
        "force layout: {} movable nodes, {} iterations, final temperature {:.3}",
        movable.len(),
        params.iterations,
        temperature
    );
    positions
}

/// Spread nodes evenly on a circle around `center`, in the given order.
fn seed_on_circle(positions: &mut [Point], center: Point, nodes: &[NodeIdx], radius: f64) {
    let count = nodes.len() as f64;
    for (k, &idx) in nodes.iter().enumerate() {
        let angle = TAU * k as f64 / count;
        positions[idx] = Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
    }
}

/// Sum of repulsion from every member and attraction along adjacent edges.
fn net_force(
    idx: NodeIdx,
    positions: &[Point],
    members: &[NodeIdx],
    adjacent: &[NodeIdx],
    ideal_distance: f64,
) -> Point {
    let here = positions[idx];
    let mut force = Point::default();

    for &other in members {
        if other == idx {
            continue;
        }
        let (dx, dy, distance) = separation(here, positions[other], idx, other);
        let magnitude = K_REPULSION / (distance * distance);
        force.x += dx / distance * magnitude;
        force.y += dy / distance * magnitude;
    }

    for &other in adjacent {
        let there = positions[other];
        let distance = here.distance(there);
        if distance < MIN_SEPARATION {
            continue;
        }
        // Positive pulls towards the neighbour, negative pushes away
        let magnitude = K_ATTRACTION * (distance - ideal_distance);
        force.x += (there.x - here.x) / distance * magnitude;
        force.y += (there.y - here.y) / distance * magnitude;
    }
    force
}

/// Vector pointing from `there` to `here` with its length, never shorter than
/// [`MIN_SEPARATION`]. Coincident nodes get a direction derived from their
/// indices.
fn separation(here: Point, there: Point, idx: NodeIdx, other: NodeIdx) -> (f64, f64, f64) {
    let dx = here.x - there.x;
    let dy = here.y - there.y;
    let distance = dx.hypot(dy);
    if distance >= MIN_SEPARATION {
        return (dx, dy, distance);
    }
    let angle = (idx as f64 - other as f64) * GOLDEN_ANGLE;
    (
        angle.cos() * MIN_SEPARATION,
        angle.sin() * MIN_SEPARATION,
        MIN_SEPARATION,
    )
}

fn clamp_magnitude(v: Point, max: f64) -> Point {
    let length = v.x.hypot(v.y);
    if length <= max || length == 0.0 {
        return v;
    }
    Point::new(v.x / length * max, v.y / length * max)
}
