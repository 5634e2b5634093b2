//! Turning routes into timed lift journeys.

use std::fmt;

use lift_core::Coord;
use lift_paths::{PathError, Route, Solver};

use crate::config::Timing;

/// One timed action of the lift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    OpenDoors { at: Coord, duration_ms: u64 },
    CloseDoors { at: Coord, duration_ms: u64 },
    /// Standing still with the doors closed before moving off.
    Wait { at: Coord, duration_ms: u64 },
    /// Travel into the neighbouring room `to`.
    Move { to: Coord, duration_ms: u64 },
}

impl Step {
    pub fn duration_ms(&self) -> u64 {
        match *self {
            Step::OpenDoors { duration_ms, .. }
            | Step::CloseDoors { duration_ms, .. }
            | Step::Wait { duration_ms, .. }
            | Step::Move { duration_ms, .. } => duration_ms,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::OpenDoors { at, duration_ms } => {
                write!(f, "open doors at {at} ({duration_ms} ms)")
            }
            Step::CloseDoors { at, duration_ms } => {
                write!(f, "close doors at {at} ({duration_ms} ms)")
            }
            Step::Wait { at, duration_ms } => write!(f, "wait at {at} ({duration_ms} ms)"),
            Step::Move { to, duration_ms } => write!(f, "move to {to} ({duration_ms} ms)"),
        }
    }
}

/// The full sequence of steps taking the lift from one room to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Journey {
    pub from: Coord,
    pub to: Coord,
    pub route: Route,
    pub steps: Vec<Step>,
}

impl Journey {
    /// Lay out the steps for `route` through `solver`'s grid.
    ///
    /// The lift lets passengers in (doors open, then close), waits, then
    /// moves room by room, each move lasting the entered room's time. On
    /// arrival the doors open and close again. A one-room route has no
    /// moves and no arrival.
    ///
    /// Returns `None` for an empty route.
    pub fn plan(solver: &Solver, route: Route, timing: &Timing) -> Option<Self> {
        let (&from, &to) = (route.path.first()?, route.path.last()?);
        let door = timing.door_toggle_ms;

        let mut steps = vec![
            Step::OpenDoors {
                at: from,
                duration_ms: door,
            },
            Step::CloseDoors {
                at: from,
                duration_ms: door,
            },
            Step::Wait {
                at: from,
                duration_ms: timing.departure_delay_ms,
            },
        ];

        let grid = solver.grid();
        for &cell in &route.path[1..] {
            steps.push(Step::Move {
                to: cell,
                duration_ms: grid.at(cell).map(u64::from).unwrap_or_default(),
            });
        }

        if route.path.len() > 1 {
            steps.push(Step::OpenDoors {
                at: to,
                duration_ms: door,
            });
            steps.push(Step::CloseDoors {
                at: to,
                duration_ms: door,
            });
        }

        Some(Self {
            from,
            to,
            route,
            steps,
        })
    }

    /// Total journey time, doors and waiting included.
    pub fn total_ms(&self) -> u64 {
        self.steps.iter().map(Step::duration_ms).sum()
    }

    /// Time spent moving; equals the route cost.
    pub fn travel_ms(&self) -> u64 {
        self.moves().map(|s| s.duration_ms()).sum()
    }

    /// The move steps, in order.
    pub fn moves(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| matches!(s, Step::Move { .. }))
    }
}

/// A lift parked in a building, remembering where it is between journeys.
#[derive(Debug)]
pub struct Lift {
    solver: Solver,
    timing: Timing,
    position: Coord,
}

impl Lift {
    pub fn new(solver: Solver, timing: Timing, position: Coord) -> Self {
        Self {
            solver,
            timing,
            position,
        }
    }

    /// The room the lift is currently in.
    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Send the lift to `to`.
    ///
    /// Returns `Ok(None)` and leaves the lift where it is if no route
    /// exists. A room outside the building is an error.
    pub fn go(&mut self, to: Coord) -> Result<Option<Journey>, PathError> {
        let route = self.solver.route(self.position, to)?;
        let Some(journey) = Journey::plan(&self.solver, route, &self.timing) else {
            log::info!("no route from {} to {to}", self.position);
            return Ok(None);
        };
        log::debug!(
            "journey {} -> {to}: {} rooms, {} ms",
            self.position,
            journey.route.len(),
            journey.total_ms()
        );
        self.position = to;
        Ok(Some(journey))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::CostGrid;
    use pretty_assertions::assert_eq;

    fn lift(rows: &[&[u32]]) -> Lift {
        let grid = CostGrid::from_rows(rows).unwrap();
        Lift::new(Solver::new(grid), Timing::default(), Coord::ZERO)
    }

    #[test]
    fn journey_steps_in_order() {
        let mut lift = lift(&[&[100, 300], &[0, 200]]);
        let j = lift.go(Coord::new(1, 1)).unwrap().unwrap();
        let a = Coord::ZERO;
        let b = Coord::new(1, 1);
        assert_eq!(
            j.steps,
            vec![
                Step::OpenDoors { at: a, duration_ms: 500 },
                Step::CloseDoors { at: a, duration_ms: 500 },
                Step::Wait { at: a, duration_ms: 1000 },
                Step::Move { to: Coord::new(0, 1), duration_ms: 300 },
                Step::Move { to: b, duration_ms: 200 },
                Step::OpenDoors { at: b, duration_ms: 500 },
                Step::CloseDoors { at: b, duration_ms: 500 },
            ]
        );
        assert_eq!(j.travel_ms(), 500);
        assert_eq!(j.travel_ms(), j.route.cost);
        assert_eq!(j.total_ms(), 3500);
        assert_eq!(j.moves().count(), 2);
    }

    #[test]
    fn lift_remembers_position() {
        let mut lift = lift(&[&[1, 1, 1]]);
        lift.go(Coord::new(0, 2)).unwrap().unwrap();
        assert_eq!(lift.position(), Coord::new(0, 2));
        let back = lift.go(Coord::ZERO).unwrap().unwrap();
        assert_eq!(back.from, Coord::new(0, 2));
        assert_eq!(lift.position(), Coord::ZERO);
    }

    #[test]
    fn same_room_only_cycles_doors() {
        let mut lift = lift(&[&[5]]);
        let j = lift.go(Coord::ZERO).unwrap().unwrap();
        assert_eq!(j.moves().count(), 0);
        assert_eq!(j.steps.len(), 3);
        assert_eq!(j.total_ms(), 2000);
    }

    #[test]
    fn unreachable_room_leaves_lift_in_place() {
        let mut lift = lift(&[&[1, 0, 1]]);
        assert_eq!(lift.go(Coord::new(0, 2)), Ok(None));
        assert_eq!(lift.position(), Coord::ZERO);
    }

    #[test]
    fn room_outside_building_is_an_error() {
        let mut lift = lift(&[&[1, 1]]);
        assert!(lift.go(Coord::new(3, 0)).is_err());
        assert_eq!(lift.position(), Coord::ZERO);
    }

    #[test]
    fn steps_render_readably() {
        let s = Step::Move {
            to: Coord::new(2, 3),
            duration_ms: 150,
        };
        assert_eq!(s.to_string(), "move to 2:3 (150 ms)");
    }
}
