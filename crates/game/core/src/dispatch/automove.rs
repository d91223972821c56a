//! Queued multi-step movement pending across dispatch calls.

use std::collections::VecDeque;

use crate::action::Direction;
use crate::types::Position;
use crate::world::ActivityId;

/// Per-entity auto-move record: an optional destination queue plus an
/// optional activity to start once the destination is reached.
///
/// The dispatch loop is the only writer. The state is cleared synchronously
/// when the queue empties, a step fails, the next waypoint stops being
/// adjacent, or the player issues any action that is neither an auto-move
/// continuation nor a pure timeout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoMoveState {
    route: VecDeque<Position>,
    pending_activity: Option<ActivityId>,
}

impl AutoMoveState {
    /// Replace the queue with a fresh route toward a destination.
    pub fn set_route(&mut self, route: Vec<Position>) {
        self.route = route.into();
    }

    /// Schedule an activity to start once the route is exhausted.
    pub fn set_destination_activity(&mut self, activity: ActivityId) {
        self.pending_activity = Some(activity);
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.route.is_empty() && self.pending_activity.is_none()
    }

    pub fn route(&self) -> &VecDeque<Position> {
        &self.route
    }

    /// Pop the next waypoint and return the direction toward it.
    ///
    /// Waypoints equal to the current position are skipped (route planners
    /// may include the origin). Returns `None` when the queue is empty or the
    /// next waypoint is not adjacent; either way the destination is no longer
    /// reachable by single steps and the caller cancels.
    pub fn next_step(&mut self, from: Position) -> Option<Direction> {
        while let Some(&next) = self.route.front() {
            if next == from {
                self.route.pop_front();
                continue;
            }
            let direction = Direction::between(from, next);
            if direction.is_some() {
                self.route.pop_front();
            }
            return direction;
        }
        None
    }

    /// Take the pending destination activity, only once the route is done.
    pub fn take_destination_activity(&mut self) -> Option<ActivityId> {
        if self.route.is_empty() {
            self.pending_activity.take()
        } else {
            None
        }
    }

    /// Drop the queue and any pending activity.
    pub fn clear(&mut self) {
        self.route.clear();
        self.pending_activity = None;
    }
}
