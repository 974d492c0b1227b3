//! Candidate solutions and the arena that recycles them.
//!
//! An [`Agent`] pairs a decision vector with its evaluated objective vector.
//! Optimizers never drop agents one by one: they live in an [`AgentPool`],
//! addressed by `usize` handles, and are overwritten in place between
//! iterations. Clearing a pool only resets its logical length, so repeated
//! runs on a same-shaped problem do not allocate.

use crate::point::Point;
use crate::problem::Bounds;

/// A candidate solution: a decision point and its objective values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    point: Point,
    objectives: Point,
}

impl Agent {
    /// Creates a zero-initialized agent.
    #[must_use]
    pub fn new(dim: usize, n_objectives: usize) -> Self {
        Self {
            point: Point::zeros(dim),
            objectives: Point::zeros(n_objectives),
        }
    }

    /// Creates an agent from existing vectors.
    #[must_use]
    pub fn from_parts(point: Point, objectives: Point) -> Self {
        Self { point, objectives }
    }

    /// The decision vector.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Mutable access to the decision vector.
    pub fn point_mut(&mut self) -> &mut Point {
        &mut self.point
    }

    /// The objective vector.
    #[must_use]
    pub fn objectives(&self) -> &Point {
        &self.objectives
    }

    /// Mutable access to the objective vector.
    pub fn objectives_mut(&mut self) -> &mut Point {
        &mut self.objectives
    }

    /// The first objective value. This is the scalar fitness of
    /// single-objective runs.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.objectives[0]
    }

    /// Borrows the decision vector and the objective vector at once.
    pub fn parts_mut(&mut self) -> (&Point, &mut Point) {
        (&self.point, &mut self.objectives)
    }

    /// Copies both vectors of `other` into `self` in place.
    pub fn set_at(&mut self, other: &Agent) {
        self.point.copy_from(&other.point);
        self.objectives.copy_from(&other.objectives);
    }

    /// Clamps every decision coordinate into `bounds`.
    pub fn clamp_to(&mut self, bounds: &Bounds) {
        bounds.clamp(&mut self.point);
    }

    /// Consumes the agent, returning its decision and objective vectors.
    #[must_use]
    pub fn into_parts(self) -> (Point, Point) {
        (self.point, self.objectives)
    }
}

/// Fixed-shape arena of [`Agent`] slots.
///
/// Slots beyond the logical length keep their memory and are handed out
/// again by [`push`](Self::push) or [`resize`](Self::resize). A reused slot
/// holds stale values; callers overwrite it before reading.
#[derive(Clone, Debug, Default)]
pub struct AgentPool {
    slots: Vec<Agent>,
    len: usize,
    dim: usize,
    n_objectives: usize,
}

impl AgentPool {
    /// Creates an empty pool for agents of the given shape.
    #[must_use]
    pub fn new(dim: usize, n_objectives: usize) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            dim,
            n_objectives,
        }
    }

    /// Empties the pool and sets the agent shape. Slot memory is kept when
    /// the shape is unchanged.
    pub fn reset(&mut self, dim: usize, n_objectives: usize) {
        if dim != self.dim || n_objectives != self.n_objectives {
            self.slots.clear();
            self.dim = dim;
            self.n_objectives = n_objectives;
        }
        self.len = 0;
    }

    /// Resets the logical length to zero.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, occupied or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Dimension of the decision vectors.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Occupies the next slot and returns its handle.
    pub fn push(&mut self) -> usize {
        if self.len == self.slots.len() {
            self.slots.push(Agent::new(self.dim, self.n_objectives));
        }
        self.len += 1;
        self.len - 1
    }

    /// Occupies the next slot with a copy of `agent`.
    pub fn push_copy(&mut self, agent: &Agent) -> usize {
        let handle = self.push();
        self.slots[handle].set_at(agent);
        handle
    }

    /// Sets the logical length to `len`, allocating slots as needed.
    pub fn resize(&mut self, len: usize) {
        while self.slots.len() < len {
            self.slots.push(Agent::new(self.dim, self.n_objectives));
        }
        self.len = len;
    }

    /// Shortens the logical length. No-op if `len` is not smaller.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Returns the agent at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not occupied.
    #[must_use]
    pub fn get(&self, handle: usize) -> &Agent {
        &self.as_slice()[handle]
    }

    /// Returns the agent at `handle` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not occupied.
    pub fn get_mut(&mut self, handle: usize) -> &mut Agent {
        &mut self.as_mut_slice()[handle]
    }

    /// Swaps two occupied slots.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }

    /// Copies the values of slot `src` into slot `dst`.
    pub fn copy_within(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        let slots = self.as_mut_slice();
        if src < dst {
            let (head, tail) = slots.split_at_mut(dst);
            tail[0].set_at(&head[src]);
        } else {
            let (head, tail) = slots.split_at_mut(src);
            head[dst].set_at(&tail[0]);
        }
    }

    /// The occupied slots.
    #[must_use]
    pub fn as_slice(&self) -> &[Agent] {
        &self.slots[..self.len]
    }

    /// The occupied slots, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.slots[..self.len]
    }

    /// Iterates over the occupied slots.
    pub fn iter(&self) -> core::slice::Iter<'_, Agent> {
        self.as_slice().iter()
    }
}

impl core::ops::Index<usize> for AgentPool {
    type Output = Agent;

    fn index(&self, handle: usize) -> &Agent {
        self.get(handle)
    }
}

impl core::ops::IndexMut<usize> for AgentPool {
    fn index_mut(&mut self, handle: usize) -> &mut Agent {
        self.get_mut(handle)
    }
}
