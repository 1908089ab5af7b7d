use delve_core::Direction;

/// Mutable per-direction weights feeding a weighted choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionWeights {
    weights: [u32; 4],
}

impl DirectionWeights {
    /// Creates a table assigning `weight` to every direction.
    #[must_use]
    pub const fn uniform(weight: u32) -> Self {
        Self {
            weights: [weight; 4],
        }
    }

    /// Current weight of `direction`.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> u32 {
        self.weights[direction.index()]
    }

    /// Overwrites the weight of `direction`.
    pub fn set(&mut self, direction: Direction, weight: u32) {
        self.weights[direction.index()] = weight;
    }

    /// Pairs each option with its weight, ready for a weighted choice.
    #[must_use]
    pub fn options<const N: usize>(&self, directions: [Direction; N]) -> [(Direction, u32); N] {
        directions.map(|direction| (direction, self.get(direction)))
    }
}
