use std::fmt;

/// A tile on the board. Rows grow downwards, columns grow to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// The neighbouring tile one step away in `orientation`.
    pub fn step(self, orientation: Orientation) -> Coord {
        match orientation {
            Orientation::North => Coord::new(self.x, self.y - 1),
            Orientation::South => Coord::new(self.x, self.y + 1),
            Orientation::West => Coord::new(self.x - 1, self.y),
            Orientation::East => Coord::new(self.x + 1, self.y),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::North => Orientation::South,
            Orientation::South => Orientation::North,
            Orientation::East => Orientation::West,
            Orientation::West => Orientation::East,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::North => "North",
            Orientation::South => "South",
            Orientation::East => "East",
            Orientation::West => "West",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Directional keys seen during one tick. Several may be active at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Intents {
    pub fn none() -> Self {
        Intents::default()
    }

    pub fn only(orientation: Orientation) -> Self {
        let mut intents = Intents::default();
        intents.insert(orientation);
        intents
    }

    pub fn insert(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::North => self.north = true,
            Orientation::South => self.south = true,
            Orientation::East => self.east = true,
            Orientation::West => self.west = true,
        }
    }

    pub fn contains(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::North => self.north,
            Orientation::South => self.south,
            Orientation::East => self.east,
            Orientation::West => self.west,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.north || self.south || self.east || self.west)
    }
}

/// Order in which held keys are applied. A later valid key overrides an
/// earlier one within the same tick.
const INPUT_ORDER: [Orientation; 4] = [
    Orientation::North,
    Orientation::West,
    Orientation::South,
    Orientation::East,
];

/// The committed heading plus the heading queued for the next move.
///
/// The queued heading is never the reverse of the committed one, so the body
/// can't fold back onto its own neck between two moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientationBuffer {
    committed: Orientation,
    next: Orientation,
}

impl OrientationBuffer {
    pub fn new(orientation: Orientation) -> Self {
        OrientationBuffer {
            committed: orientation,
            next: orientation,
        }
    }

    pub fn committed(&self) -> Orientation {
        self.committed
    }

    pub fn next(&self) -> Orientation {
        self.next
    }

    pub fn handle_input(&mut self, intents: Intents) {
        for orientation in INPUT_ORDER {
            if intents.contains(orientation) && orientation != self.committed.opposite() {
                self.next = orientation;
            }
        }
    }

    /// Promotes the queued heading and returns it.
    pub fn commit(&mut self) -> Orientation {
        self.committed = self.next;
        self.committed
    }
}
