use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat at the table. Seats 0/2 and 1/3 are partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::North => Seat::West,
            Seat::East => Seat::North,
            Seat::South => Seat::East,
            Seat::West => Seat::South,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::East => Seat::West,
            Seat::South => Seat::North,
            Seat::West => Seat::East,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::North | Seat::South => Team::NorthSouth,
            Seat::East | Seat::West => Team::EastWest,
        }
    }

    /// All four seats clockwise, beginning with `self`.
    pub const fn order_from(self) -> [Seat; 4] {
        let second = self.next();
        let third = second.next();
        [self, second, third, third.next()]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "north" | "n" | "0" => Some(Seat::North),
            "east" | "e" | "1" => Some(Seat::East),
            "south" | "s" | "2" => Some(Seat::South),
            "west" | "w" | "3" => Some(Seat::West),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

/// Partnership, identified by seat parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }

    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::NorthSouth => [Seat::North, Seat::South],
            Team::EastWest => [Seat::East, Seat::West],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::NorthSouth => "North/South",
            Team::EastWest => "East/West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{Seat, Team};

    #[test]
    fn next_wraps_around() {
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!(Seat::North.previous(), Seat::West);
    }

    #[test]
    fn partnerships_are_symmetric_and_share_a_team() {
        for seat in Seat::LOOP {
            assert_eq!(seat.partner().partner(), seat);
            assert_eq!(seat.partner().team(), seat.team());
            assert_ne!(seat.next().team(), seat.team());
            assert_eq!(seat.team().index(), seat.index() % 2);
        }
    }

    #[test]
    fn order_from_visits_each_seat_once() {
        for start in Seat::LOOP {
            let order = start.order_from();
            assert_eq!(order[0], start);
            for (i, seat) in order.iter().enumerate() {
                assert_eq!(seat.index(), (start.index() + i) % 4);
            }
        }
        assert_eq!(
            Seat::South.order_from(),
            [Seat::South, Seat::West, Seat::North, Seat::East]
        );
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(Seat::from_index(4), None);
    }

    #[test]
    fn teams_list_their_seats() {
        assert_eq!(Team::NorthSouth.seats(), [Seat::North, Seat::South]);
        assert_eq!(Team::EastWest.opponent(), Team::NorthSouth);
    }
}
