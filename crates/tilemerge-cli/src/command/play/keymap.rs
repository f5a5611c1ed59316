use tilemerge_engine::Direction;

/// Which letters steer the tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMap {
    /// `u`/`d`/`r`/`l` plus the numeric keypad.
    #[default]
    Legacy,
    /// `w`/`a`/`s`/`d` plus `i`/`j`/`k`/`l`.
    Wasd,
}

impl KeyMap {
    /// Keys bound to `direction`, primary key first.
    #[must_use]
    pub fn keys(self, direction: Direction) -> &'static [char] {
        match (self, direction) {
            (Self::Legacy, Direction::North) => &['u', '8'],
            (Self::Legacy, Direction::South) => &['d', '2'],
            (Self::Legacy, Direction::East) => &['r', '6'],
            (Self::Legacy, Direction::West) => &['l', '4'],
            (Self::Wasd, Direction::North) => &['w', 'i'],
            (Self::Wasd, Direction::South) => &['s', 'k'],
            (Self::Wasd, Direction::East) => &['d', 'l'],
            (Self::Wasd, Direction::West) => &['a', 'j'],
        }
    }

    #[must_use]
    pub fn direction(self, key: char) -> Option<Direction> {
        let key = key.to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|&direction| self.keys(direction).contains(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_keys() {
        let map = KeyMap::Legacy;
        assert_eq!(map.direction('u'), Some(Direction::North));
        assert_eq!(map.direction('8'), Some(Direction::North));
        assert_eq!(map.direction('D'), Some(Direction::South));
        assert_eq!(map.direction('6'), Some(Direction::East));
        assert_eq!(map.direction('l'), Some(Direction::West));
        assert_eq!(map.direction('w'), None);
    }

    #[test]
    fn test_wasd_keys() {
        let map = KeyMap::Wasd;
        assert_eq!(map.direction('W'), Some(Direction::North));
        assert_eq!(map.direction('k'), Some(Direction::South));
        assert_eq!(map.direction('d'), Some(Direction::East));
        assert_eq!(map.direction('l'), Some(Direction::East));
        assert_eq!(map.direction('j'), Some(Direction::West));
        assert_eq!(map.direction('u'), None);
    }

    #[test]
    fn test_control_keys_are_unbound() {
        for map in [KeyMap::Legacy, KeyMap::Wasd] {
            for key in ['q', 'h', '?', 'n', 'z', 'y'] {
                assert_eq!(map.direction(key), None, "{map:?} {key}");
            }
        }
    }

    #[test]
    fn test_keys_roundtrip() {
        for map in [KeyMap::Legacy, KeyMap::Wasd] {
            for direction in Direction::ALL {
                for &key in map.keys(direction) {
                    assert_eq!(map.direction(key), Some(direction));
                }
            }
        }
    }
}
