//! Block types

/// Kind of block occupying one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
}

impl BlockType {
    /// Blocks the player can place, in hotbar order
    pub const PLACEABLE: [BlockType; 3] = [BlockType::Grass, BlockType::Dirt, BlockType::Stone];

    /// Integer code used by the world file format
    pub fn code(self) -> i32 {
        match self {
            BlockType::Air => -1,
            BlockType::Grass => 0,
            BlockType::Dirt => 1,
            BlockType::Stone => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(BlockType::Air),
            0 => Some(BlockType::Grass),
            1 => Some(BlockType::Dirt),
            2 => Some(BlockType::Stone),
            _ => None,
        }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "Air",
            BlockType::Grass => "Grass",
            BlockType::Dirt => "Dirt",
            BlockType::Stone => "Stone",
        }
    }

    /// Position in [`BlockType::PLACEABLE`], `None` for air
    pub fn hotbar_index(self) -> Option<usize> {
        Self::PLACEABLE.iter().position(|&b| b == self)
    }

    pub fn from_hotbar_index(index: usize) -> Option<Self> {
        Self::PLACEABLE.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_file_format() {
        assert_eq!(BlockType::Air.code(), -1);
        assert_eq!(BlockType::Grass.code(), 0);
        assert_eq!(BlockType::Dirt.code(), 1);
        assert_eq!(BlockType::Stone.code(), 2);
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(BlockType::from_code(2), Some(BlockType::Stone));
        assert_eq!(BlockType::from_code(-1), Some(BlockType::Air));
        assert_eq!(BlockType::from_code(3), None);
        assert_eq!(BlockType::from_code(-2), None);
    }

    #[test]
    fn test_hotbar_order() {
        assert_eq!(BlockType::Air.hotbar_index(), None);
        assert_eq!(BlockType::Grass.hotbar_index(), Some(0));
        assert_eq!(BlockType::Stone.hotbar_index(), Some(2));
        assert_eq!(BlockType::from_hotbar_index(1), Some(BlockType::Dirt));
        assert_eq!(BlockType::from_hotbar_index(3), None);
    }

    #[test]
    fn test_only_air_is_passable() {
        assert!(BlockType::Air.is_air());
        for block in BlockType::PLACEABLE {
            assert!(block.is_solid(), "{} should be solid", block.name());
        }
    }
}
