use super::config::{Palette, Rgb};
use super::grid::Position;

/// What an entity is, for picking its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Snake,
    Food,
}

impl EntityKind {
    pub fn color(&self, palette: &Palette) -> Rgb {
        match self {
            EntityKind::Snake => palette.snake,
            EntityKind::Food => palette.food,
        }
    }
}

/// Something that occupies cells on the grid and gets drawn in a fixed color
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// Cells currently occupied, in entity order
    fn cells(&self) -> impl Iterator<Item = Position> + '_;

    fn color(&self, palette: &Palette) -> Rgb {
        self.kind().color(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors() {
        let palette = Palette::default();
        assert_eq!(EntityKind::Snake.color(&palette), Rgb::GREEN);
        assert_eq!(EntityKind::Food.color(&palette), Rgb::RED);
    }
}
