//! # Raster Traversal Order
//!
//! Encoder, decoder and visualizer must visit pixels in exactly the same
//! order or the hidden bits come back scrambled. [`RasterOrder`] is that
//! order, written down once: row-major, top row first, left to right within
//! a row. Bit `i` of the payload always lives at `position(i)`.

use super::carrier::Carrier;

/// Row-major mapping between a bit index and pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOrder {
    width: u32,
    height: u32,
}

impl RasterOrder {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Traversal order for the grid of `carrier`.
    pub fn of<C: Carrier + ?Sized>(carrier: &C) -> Self {
        Self::new(carrier.width(), carrier.height())
    }

    /// Number of pixels visited, which is also the capacity in bits.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates of the pixel carrying bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    pub fn position(&self, index: usize) -> (u32, u32) {
        assert!(
            index < self.len(),
            "bit index {index} outside {}x{} grid",
            self.width,
            self.height
        );
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Bit index carried by the pixel at `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// All pixel coordinates in traversal order.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_row_major() {
        let order = RasterOrder::new(3, 2);
        let positions: Vec<_> = order.positions().collect();

        assert_eq!(
            positions,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_index_and_position_agree() {
        let order = RasterOrder::new(7, 5);

        for (i, (x, y)) in order.positions().enumerate() {
            assert_eq!(order.position(i), (x, y));
            assert_eq!(order.index(x, y), i);
        }
        assert_eq!(order.len(), 35);
    }

    #[test]
    fn test_empty_grid() {
        let order = RasterOrder::new(0, 10);
        assert!(order.is_empty());
        assert_eq!(order.positions().count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_position_out_of_range() {
        RasterOrder::new(2, 2).position(4);
    }
}
