use std::str::FromStr;

use bit_set::BitSet;
use image::DynamicImage;
use itertools::Itertools;
use tracing::debug;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{ColumnLength, RowLength};

/// A rectangle of cells with its top left (north west) corner at (`x`, `y`).
///
/// Parses from `x,y,w,h` text such as `4,4,3,2`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MaskRectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for MaskRectangle {
    type Err = Error;

    fn from_str(s: &str) -> Result<MaskRectangle> {
        const FORM: &str = "x,y,w,h";

        let numbers = s.split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<::std::result::Result<Vec<_>, _>>()
            .chain_err(|| ErrorKind::MalformedText(s.to_string(), FORM))?;

        match numbers.into_iter().collect_tuple::<(u32, u32, u32, u32)>() {
            Some((x, y, width, height)) => Ok(MaskRectangle { x, y, width, height }),
            None => Err(ErrorKind::MalformedText(s.to_string(), FORM).into()),
        }
    }
}

/// A set of cells to keep out of a maze, over a `width` * `height` 2d space.
///
/// Coordinates outside that space are never masked, so a mask can be smaller than the grid it
/// is applied to.
#[derive(Debug, Clone)]
pub struct BinaryMask2D {
    mask: BitSet,
    pub width: u32,
    pub height: u32,
}

impl BinaryMask2D {
    /// An empty mask, nothing masked.
    pub fn new(width: u32, height: u32) -> BinaryMask2D {
        BinaryMask2D {
            mask: BitSet::with_capacity((width as usize) * (height as usize)),
            width,
            height,
        }
    }

    /// Each pixel darker than mid gray masks the cell at the same position.
    pub fn from_image(data_image: &DynamicImage) -> BinaryMask2D {

        let gray_scale_image = data_image.to_luma8();
        let (w, h) = (gray_scale_image.width(), gray_scale_image.height());
        let mut mask = BinaryMask2D::new(w, h);

        for (x, y, pix) in gray_scale_image.enumerate_pixels() {
            let gray_scale_value = pix.0[0];
            if gray_scale_value < 128 {
                mask.mask_cell(Cartesian2DCoordinate::new(x, y));
            }
        }

        debug!(width = w, height = h, masked = mask.masked_count(), "loaded mask image");
        mask
    }

    /// A `width` * `height` mask with a `rect_width` * `rect_height` block masked in its centre,
    /// e.g. to reserve space for a structure the maze has to route around.
    pub fn centred_rectangle(width: u32,
                             height: u32,
                             rect_width: u32,
                             rect_height: u32)
                             -> BinaryMask2D {
        let mut mask = BinaryMask2D::new(width, height);
        let x = width.saturating_sub(rect_width) / 2;
        let y = height.saturating_sub(rect_height) / 2;
        mask.mask_rectangle(x, y, rect_width, rect_height);
        mask
    }

    /// Mask one cell. Returns false if the coordinate is outside the mask space.
    pub fn mask_cell(&mut self, coord: Cartesian2DCoordinate) -> bool {
        match self.bit_index(coord) {
            Some(bit_index) => {
                let _ = self.mask.insert(bit_index);
                true
            }
            None => false,
        }
    }

    /// Mask a rectangle with its top left (north west) corner at (`x`, `y`), clipped to the mask
    /// space.
    pub fn mask_rectangle(&mut self, x: u32, y: u32, rect_width: u32, rect_height: u32) {
        let x_end = x.saturating_add(rect_width).min(self.width);
        let y_end = y.saturating_add(rect_height).min(self.height);
        for mask_y in y..y_end {
            for mask_x in x..x_end {
                self.mask_cell(Cartesian2DCoordinate::new(mask_x, mask_y));
            }
        }
    }

    pub fn mask_area(&mut self, rect: MaskRectangle) {
        self.mask_rectangle(rect.x, rect.y, rect.width, rect.height);
    }

    /// Mask every cell `other` masks, at the same coordinates. Cells outside this mask's space
    /// are dropped.
    pub fn merge(&mut self, other: &BinaryMask2D) {
        let other_width = RowLength(other.width as usize);
        for bit_index in other.mask.iter() {
            self.mask_cell(Cartesian2DCoordinate::from_row_major_index(bit_index, other_width));
        }
    }

    /// Is the given coordinate masked out / turned off?
    ///
    /// A coordinate is not masked if it is outside the bounds of masks 2d space.
    pub fn is_masked(&self, coord: Cartesian2DCoordinate) -> bool {
        self.bit_index(coord)
            .map_or(false, |bit_index| self.mask.contains(bit_index))
    }

    pub fn masked_count(&self) -> usize {
        self.mask.len()
    }

    /// Calculates the number of unmasked cells within a 2d space of `width` * `height`.
    ///
    /// All cells in the 2d space outside of the masks' own width and height are counted as unmasked.
    pub fn count_unmasked_within_dimensions(&self, width: RowLength, height: ColumnLength) -> usize {

        let mut count = 0;
        for x in 0..(width.0) {
            for y in 0..(height.0) {
                let masked = self.is_masked(Cartesian2DCoordinate::new(x as u32, y as u32));
                if !masked {
                    count += 1;
                }
            }
        }

        count
    }

    /// The first unmasked coordinate in row major order, None if everything is masked.
    pub fn first_unmasked_coordinate(&self) -> Option<Cartesian2DCoordinate> {

        // A bit in the set means masked off, so the bitset iterator is no help here.
        let mask_size = self.width as usize * self.height as usize;
        (0..mask_size)
            .position(|bit_index| !self.mask.contains(bit_index))
            .map(|i| Cartesian2DCoordinate::from_row_major_index(i, RowLength(self.width as usize)))
    }

    #[inline]
    fn bit_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if coord.x < self.width && coord.y < self.height {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }
}
