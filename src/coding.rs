//! The tile layouts.
//!
//! Every codec here holds nothing but a [`BitDepth`](crate::BitDepth), and
//! each one supports all depths from 1 to 8, whether or not any console
//! ever used that combination.

pub use packed::Packed;
pub use row_planar::RowPlanar;
pub use tile_planar::TilePlanar;
pub use tile_row_pair_planar::TileRowPairPlanar;

mod packed;
mod row_planar;
mod tile_planar;
mod tile_row_pair_planar;

#[cfg(test)]
mod test_image;
