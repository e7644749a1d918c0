//! Trait for the physics backend that receives road tiles.

use crate::integration::scene::RoadTile;

/// Receiver of static road tiles.
///
/// Implement this trait to create one static sensor body per tile in any
/// physics engine. Contacts with a tile report back through
/// [`RoadTile::segment`].
///
/// # Example
///
/// ```ignore
/// use trackgen_rs::{RoadTile, TileSink};
///
/// struct MyWorld {
///     // Your physics world here
/// }
///
/// impl TileSink for MyWorld {
///     type Error = std::io::Error;
///
///     fn insert_tile(&mut self, tile: &RoadTile) -> Result<(), Self::Error> {
///         // Create a static sensor polygon from tile.vertices
///         Ok(())
///     }
/// }
/// ```
pub trait TileSink {
    /// Error type for body creation failures.
    type Error;

    /// Create the static body for one tile.
    fn insert_tile(&mut self, tile: &RoadTile) -> Result<(), Self::Error>;
}

impl TileSink for Vec<RoadTile> {
    type Error = std::convert::Infallible;

    fn insert_tile(&mut self, tile: &RoadTile) -> Result<(), Self::Error> {
        self.push(*tile);
        Ok(())
    }
}
