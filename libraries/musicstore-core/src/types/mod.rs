mod album;
mod artist;
mod cart;
mod genre;
mod ids;
mod price;

pub use album::{Album, AlbumId, CreateAlbum, OrderDetail};
pub use artist::{Artist, ArtistId, CreateArtist};
pub use cart::{CartItem, CartItemId, RemovedItem};
pub use genre::{CreateGenre, Genre, GenreId, GenreWithAlbums};
pub use ids::CartId;
pub use price::{Price, PriceCategory};
