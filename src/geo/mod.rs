pub mod fetch;
pub mod geometry;
pub mod land;
pub mod projection;

pub use fetch::{LAND_URL_ENV, build_client, fetch_land};
pub use geometry::{Dot, GeoBounds, point_in_feature, point_in_polygon, point_in_ring, sample_dots};
pub use land::{LandCollection, LandFeature, LandPolygon, Position};
pub use projection::Orthographic;
