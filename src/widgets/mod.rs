pub mod globe;
pub mod heading;
pub mod vapor;

pub use globe::GlobeWidget;
pub use heading::ParticleHeading;
pub use vapor::VaporTextWidget;
