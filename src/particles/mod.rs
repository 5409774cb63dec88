pub mod pool;

pub use pool::{Particle, ParticlePool};
