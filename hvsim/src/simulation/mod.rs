pub mod states;
pub mod constants;
pub mod params;
pub mod engine;
pub mod forces;
pub mod trajectory;
pub mod potential;
pub mod matrix;
pub mod sampler;
pub mod integrator;
pub mod scenario;
