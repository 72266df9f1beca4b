pub mod derivative;
pub mod projector;
pub mod smoothing;
pub mod statistics;
pub mod window;
