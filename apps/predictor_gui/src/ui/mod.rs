//! UI layer: the single predictor window.

pub mod app;

pub use app::PredictorApp;
