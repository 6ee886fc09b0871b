pub mod loader;
pub mod observation;
pub mod presets;
