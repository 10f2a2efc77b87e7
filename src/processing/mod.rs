pub mod color;
pub mod combine;
pub mod morphology;
pub mod threshold;
