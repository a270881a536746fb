// Domain layer: the clinical record, model selection and prediction types, and
// the ports the inference pipeline is written against.

pub mod model;
pub mod ports;
