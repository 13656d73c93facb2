// Pipeline processing: raw event normalization

pub mod normalize;
