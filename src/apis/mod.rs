pub mod bilesu_paradize;

pub use bilesu_paradize::BilesuParadizeApi;
