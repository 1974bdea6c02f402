pub mod assetmodel;
pub mod correlatedwalk;
pub mod distributionparams;
pub mod model;
pub mod randomnumbers;
pub mod randomwalk;
pub mod stochasticmodel;
