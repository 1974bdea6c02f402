pub use crate::{
    analysis::riskmetrics::*,
    data::{priceseries::*, pricetable::*, returnseries::*, weights::*},
    math::{cholesky::*, statistics::*},
    models::{
        assetmodel::*, correlatedwalk::*, distributionparams::*, model::*, randomnumbers::*,
        randomwalk::*, stochasticmodel::*,
    },
    simulation::{config::*, forecast::*, montecarloengine::*, pathset::*, summary::*},
    utils::errors::*,
};
