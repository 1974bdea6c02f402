pub mod priceseries;
pub mod pricetable;
pub mod returnseries;
pub mod weights;
