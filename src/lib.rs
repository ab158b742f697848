// Public library interface for tickermap
// The debug-layout binary and any renderer consume the engine through these modules

pub mod layout;
pub mod market;
pub mod model;
