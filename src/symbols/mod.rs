pub mod exchange_codes;

pub use exchange_codes::RegionExchanges;
