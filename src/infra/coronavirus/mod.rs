mod client;

pub use client::CoronavirusClient;
